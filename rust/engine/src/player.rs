use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::hand::Hand;

/// One seat at the table: a hand plus the two decks it is wired to.
///
/// Player `i` draws from deck `i` and discards to deck `i + 1`, wrapping
/// to deck 0 for the last player.
#[derive(Debug, Clone)]
pub struct Player {
    /// Zero-based seat index
    id: usize,
    hand: Hand,
    /// Deck this player discards onto
    discard_deck: usize,
    /// Discard choices are drawn from here so a seed replays a game exactly
    rng: ChaCha20Rng,
}

impl Player {
    pub fn new(id: usize, player_count: usize, seed: u64) -> Self {
        let discard_deck = if id + 1 < player_count { id + 1 } else { 0 };
        Self {
            id,
            hand: Hand::new(id),
            discard_deck,
            rng: ChaCha20Rng::seed_from_u64(seed.wrapping_add(id as u64)),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn draw_deck(&self) -> usize {
        self.id
    }

    pub fn discard_deck(&self) -> usize {
        self.discard_deck
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    /// Used by the dealer only; turns go through [`Player::draw_from`].
    pub fn give_card(&mut self, card: Card) {
        self.hand.add_card(card);
    }

    pub fn draw_from(&mut self, deck: &mut Deck) -> Result<Card, GameError> {
        let card = deck.draw()?;
        self.hand.add_card(card);
        Ok(card)
    }

    pub fn discard_to(&mut self, deck: &mut Deck) -> Result<Card, GameError> {
        let card = self.hand.remove_card(&mut self.rng)?;
        deck.discard(card);
        Ok(card)
    }

    pub fn has_won(&self) -> bool {
        self.hand.check_win()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discard_deck_wraps_for_last_player() {
        let seats: Vec<usize> = (0..4).map(|i| Player::new(i, 4, 0).discard_deck()).collect();
        assert_eq!(seats, vec![1, 2, 3, 0]);
        assert_eq!(Player::new(0, 1, 0).discard_deck(), 0);
    }

    #[test]
    fn draw_then_discard_moves_one_card_between_decks() {
        let mut player = Player::new(0, 2, 5);
        for v in [2, 3, 4, 5] {
            player.give_card(Card::new(v));
        }
        let mut source = Deck::new(0);
        let mut target = Deck::new(1);
        source.discard(Card::new(1));

        assert_eq!(player.draw_from(&mut source), Ok(Card::new(1)));
        assert_eq!(player.hand().len(), 5);
        let discarded = player.discard_to(&mut target).unwrap();
        assert_ne!(discarded, Card::new(1));
        assert_eq!(player.hand().len(), 4);
        assert_eq!(target.cards(), vec![discarded]);
        assert!(source.is_empty());
    }
}
