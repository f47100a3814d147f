use rand::Rng;

use crate::cards::{join_values, Card};
use crate::errors::GameError;

/// Number of cards a hand holds between turns.
pub const HAND_SIZE: usize = 4;

/// The cards held by one player.
///
/// A hand holds [`HAND_SIZE`] cards between turns and briefly one more
/// between a draw and the following discard.
#[derive(Debug, Clone)]
pub struct Hand {
    owner: usize,
    cards: Vec<Card>,
}

impl Hand {
    pub fn new(owner: usize) -> Self {
        Self {
            owner,
            cards: Vec::with_capacity(HAND_SIZE + 1),
        }
    }

    pub fn owner(&self) -> usize {
        self.owner
    }

    /// The value this hand never gives away while it holds anything else.
    pub fn preferred_value(&self) -> Card {
        Card::new(self.owner as u32 + 1)
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Removes a uniformly chosen card whose value differs from the
    /// preferred value. Remaining cards keep their order.
    ///
    /// # Errors
    ///
    /// [`GameError::EmptyHandRemoval`] when every card (or no card at all)
    /// carries the preferred value.
    pub fn remove_card<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Card, GameError> {
        let preferred = self.preferred_value();
        let eligible: Vec<usize> = self
            .cards
            .iter()
            .enumerate()
            .filter(|(_, c)| **c != preferred)
            .map(|(i, _)| i)
            .collect();
        if eligible.is_empty() {
            return Err(GameError::EmptyHandRemoval {
                player: self.owner,
                preferred: preferred.value(),
            });
        }
        let pick = eligible[rng.random_range(0..eligible.len())];
        Ok(self.cards.remove(pick))
    }

    pub fn check_win(&self) -> bool {
        match self.cards.as_slice() {
            [first, rest @ ..] if self.cards.len() == HAND_SIZE => rest.iter().all(|c| c == first),
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn as_display_string(&self) -> String {
        join_values(&self.cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn hand_of(owner: usize, values: &[u32]) -> Hand {
        let mut hand = Hand::new(owner);
        for &v in values {
            hand.add_card(Card::new(v));
        }
        hand
    }

    #[test]
    fn four_equal_cards_win() {
        assert!(hand_of(0, &[7, 7, 7, 7]).check_win());
        assert!(!hand_of(0, &[7, 7, 7, 8]).check_win());
        // five equal cards are mid-turn, not a win
        assert!(!hand_of(0, &[7, 7, 7, 7, 7]).check_win());
        assert!(!hand_of(0, &[7, 7, 7]).check_win());
    }

    #[test]
    fn remove_never_discards_preferred_value() {
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        for _ in 0..200 {
            // owner 2 prefers value 3
            let mut hand = hand_of(2, &[3, 3, 5, 3, 3]);
            assert_eq!(hand.remove_card(&mut rng), Ok(Card::new(5)));
            assert_eq!(hand.as_display_string(), "3 3 3 3");
        }
    }

    #[test]
    fn remove_picks_among_all_eligible_cards() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let mut hand = hand_of(0, &[1, 4, 5, 6, 1]);
            seen.insert(hand.remove_card(&mut rng).unwrap());
            assert_eq!(hand.len(), 4);
        }
        let expected: std::collections::HashSet<_> =
            [4, 5, 6].into_iter().map(Card::new).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn remove_is_deterministic_for_a_seed() {
        let mut a = ChaCha20Rng::seed_from_u64(77);
        let mut b = ChaCha20Rng::seed_from_u64(77);
        let mut h1 = hand_of(1, &[10, 11, 12, 13, 14]);
        let mut h2 = hand_of(1, &[10, 11, 12, 13, 14]);
        assert_eq!(h1.remove_card(&mut a), h2.remove_card(&mut b));
        assert_eq!(h1.cards(), h2.cards());
    }

    #[test]
    fn all_preferred_cards_fail_fast() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let mut hand = hand_of(0, &[1, 1, 1, 1, 1]);
        assert_eq!(
            hand.remove_card(&mut rng),
            Err(GameError::EmptyHandRemoval {
                player: 0,
                preferred: 1
            })
        );
        assert_eq!(hand.len(), 5);
    }
}
