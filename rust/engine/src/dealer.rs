//! One-shot setup: turns a pack into seated players and stocked decks.

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::game::GameState;
use crate::hand::HAND_SIZE;
use crate::player::Player;

/// Cards in a valid pack per player: a hand's worth plus a deck's worth.
pub const CARDS_PER_PLAYER: usize = 2 * HAND_SIZE;

#[derive(Debug, Clone, Copy)]
pub struct Dealer {
    players: usize,
}

impl Dealer {
    pub fn new(players: usize) -> Result<Self, GameError> {
        if players == 0 {
            return Err(GameError::InvalidPlayerCount);
        }
        Ok(Self { players })
    }

    /// Size a pack must have for this table.
    pub fn pack_size(&self) -> usize {
        CARDS_PER_PLAYER * self.players
    }

    /// Deals `pack` in order: one card per hand for four rounds starting at
    /// seat 0, then the rest one card per deck starting at deck 0.
    ///
    /// Seat `i` draws its discard choices from `seed + i`.
    pub fn deal(&self, pack: &[Card], seed: u64) -> Result<GameState, GameError> {
        if pack.len() != self.pack_size() {
            return Err(GameError::PackSizeMismatch {
                expected: self.pack_size(),
                actual: pack.len(),
            });
        }
        let mut players: Vec<Player> = (0..self.players)
            .map(|id| Player::new(id, self.players, seed))
            .collect();
        let mut decks: Vec<Deck> = (0..self.players).map(Deck::new).collect();

        let (to_hands, to_decks) = pack.split_at(HAND_SIZE * self.players);
        for (i, &card) in to_hands.iter().enumerate() {
            players[i % self.players].give_card(card);
        }
        for (i, &card) in to_decks.iter().enumerate() {
            decks[i % self.players].discard(card);
        }
        GameState::new(players, decks)
    }
}
