use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::player::Player;

/// Everything the players share: seats, decks and the outcome so far.
/// Only ever touched while the engine's lock is held.
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) players: Vec<Player>,
    pub(crate) decks: Vec<Deck>,
    pub(crate) winner: Option<usize>,
    pub(crate) is_over: bool,
    /// Error that ended the game, if it did not end with a winner
    pub(crate) failure: Option<GameError>,
}

impl GameState {
    /// Builds a live game from already dealt seats and decks.
    ///
    /// `players[i]` must be seat `i` and `decks[i]` deck `i`.
    pub fn new(players: Vec<Player>, decks: Vec<Deck>) -> Result<Self, GameError> {
        if players.is_empty() {
            return Err(GameError::InvalidPlayerCount);
        }
        debug_assert_eq!(players.len(), decks.len());
        Ok(Self {
            players,
            decks,
            winner: None,
            is_over: false,
            failure: None,
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn decks(&self) -> &[Deck] {
        &self.decks
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn winner(&self) -> Option<usize> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    pub fn failure(&self) -> Option<&GameError> {
        self.failure.as_ref()
    }

    /// Cards in all hands and decks together.
    pub fn total_cards(&self) -> usize {
        self.players.iter().map(|p| p.hand().len()).sum::<usize>()
            + self.decks.iter().map(Deck::len).sum::<usize>()
    }

    /// First winning seat in index order.
    pub(crate) fn find_winner(&self) -> Option<usize> {
        self.players.iter().position(Player::has_won)
    }

    pub(crate) fn hands(&self) -> Vec<Vec<Card>> {
        self.players.iter().map(|p| p.hand().cards().to_vec()).collect()
    }

    pub(crate) fn deck_contents(&self) -> Vec<Vec<Card>> {
        self.decks.iter().map(Deck::cards).collect()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            winner: self.winner,
            is_over: self.is_over,
            hands: self.hands(),
            decks: self.deck_contents(),
        }
    }
}

/// Copy of a game taken under the lock, for reporting.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub winner: Option<usize>,
    pub is_over: bool,
    /// Hand of each seat, in seat order
    pub hands: Vec<Vec<Card>>,
    /// Contents of each deck, oldest card first
    pub decks: Vec<Vec<Card>>,
}

impl GameSnapshot {
    pub fn total_cards(&self) -> usize {
        self.hands.iter().map(Vec::len).sum::<usize>() + self.decks.iter().map(Vec::len).sum::<usize>()
    }
}
