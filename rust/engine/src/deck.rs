use std::collections::VecDeque;

use crate::cards::{join_values, Card};
use crate::errors::GameError;

/// A face-down pile sitting between two neighbouring players.
///
/// Cards are drawn from the front and discarded onto the back, so the
/// oldest card is always drawn first. The deck does no locking of its own;
/// every access goes through the engine's critical section.
#[derive(Debug, Clone)]
pub struct Deck {
    id: usize,
    cards: VecDeque<Card>,
}

impl Deck {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            cards: VecDeque::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn draw(&mut self) -> Result<Card, GameError> {
        self.cards
            .pop_front()
            .ok_or(GameError::EmptyDeck { deck: self.id })
    }

    pub fn discard(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards from oldest (next to be drawn) to newest.
    pub fn cards(&self) -> Vec<Card> {
        self.cards.iter().copied().collect()
    }

    pub fn as_display_string(&self) -> String {
        join_values(&self.cards())
    }
}
