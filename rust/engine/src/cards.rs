use serde::{Deserialize, Serialize};
use std::fmt;

/// A single playing card identified only by its face value.
/// Two cards with the same value are interchangeable for win-checking.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Card(u32);

impl Card {
    pub const fn new(value: u32) -> Self {
        Card(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for Card {
    fn from(value: u32) -> Self {
        Card(value)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Builds a pack from raw values, preserving order.
pub fn pack_from_values<I>(values: I) -> Vec<Card>
where
    I: IntoIterator<Item = u32>,
{
    values.into_iter().map(Card::new).collect()
}

/// Space-joined card values, as used in hand and deck reports.
pub fn join_values(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
