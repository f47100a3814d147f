use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid player count: a game needs at least one player")]
    InvalidPlayerCount,
    #[error("Pack has {actual} cards, expected {expected}")]
    PackSizeMismatch { expected: usize, actual: usize },
    #[error("Deck {deck} is empty")]
    EmptyDeck { deck: usize },
    #[error("Player {player} has no card to discard other than value {preferred}")]
    EmptyHandRemoval { player: usize, preferred: u32 },
    #[error("Unknown player {player} (game has {players} players)")]
    UnknownPlayer { player: usize, players: usize },
    #[error("Player {player} stopped unexpectedly")]
    ActorPanicked { player: usize },
}
