//! Input parsing and validation for the game setup.
//!
//! Handles the two things a player is asked for before a game starts:
//! - the number of players
//! - the pack file, one card value per line
//!
//! Prompt-level validation returns `Result<_, String>` so the message can be
//! shown and the question asked again. Pack problems are reported as
//! [`PackError`].

use std::path::Path;

use fourfold_engine::cards::Card;
use fourfold_engine::dealer::CARDS_PER_PLAYER;
use thiserror::Error;

use crate::io_utils::read_text;

/// Why a pack file cannot be used for a game.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PackError {
    #[error("cannot read {path}: {message}")]
    Unreadable { path: String, message: String },
    #[error("line {line} is blank")]
    BlankLine { line: usize },
    #[error("line {line} is not a card value: {content:?}")]
    InvalidCard { line: usize, content: String },
    #[error("line {line} holds a negative value ({value})")]
    NegativeCard { line: usize, value: i64 },
    #[error("pack has {actual} cards, expected {expected}")]
    WrongCardCount { expected: usize, actual: usize },
}

/// Parse a player count typed at the prompt or given on the command line.
///
/// # Example
///
/// ```rust
/// # use fourfold_cli::validation::parse_player_count;
/// assert_eq!(parse_player_count(" 4 "), Ok(4));
/// assert!(parse_player_count("0").is_err());
/// assert!(parse_player_count("four").is_err());
/// ```
pub fn parse_player_count(input: &str) -> Result<usize, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty input".to_string());
    }
    match input.parse::<usize>() {
        Ok(0) => Err("A game needs at least one player".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("Not a whole number: {}", input)),
    }
}

/// Parse pack text for a game of `players` players.
///
/// Every line must hold one non-negative integer (surrounding whitespace is
/// ignored) and the pack must contain exactly eight cards per player. A
/// trailing newline at end of file does not count as a blank line.
pub fn parse_pack(text: &str, players: usize) -> Result<Vec<Card>, PackError> {
    let mut cards = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let content = raw.trim();
        if content.is_empty() {
            return Err(PackError::BlankLine { line });
        }
        let value: i64 = content.parse().map_err(|_| PackError::InvalidCard {
            line,
            content: content.to_string(),
        })?;
        if value < 0 {
            return Err(PackError::NegativeCard { line, value });
        }
        let value = u32::try_from(value).map_err(|_| PackError::InvalidCard {
            line,
            content: content.to_string(),
        })?;
        cards.push(Card::new(value));
    }

    let expected = players * CARDS_PER_PLAYER;
    if cards.len() != expected {
        return Err(PackError::WrongCardCount {
            expected,
            actual: cards.len(),
        });
    }
    Ok(cards)
}

/// Read and validate a pack file.
pub fn load_pack(path: &Path, players: usize) -> Result<Vec<Card>, PackError> {
    let text = read_text(path).map_err(|message| PackError::Unreadable {
        path: path.display().to_string(),
        message,
    })?;
    parse_pack(&text, players)
}
