//! Deal command handler.
//!
//! Validates a pack for a given table size and shows the hands and decks it
//! deals, without playing any turn. Useful for checking a pack file before
//! running `fourfold play` with it.

use crate::error::CliError;
use crate::formatters::format_deck;
use crate::validation::load_pack;
use fourfold_engine::cards::join_values;
use fourfold_engine::engine::Engine;
use std::io::Write;
use std::path::Path;

/// Handle the deal command.
///
/// Prints each player's initial hand and each deck's contents, then whether
/// a player already holds four of a kind.
///
/// # Errors
///
/// Returns `CliError::Pack` if the pack file cannot be used and
/// `CliError::Io` on write failures.
pub fn handle_deal_command(
    players: usize,
    pack: &Path,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let pack = load_pack(pack, players)?;
    // the deal itself does not depend on the seed
    let engine = Engine::new(players, &pack, 0)?;
    let snapshot = engine.snapshot();

    for (p, hand) in snapshot.hands.iter().enumerate() {
        writeln!(out, "player {} initial hand {}", p + 1, join_values(hand))?;
    }
    for (d, cards) in snapshot.decks.iter().enumerate() {
        writeln!(out, "{}", format_deck(d, cards))?;
    }
    match engine.check_winners() {
        Some(w) => writeln!(out, "player {} wins before the first turn", w + 1)?,
        None => writeln!(out, "no player holds four of a kind yet")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_hands_decks_and_initial_winner() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pack.txt");
        // two players: seat 1 is dealt four 2s
        std::fs::write(&path, "1\n2\n3\n2\n4\n2\n5\n2\n6\n7\n8\n9\n10\n11\n12\n13\n").unwrap();

        let mut out = Vec::new();
        handle_deal_command(2, &path, &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "player 1 initial hand 1 3 4 5",
                "player 2 initial hand 2 2 2 2",
                "deck 1 contents: 6 8 10 12",
                "deck 2 contents: 7 9 11 13",
                "player 2 wins before the first turn",
            ]
        );
    }

    #[test]
    fn pack_of_wrong_size_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pack.txt");
        std::fs::write(&path, "1\n2\n").unwrap();
        let result = handle_deal_command(1, &path, &mut Vec::new());
        assert!(matches!(result, Err(CliError::Pack(_))));
    }
}
