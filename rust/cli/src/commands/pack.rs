//! Pack command handler: generates a playable pack file.

use crate::error::CliError;
use crate::io_utils::ensure_parent_dir;
use fourfold_engine::dealer::CARDS_PER_PLAYER;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use std::io::Write;
use std::path::Path;

/// Values `1..=players`, eight of each, shuffled with `seed`.
pub fn generate_pack(players: usize, seed: u64) -> Vec<u32> {
    let top = u32::try_from(players).unwrap_or(u32::MAX);
    let mut values: Vec<u32> = (1..=top)
        .flat_map(|v| std::iter::repeat_n(v, CARDS_PER_PLAYER))
        .collect();
    values.shuffle(&mut ChaCha20Rng::seed_from_u64(seed));
    values
}

/// Handle the pack command.
///
/// Writes one value per line to `output`, or to `out` when no file is given.
/// Uses a random seed unless one is supplied.
pub fn handle_pack_command(
    players: usize,
    seed: Option<u64>,
    output: Option<&Path>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let seed = seed.unwrap_or_else(rand::random);
    let text: String = generate_pack(players, seed)
        .iter()
        .map(|v| format!("{}\n", v))
        .collect();

    match output {
        Some(path) => {
            ensure_parent_dir(path).map_err(|e| CliError::Io(std::io::Error::other(e)))?;
            std::fs::write(path, text)?;
            writeln!(out, "wrote {} cards to {}", players * CARDS_PER_PLAYER, path.display())?;
        }
        None => out.write_all(text.as_bytes())?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::parse_pack;

    #[test]
    fn generated_pack_is_valid_for_its_table() {
        let values = generate_pack(3, 7);
        assert_eq!(values.len(), 24);
        for v in 1..=3 {
            assert_eq!(values.iter().filter(|&&x| x == v).count(), 8);
        }
    }

    #[test]
    fn same_seed_same_pack() {
        assert_eq!(generate_pack(4, 11), generate_pack(4, 11));
        assert_ne!(generate_pack(4, 11), generate_pack(4, 12));
    }

    #[test]
    fn writes_a_parsable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("packs").join("four.txt");
        let mut out = Vec::new();
        handle_pack_command(4, Some(1), Some(&path), &mut out).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(parse_pack(&text, 4).unwrap().len(), 32);
        assert!(String::from_utf8(out).unwrap().starts_with("wrote 32 cards"));
    }
}
