//! Per-player and per-deck report files.
//!
//! [`ReportWriter`] is an [`EventSink`]: the engine feeds it every event and
//! it appends the formatted lines to `player<n>_output.txt`. When the game
//! ends it writes `deck<n>_output.txt` for every deck.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use fourfold_engine::logger::{EventSink, GameEvent};

use crate::formatters::{format_deck, format_event};

pub fn player_report_path(dir: &Path, player: usize) -> PathBuf {
    dir.join(format!("player{}_output.txt", player + 1))
}

pub fn deck_report_path(dir: &Path, deck: usize) -> PathBuf {
    dir.join(format!("deck{}_output.txt", deck + 1))
}

/// Writes the report files of one game.
///
/// Errors cannot surface from inside the engine lock; the first one is kept,
/// later writes are skipped and [`ReportWriter::finish`] returns it.
#[derive(Debug)]
pub struct ReportWriter {
    inner: Mutex<ReportState>,
}

#[derive(Debug)]
struct ReportState {
    dir: PathBuf,
    players: Vec<BufWriter<File>>,
    error: Option<std::io::Error>,
}

impl ReportWriter {
    /// Creates (truncating) one report file per player in `dir`, which must
    /// already exist.
    pub fn create(dir: &Path, players: usize) -> std::io::Result<Self> {
        let players = (0..players)
            .map(|p| File::create(player_report_path(dir, p)).map(BufWriter::new))
            .collect::<std::io::Result<Vec<_>>>()?;
        Ok(Self {
            inner: Mutex::new(ReportState {
                dir: dir.to_path_buf(),
                players,
                error: None,
            }),
        })
    }

    /// Flushes every player report and returns the first error seen.
    pub fn finish(&self) -> std::io::Result<()> {
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(e) = state.error.take() {
            return Err(e);
        }
        for w in &mut state.players {
            w.flush()?;
        }
        Ok(())
    }
}

impl ReportState {
    fn write(&mut self, event: &GameEvent) -> std::io::Result<()> {
        for (player, line) in format_event(event) {
            let Some(w) = self.players.get_mut(player) else {
                tracing::warn!(player, "event for a player without a report file");
                continue;
            };
            writeln!(w, "{}", line)?;
        }
        if let GameEvent::GameOver { decks, .. } = event {
            for (deck, cards) in decks.iter().enumerate() {
                let mut f = File::create(deck_report_path(&self.dir, deck))?;
                writeln!(f, "{}", format_deck(deck, cards))?;
            }
            for w in &mut self.players {
                w.flush()?;
            }
        }
        Ok(())
    }
}

impl EventSink for ReportWriter {
    fn record(&self, event: &GameEvent) {
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if state.error.is_some() {
            return;
        }
        if let Err(e) = state.write(event) {
            tracing::error!(error = %e, "failed to write report");
            state.error = Some(e);
        }
    }
}
