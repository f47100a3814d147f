use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};

use crate::cards::{join_values, Card};

/// Something observable that happened during a game.
///
/// Events are emitted while the engine holds its lock, so the events of one
/// turn (draw, discard and possibly a win) are always contiguous.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    /// Hand dealt to a player before play starts
    InitialHand { player: usize, hand: Vec<Card> },
    /// Player took the oldest card of `deck`
    Draw {
        player: usize,
        card: Card,
        deck: usize,
    },
    /// Player put `card` at the bottom of `deck`; `hand` is what remains
    Discard {
        player: usize,
        card: Card,
        deck: usize,
        hand: Vec<Card>,
    },
    /// Player holds four of a kind
    Win { player: usize },
    /// Final state, emitted once; `winner` is `None` when the game was aborted
    GameOver {
        winner: Option<usize>,
        hands: Vec<Vec<Card>>,
        decks: Vec<Vec<Card>>,
    },
}

impl GameEvent {
    /// Player the event belongs to, if any.
    pub fn player(&self) -> Option<usize> {
        match self {
            GameEvent::InitialHand { player, .. }
            | GameEvent::Draw { player, .. }
            | GameEvent::Discard { player, .. }
            | GameEvent::Win { player } => Some(*player),
            GameEvent::GameOver { .. } => None,
        }
    }
}

/// Receives game events.
///
/// Called with the engine lock held: implementations must not call back
/// into the engine.
pub trait EventSink: Send + Sync {
    fn record(&self, event: &GameEvent);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&self, _event: &GameEvent) {}
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<GameEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<GameEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for MemorySink {
    fn record(&self, event: &GameEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

/// Forwards events to `tracing` under the `fourfold_engine::events` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: &GameEvent) {
        match event {
            GameEvent::InitialHand { player, hand } => {
                tracing::debug!(target: "fourfold_engine::events", player, hand = %join_values(hand), "initial hand");
            }
            GameEvent::Draw { player, card, deck } => {
                tracing::debug!(target: "fourfold_engine::events", player, card = card.value(), deck, "draw");
            }
            GameEvent::Discard {
                player, card, deck, ..
            } => {
                tracing::debug!(target: "fourfold_engine::events", player, card = card.value(), deck, "discard");
            }
            GameEvent::Win { player } => {
                tracing::info!(target: "fourfold_engine::events", player, "win");
            }
            GameEvent::GameOver { winner, .. } => {
                tracing::info!(target: "fourfold_engine::events", winner = ?winner, "game over");
            }
        }
    }
}

/// Sends each event to several sinks in order.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn EventSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sinks.push(sink);
        self
    }
}

impl std::fmt::Debug for FanoutSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanoutSink")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl EventSink for FanoutSink {
    fn record(&self, event: &GameEvent) {
        for sink in &self.sinks {
            sink.record(event);
        }
    }
}

/// One line of the JSONL event log.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// 1-based position of the event in the game
    pub seq: u64,
    /// Wall-clock time the event was recorded (RFC3339)
    pub ts: String,
    #[serde(flatten)]
    pub event: GameEvent,
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Appends every event to a JSONL file.
///
/// Write failures cannot be reported from inside the engine lock; the first
/// one is kept and returned by [`EventLogger::finish`], and later events are
/// dropped.
#[derive(Debug)]
pub struct EventLogger {
    inner: Mutex<LoggerState>,
}

#[derive(Debug)]
struct LoggerState {
    writer: BufWriter<File>,
    seq: u64,
    error: Option<std::io::Error>,
}

impl EventLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            inner: Mutex::new(LoggerState {
                writer: BufWriter::new(f),
                seq: 0,
                error: None,
            }),
        })
    }

    /// Flushes the file and reports the first write error, if any.
    pub fn finish(&self) -> std::io::Result<()> {
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(e) = state.error.take() {
            return Err(e);
        }
        state.writer.flush()
    }
}

impl LoggerState {
    fn write(&mut self, event: &GameEvent) -> std::io::Result<()> {
        self.seq += 1;
        let rec = EventRecord {
            seq: self.seq,
            ts: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            event: event.clone(),
        };
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")
    }
}

impl EventSink for EventLogger {
    fn record(&self, event: &GameEvent) {
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if state.error.is_some() {
            return;
        }
        if let Err(e) = state.write(event) {
            state.error = Some(e);
        }
    }
}
