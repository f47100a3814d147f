//! # fourfold-engine: concurrent four-of-a-kind card exchange
//!
//! N players sit in a ring, each holding four cards, with one deck between
//! each player and the next. On a turn a player draws the oldest card of
//! their own deck and discards one card onto the next player's deck. The
//! first player holding four cards of the same value wins.
//!
//! Every player runs on its own thread. All hands and decks live behind a
//! single lock owned by the [`engine::Engine`], which makes each turn atomic,
//! parks players whose deck is empty and wakes everyone when the game ends.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card values and pack helpers
//! - [`deck`] - FIFO deck between two neighbours
//! - [`hand`] - A player's cards, discard choice and win check
//! - [`player`] - A seat: hand, deck wiring and seeded discard RNG
//! - [`dealer`] - Pack validation and round-robin dealing
//! - [`game`] - Shared game state and snapshots
//! - [`engine`] - Round coordinator: turns, win detection, shutdown
//! - [`driver`] - Thread-per-player game runner
//! - [`logger`] - Game events, event sinks and the JSONL event log
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use fourfold_engine::cards::pack_from_values;
//! use fourfold_engine::driver::play;
//! use fourfold_engine::engine::Engine;
//!
//! // Two players: seat 0 keeps 1s, seat 1 keeps 2s.
//! let pack = pack_from_values([1, 1, 2, 2].repeat(4));
//! let engine = Engine::new(2, &pack, 7).unwrap();
//! let outcome = play(&engine, 7).unwrap();
//!
//! let winner = outcome.winner.expect("someone wins");
//! assert!(outcome.snapshot.hands[winner].iter().all(|&c| c == outcome.snapshot.hands[winner][0]));
//! assert_eq!(outcome.snapshot.total_cards(), 16);
//! ```

pub mod cards;
pub mod dealer;
pub mod deck;
pub mod driver;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
