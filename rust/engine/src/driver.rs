//! Runs a whole game with one thread per player.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use std::thread::{self, ScopedJoinHandle};

use crate::engine::{Engine, Turn};
use crate::errors::GameError;
use crate::game::GameSnapshot;

/// How a game played through [`play`] ended.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct GameOutcome {
    pub winner: Option<usize>,
    /// Turns completed by each seat
    pub turns: Vec<u64>,
    pub snapshot: GameSnapshot,
}

/// Checks the dealt hands, then (if nobody has won yet) starts one thread
/// per player and waits until all of them have seen the game end.
///
/// Threads are started in an order shuffled by `seed`, so seat 0 does not
/// always get the first turn.
///
/// # Errors
///
/// The first error any player hit. The engine has already ended the game
/// for the others by then.
pub fn play(engine: &Engine, seed: u64) -> Result<GameOutcome, GameError> {
    let players = engine.player_count();
    let mut turns = vec![0u64; players];

    if engine.check_winners().is_none() {
        let mut order: Vec<usize> = (0..players).collect();
        order.shuffle(&mut ChaCha20Rng::seed_from_u64(seed));
        tracing::debug!(?order, "starting player threads");

        let results: Vec<(usize, Result<u64, GameError>)> = thread::scope(|s| {
            let handles = start_seats(engine, &order, |seat| {
                thread::Builder::new()
                    .name(format!("player-{}", seat + 1))
                    .spawn_scoped(s, move || run_player(engine, seat))
            });
            handles
                .into_iter()
                .map(|(seat, handle)| {
                    let result = match handle {
                        Ok(h) => h
                            .join()
                            .unwrap_or(Err(GameError::ActorPanicked { player: seat })),
                        Err(e) => Err(e),
                    };
                    (seat, result)
                })
                .collect()
        });

        let mut first_error = None;
        for (seat, result) in results {
            match result {
                Ok(n) => turns[seat] = n,
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }
        if let Some(e) = engine.failure().or(first_error) {
            return Err(e);
        }
    }

    let snapshot = engine.snapshot();
    Ok(GameOutcome {
        winner: snapshot.winner,
        turns,
        snapshot,
    })
}

type SeatHandle<'scope> = Result<ScopedJoinHandle<'scope, Result<u64, GameError>>, GameError>;

/// Starts every seat in `order`. A seat that cannot be started aborts the
/// game at once, before anything is joined, so seats already running are
/// not left waiting for cards it would have passed on.
fn start_seats<'scope, F>(
    engine: &Engine,
    order: &[usize],
    mut spawn: F,
) -> Vec<(usize, SeatHandle<'scope>)>
where
    F: FnMut(usize) -> std::io::Result<ScopedJoinHandle<'scope, Result<u64, GameError>>>,
{
    order
        .iter()
        .map(|&seat| {
            let handle = spawn(seat).map_err(|e| {
                tracing::error!(seat, error = %e, "could not start player thread");
                let err = GameError::ActorPanicked { player: seat };
                engine.abort(err.clone());
                err
            });
            (seat, handle)
        })
        .collect()
}

/// Ends the game if its player thread unwinds, so nobody waits forever.
struct AbortOnPanic<'a> {
    engine: &'a Engine,
    seat: usize,
}

impl Drop for AbortOnPanic<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.engine
                .abort(GameError::ActorPanicked { player: self.seat });
        }
    }
}

fn run_player(engine: &Engine, seat: usize) -> Result<u64, GameError> {
    let _guard = AbortOnPanic { engine, seat };
    let mut turns = 0;
    loop {
        match engine.run_cycle(seat)? {
            Turn::Played { .. } => turns += 1,
            Turn::GameOver => break,
        }
    }
    tracing::debug!(seat, turns, "player exits");
    Ok(turns)
}
