use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use crate::cards::Card;
use crate::dealer::Dealer;
use crate::errors::GameError;
use crate::game::{GameSnapshot, GameState};
use crate::logger::{EventSink, GameEvent, NullSink};

/// What a call to [`Engine::run_cycle`] did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Turn {
    /// The player drew `drew`, discarded `discarded`, and `won` tells whether
    /// this turn ended the game in their favour.
    Played {
        drew: Card,
        discarded: Card,
        won: bool,
    },
    /// The game had already ended; nothing moved.
    GameOver,
}

/// Round coordinator shared by all player threads.
///
/// A single mutex guards every hand and deck, so a whole turn (draw,
/// discard, win check) is atomic with respect to every other player.
/// Players whose deck is empty park on a condition variable that is
/// broadcast after every turn and when the game ends.
///
/// # Examples
///
/// ```
/// use fourfold_engine::cards::pack_from_values;
/// use fourfold_engine::engine::{Engine, Turn};
///
/// // two players, nobody holds four of a kind yet
/// let pack = pack_from_values([
///     1, 2, 3, 4, 5, 6, 7, 8, // hands
///     9, 10, 11, 12, 13, 14, 15, 16, // decks
/// ]);
/// let engine = Engine::new(2, &pack, 42).unwrap();
/// assert_eq!(engine.check_winners(), None);
///
/// match engine.run_cycle(0).unwrap() {
///     Turn::Played { drew, .. } => assert_eq!(drew.value(), 9),
///     Turn::GameOver => unreachable!(),
/// }
/// assert_eq!(engine.total_cards(), 16);
/// ```
pub struct Engine {
    state: Mutex<GameState>,
    /// Signalled when a deck gains a card or the game ends
    changed: Condvar,
    sink: Arc<dyn EventSink>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("state", &*self.lock())
            .finish_non_exhaustive()
    }
}

impl Engine {
    pub fn new(players: usize, pack: &[Card], seed: u64) -> Result<Self, GameError> {
        Self::with_sink(players, pack, seed, Arc::new(NullSink))
    }

    pub fn with_sink(
        players: usize,
        pack: &[Card],
        seed: u64,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, GameError> {
        let state = Dealer::new(players)?.deal(pack, seed)?;
        Ok(Self::from_state(state, sink))
    }

    /// Wraps an already dealt game. Emits the initial hands to `sink`.
    pub fn from_state(state: GameState, sink: Arc<dyn EventSink>) -> Self {
        for p in state.players() {
            sink.record(&GameEvent::InitialHand {
                player: p.id(),
                hand: p.hand().cards().to_vec(),
            });
        }
        tracing::debug!(players = state.player_count(), cards = state.total_cards(), "game dealt");
        Self {
            state: Mutex::new(state),
            changed: Condvar::new(),
            sink,
        }
    }

    // A panicking sink must not wedge the other players.
    fn lock(&self) -> MutexGuard<'_, GameState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Plays one turn for `player`: draw from their deck, discard to the
    /// next deck, then check every hand for a winner.
    ///
    /// Blocks while the player's deck is empty. Once the game is over this
    /// returns [`Turn::GameOver`] without touching any card. A four of a kind
    /// already in the dealt hands ends the game before the first draw, so
    /// callers need not run [`Engine::check_winners`] first.
    ///
    /// # Errors
    ///
    /// [`GameError::UnknownPlayer`] for a seat outside the table. Any error
    /// raised during the turn ends the game for everyone before it is
    /// returned.
    pub fn run_cycle(&self, player: usize) -> Result<Turn, GameError> {
        let mut state = self.lock();
        if player >= state.player_count() {
            return Err(GameError::UnknownPlayer {
                player,
                players: state.player_count(),
            });
        }
        // the dealt hands may already hold a winner
        self.declare_winner(&mut state);
        let source = state.players[player].draw_deck();
        loop {
            if state.is_over {
                return Ok(Turn::GameOver);
            }
            if !state.decks[source].is_empty() {
                break;
            }
            tracing::trace!(player, deck = source, "waiting for a card");
            state = self
                .changed
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }

        match self.play_turn(&mut state, player) {
            Ok(turn) => {
                self.changed.notify_all();
                Ok(turn)
            }
            Err(e) => {
                tracing::warn!(player, error = %e, "turn failed, ending game");
                self.shut_down(&mut state, Some(e.clone()));
                Err(e)
            }
        }
    }

    fn play_turn(&self, state: &mut GameState, player: usize) -> Result<Turn, GameError> {
        let GameState { players, decks, .. } = &mut *state;
        let seat = &mut players[player];
        let (from, to) = (seat.draw_deck(), seat.discard_deck());

        let drew = seat.draw_from(&mut decks[from])?;
        self.sink.record(&GameEvent::Draw {
            player,
            card: drew,
            deck: from,
        });
        let discarded = seat.discard_to(&mut decks[to])?;
        self.sink.record(&GameEvent::Discard {
            player,
            card: discarded,
            deck: to,
            hand: seat.hand().cards().to_vec(),
        });
        tracing::debug!(player, drew = drew.value(), discarded = discarded.value(), "turn played");

        let won = self.declare_winner(state) == Some(player);
        Ok(Turn::Played {
            drew,
            discarded,
            won,
        })
    }

    /// Scans every hand in seat order and ends the game for the first
    /// four-of-a-kind found. Returns the winner, which stays fixed once set.
    pub fn check_winners(&self) -> Option<usize> {
        let mut state = self.lock();
        self.declare_winner(&mut state)
    }

    fn declare_winner(&self, state: &mut GameState) -> Option<usize> {
        if state.is_over {
            return state.winner;
        }
        let winner = state.find_winner()?;
        state.winner = Some(winner);
        self.sink.record(&GameEvent::Win { player: winner });
        self.shut_down(state, None);
        Some(winner)
    }

    /// Ends the game without a winner, e.g. when a player thread died.
    /// Returns `false` if the game was already over.
    pub fn abort(&self, error: GameError) -> bool {
        let mut state = self.lock();
        if state.is_over {
            // a shutdown cut short by a panicking sink may not have woken anyone
            self.changed.notify_all();
            return false;
        }
        tracing::warn!(error = %error, "game aborted");
        self.shut_down(&mut state, Some(error));
        true
    }

    // The flag is written under the lock before waking anyone, and every
    // waiter re-checks it on wake, so nobody moves a card after game over.
    // Waiters are woken before the sink runs so a panicking sink cannot
    // strand them.
    fn shut_down(&self, state: &mut GameState, failure: Option<GameError>) {
        state.is_over = true;
        if state.failure.is_none() {
            state.failure = failure;
        }
        self.changed.notify_all();
        self.sink.record(&GameEvent::GameOver {
            winner: state.winner,
            hands: state.hands(),
            decks: state.deck_contents(),
        });
        match state.winner {
            Some(w) => tracing::info!(winner = w, "game over"),
            None => tracing::info!("game over without a winner"),
        }
    }

    pub fn player_count(&self) -> usize {
        self.lock().player_count()
    }

    pub fn winner(&self) -> Option<usize> {
        self.lock().winner()
    }

    pub fn is_over(&self) -> bool {
        self.lock().is_over()
    }

    pub fn failure(&self) -> Option<GameError> {
        self.lock().failure().cloned()
    }

    pub fn total_cards(&self) -> usize {
        self.lock().total_cards()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.lock().snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::pack_from_values;
    use crate::logger::MemorySink;

    // 2 players: hands [1,3,5,7]/[2,4,6,8], decks [9,11,13,15]/[10,12,14,16]
    fn distinct_pack() -> Vec<Card> {
        pack_from_values(1..=16)
    }

    #[test]
    fn unknown_player_is_rejected() {
        let engine = Engine::new(2, &distinct_pack(), 0).unwrap();
        assert_eq!(
            engine.run_cycle(2),
            Err(GameError::UnknownPlayer {
                player: 2,
                players: 2
            })
        );
        assert!(!engine.is_over());
    }

    #[test]
    fn turn_moves_oldest_card_to_next_deck() {
        let engine = Engine::new(2, &distinct_pack(), 3).unwrap();
        let Turn::Played {
            drew, discarded, ..
        } = engine.run_cycle(0).unwrap()
        else {
            panic!("game should still be running");
        };
        assert_eq!(drew, Card::new(9));
        let snap = engine.snapshot();
        assert_eq!(snap.hands[0].len(), 4);
        assert_eq!(snap.decks[0], pack_from_values([11, 13, 15]));
        assert_eq!(snap.decks[1].last(), Some(&discarded));
        assert_eq!(snap.decks[1].len(), 5);
    }

    #[test]
    fn events_of_a_turn_are_draw_then_discard() {
        let sink = Arc::new(MemorySink::new());
        let engine = Engine::with_sink(2, &distinct_pack(), 3, sink.clone()).unwrap();
        engine.run_cycle(1).unwrap();
        let events = sink.events();
        assert_eq!(events.len(), 4);
        assert!(matches!(events[0], GameEvent::InitialHand { player: 0, .. }));
        assert!(matches!(events[1], GameEvent::InitialHand { player: 1, .. }));
        assert_eq!(
            events[2],
            GameEvent::Draw {
                player: 1,
                card: Card::new(10),
                deck: 1
            }
        );
        assert!(matches!(
            events[3],
            GameEvent::Discard {
                player: 1,
                deck: 0,
                ..
            }
        ));
    }

    #[test]
    fn dealt_winner_is_declared_before_the_first_draw() {
        // seat 1 is dealt 1 1 1 1 and prefers 2s, so it could discard a 1
        let mut values = vec![5, 1, 6, 1, 7, 1, 8, 1, 9, 7];
        values.extend(10..=15);
        for seed in 0..20 {
            let sink = Arc::new(MemorySink::new());
            let engine =
                Engine::with_sink(2, &pack_from_values(values.clone()), seed, sink.clone())
                    .unwrap();
            assert_eq!(engine.run_cycle(1), Ok(Turn::GameOver));
            assert_eq!(engine.winner(), Some(1));
            assert_eq!(engine.snapshot().hands[1], vec![Card::new(1); 4]);
            assert!(sink
                .events()
                .iter()
                .all(|e| !matches!(e, GameEvent::Draw { .. })));
        }
    }

    #[test]
    fn abort_is_only_effective_once() {
        let engine = Engine::new(2, &distinct_pack(), 0).unwrap();
        assert!(engine.abort(GameError::ActorPanicked { player: 1 }));
        assert!(!engine.abort(GameError::ActorPanicked { player: 0 }));
        assert_eq!(engine.failure(), Some(GameError::ActorPanicked { player: 1 }));
        assert_eq!(engine.winner(), None);
        assert_eq!(engine.run_cycle(0), Ok(Turn::GameOver));
    }
}
