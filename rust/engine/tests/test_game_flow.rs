use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use fourfold_engine::cards::{pack_from_values, Card};
use fourfold_engine::deck::Deck;
use fourfold_engine::engine::{Engine, Turn};
use fourfold_engine::errors::GameError;
use fourfold_engine::game::GameState;
use fourfold_engine::logger::{EventSink, GameEvent, MemorySink, NullSink};
use fourfold_engine::player::Player;

/// Builds a table directly, bypassing the dealer, so decks can start empty.
fn table(hands: &[&[u32]], decks: &[&[u32]], seed: u64) -> GameState {
    let n = hands.len();
    let players = hands
        .iter()
        .enumerate()
        .map(|(id, values)| {
            let mut p = Player::new(id, n, seed);
            for &v in *values {
                p.give_card(Card::new(v));
            }
            p
        })
        .collect();
    let decks = decks
        .iter()
        .enumerate()
        .map(|(id, values)| {
            let mut d = Deck::new(id);
            for &v in *values {
                d.discard(Card::new(v));
            }
            d
        })
        .collect();
    GameState::new(players, decks).unwrap()
}

#[test]
fn one_turn_each_keeps_sixteen_cards_and_full_hands() {
    // seat 0: 1 3 5 7, seat 1: 2 4 6 8; no four of a kind anywhere
    let pack = pack_from_values([1, 2, 3, 4, 5, 6, 7, 8, 1, 2, 3, 4, 5, 6, 7, 8]);
    let engine = Engine::new(2, &pack, 2024).unwrap();
    assert_eq!(engine.check_winners(), None);

    assert!(matches!(engine.run_cycle(0), Ok(Turn::Played { .. })));
    assert!(matches!(engine.run_cycle(1), Ok(Turn::Played { .. })));

    let snap = engine.snapshot();
    assert_eq!(snap.total_cards(), 16);
    assert_eq!(snap.hands[0].len(), 4);
    assert_eq!(snap.hands[1].len(), 4);
    assert!(!snap.is_over);
}

#[test]
fn same_seed_replays_the_same_turns() {
    let pack = pack_from_values(1..=24);
    let a = Engine::new(3, &pack, 99).unwrap();
    let b = Engine::new(3, &pack, 99).unwrap();
    for seat in [0, 1, 2, 0, 1, 2, 2, 1] {
        assert_eq!(a.run_cycle(seat), b.run_cycle(seat));
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn completing_four_of_a_kind_wins_on_that_turn() {
    // seat 0 holds 1 1 1 9 and prefers 1s, deck 0 starts with a 1
    let pack = pack_from_values([1, 2, 1, 3, 1, 4, 9, 5, 1, 6, 7, 8, 10, 11, 12, 13]);
    let sink = Arc::new(MemorySink::new());
    let engine = Engine::with_sink(2, &pack, 0, sink.clone()).unwrap();
    assert_eq!(engine.check_winners(), None);

    assert_eq!(
        engine.run_cycle(0),
        Ok(Turn::Played {
            drew: Card::new(1),
            discarded: Card::new(9),
            won: true
        })
    );
    assert_eq!(engine.winner(), Some(0));
    assert_eq!(engine.run_cycle(1), Ok(Turn::GameOver));

    let tail: Vec<_> = sink.events().into_iter().skip(2).collect();
    assert_eq!(tail.len(), 4);
    assert!(matches!(tail[0], GameEvent::Draw { player: 0, .. }));
    assert!(matches!(tail[1], GameEvent::Discard { player: 0, deck: 1, .. }));
    assert_eq!(tail[2], GameEvent::Win { player: 0 });
    match &tail[3] {
        GameEvent::GameOver { winner, hands, decks } => {
            assert_eq!(*winner, Some(0));
            assert_eq!(hands[0], vec![Card::new(1); 4]);
            assert_eq!(decks[1].last(), Some(&Card::new(9)));
        }
        other => panic!("expected game over, got {:?}", other),
    }
}

#[test]
fn empty_deck_blocks_until_a_neighbour_discards_into_it() {
    let state = table(&[&[5, 6, 7, 8], &[10, 20, 30, 40]], &[&[9], &[]], 11);
    let engine = Engine::from_state(state, Arc::new(NullSink));

    thread::scope(|s| {
        let (tx, rx) = mpsc::channel();
        let engine = &engine;
        s.spawn(move || {
            tx.send(engine.run_cycle(1)).unwrap();
        });

        assert!(
            rx.recv_timeout(Duration::from_millis(200)).is_err(),
            "seat 1 must wait while deck 1 is empty"
        );
        assert_eq!(engine.total_cards(), 9);

        let Ok(Turn::Played { discarded, .. }) = engine.run_cycle(0) else {
            panic!("seat 0 should have played");
        };
        let woke = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("seat 1 should wake after the discard");
        match woke {
            Ok(Turn::Played { drew, .. }) => assert_eq!(drew, discarded),
            other => panic!("unexpected result {:?}", other),
        }
    });

    assert_eq!(engine.total_cards(), 9);
    assert!(engine.snapshot().hands.iter().all(|h| h.len() == 4));
}

#[test]
fn abort_releases_players_waiting_on_an_empty_deck() {
    let state = table(&[&[1, 2, 3, 4], &[10, 20, 30, 40]], &[&[1], &[]], 0);
    let sink = Arc::new(MemorySink::new());
    let engine = Engine::from_state(state, sink.clone());

    thread::scope(|s| {
        let (tx, rx) = mpsc::channel();
        let engine = &engine;
        s.spawn(move || {
            tx.send(engine.run_cycle(1)).unwrap();
        });
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());

        assert!(engine.abort(GameError::ActorPanicked { player: 0 }));
        let woke = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("seat 1 should wake when the game is aborted");
        assert_eq!(woke, Ok(Turn::GameOver));
    });

    assert!(engine.is_over());
    assert_eq!(engine.winner(), None);
    assert_eq!(
        engine.failure(),
        Some(GameError::ActorPanicked { player: 0 })
    );
    assert!(matches!(
        sink.events().last(),
        Some(GameEvent::GameOver { winner: None, .. })
    ));
    assert_eq!(engine.run_cycle(0), Ok(Turn::GameOver));
    assert_eq!(engine.total_cards(), 9);
}

/// Panics when asked to record the end of the game.
struct FailsOnGameOver;

impl EventSink for FailsOnGameOver {
    fn record(&self, event: &GameEvent) {
        if matches!(event, GameEvent::GameOver { .. }) {
            panic!("sink failure at game over");
        }
    }
}

#[test]
fn sink_panic_at_game_over_still_wakes_waiting_players() {
    // seat 0 completes 1 1 1 1 on its turn; seat 1 waits on an empty deck
    let state = table(&[&[1, 1, 1, 9], &[10, 20, 30, 40]], &[&[1], &[]], 0);
    let engine = Engine::from_state(state, Arc::new(FailsOnGameOver));

    thread::scope(|s| {
        let (tx, rx) = mpsc::channel();
        let engine = &engine;
        s.spawn(move || {
            tx.send(engine.run_cycle(1)).unwrap();
        });
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());

        let winner = s.spawn(move || engine.run_cycle(0));
        assert!(winner.join().is_err(), "the sink panic should unwind seat 0");

        let woke = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("seat 1 should wake even though the sink panicked");
        assert_eq!(woke, Ok(Turn::GameOver));
        // the driver's drop guard calls abort on an already finished game
        assert!(!engine.abort(GameError::ActorPanicked { player: 0 }));
    });

    assert!(engine.is_over());
    assert_eq!(engine.winner(), Some(0));
}
