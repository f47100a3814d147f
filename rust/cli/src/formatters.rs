//! Report line formatters.
//!
//! Pure functions turning [`GameEvent`]s into the lines written to the
//! per-player and per-deck report files. Players and decks are numbered from
//! 1 in every line.
//!
//! ## Example
//!
//! ```rust
//! use fourfold_engine::cards::Card;
//! use fourfold_engine::logger::GameEvent;
//! use fourfold_cli::formatters::format_event;
//!
//! let draw = GameEvent::Draw { player: 0, card: Card::new(4), deck: 0 };
//! assert_eq!(
//!     format_event(&draw),
//!     vec![(0, "player 1 draws a 4 from deck 1".to_string())]
//! );
//! ```

use fourfold_engine::cards::{join_values, Card};
use fourfold_engine::logger::GameEvent;

/// Lines produced by one event, each tagged with the zero-based player whose
/// report it belongs in. `GameOver` produces the closing lines of every
/// player's report.
pub fn format_event(event: &GameEvent) -> Vec<(usize, String)> {
    match event {
        GameEvent::InitialHand { player, hand } => vec![(
            *player,
            format!("player {} initial hand {}", player + 1, join_values(hand)),
        )],
        GameEvent::Draw { player, card, deck } => vec![(
            *player,
            format!("player {} draws a {} from deck {}", player + 1, card, deck + 1),
        )],
        GameEvent::Discard {
            player,
            card,
            deck,
            hand,
        } => vec![
            (
                *player,
                format!("player {} discards a {} to deck {}", player + 1, card, deck + 1),
            ),
            (
                *player,
                format!("player {} current hand is {}", player + 1, join_values(hand)),
            ),
        ],
        // announced to everyone from GameOver
        GameEvent::Win { .. } => Vec::new(),
        GameEvent::GameOver { winner, hands, .. } => hands
            .iter()
            .enumerate()
            .flat_map(|(player, hand)| {
                closing_lines(player, *winner, hand)
                    .into_iter()
                    .map(move |line| (player, line))
            })
            .collect(),
    }
}

fn closing_lines(player: usize, winner: Option<usize>, hand: &[Card]) -> Vec<String> {
    let n = player + 1;
    let mut lines = Vec::with_capacity(3);
    match winner {
        Some(w) if w == player => lines.push(format!("player {} wins", n)),
        Some(w) => lines.push(format!(
            "player {} has informed player {} that player {} has won",
            w + 1,
            n,
            w + 1
        )),
        None => {}
    }
    lines.push(format!("player {} exits", n));
    lines.push(format!("player {} final hand: {}", n, join_values(hand)));
    lines
}

/// The single line of a deck report.
pub fn format_deck(deck: usize, cards: &[Card]) -> String {
    format!("deck {} contents: {}", deck + 1, join_values(cards))
}
