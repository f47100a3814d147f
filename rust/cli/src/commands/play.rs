//! # Play Command
//!
//! Runs a complete game with one thread per player.
//!
//! Missing settings are taken from the configuration and, for the player
//! count and the pack, asked for on stdin until a usable answer is given.
//! The game writes `player<n>_output.txt` and `deck<n>_output.txt` into the
//! output directory and, optionally, a JSONL event log.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fourfold_engine::cards::Card;
use fourfold_engine::driver;
use fourfold_engine::engine::Engine;
use fourfold_engine::logger::{EventLogger, EventSink, FanoutSink, TracingSink};

use crate::config;
use crate::error::CliError;
use crate::io_utils::{prepare_report_dir, read_stdin_line};
use crate::report::ReportWriter;
use crate::ui;
use crate::validation::{load_pack, parse_player_count};

/// Flags given to `fourfold play`.
#[derive(Debug, Clone, Default)]
pub struct PlayArgs {
    pub players: Option<usize>,
    pub pack: Option<PathBuf>,
    pub seed: Option<u64>,
    pub output: Option<PathBuf>,
    pub events: Option<PathBuf>,
}

/// Handle the play command.
///
/// Flags take precedence over configured values. A pack given as a flag must
/// be valid; a pack typed at the prompt is asked for again when it is not.
///
/// # Errors
///
/// * `CliError::InvalidInput` if stdin ends before a player count or pack
///   was given
/// * `CliError::Pack` if the `--pack` file cannot be used
/// * `CliError::Io` if a report file cannot be written
/// * `CliError::Engine` if the game ended with an error
pub fn handle_play_command(
    args: PlayArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let cfg = config::load_with_sources()?.config;

    let players = match args.players.or(cfg.players) {
        Some(n) => n,
        None => ask_player_count(out, err, stdin)?,
    };
    let pack = match args.pack {
        Some(path) => load_pack(&path, players)?,
        None => ask_pack(players, out, err, stdin)?,
    };
    let seed = args.seed.or(cfg.seed).unwrap_or_else(rand::random);
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(&cfg.output_dir));
    let events = args.events.or_else(|| cfg.events.map(PathBuf::from));

    tracing::info!(players, seed, output = %output.display(), "starting game");
    let winner = play_game(players, &pack, seed, &output, events.as_deref())?;
    match winner {
        Some(w) => writeln!(out, "player {} wins", w + 1)?,
        None => writeln!(out, "no winner")?,
    }
    Ok(())
}

/// Plays one game and writes its reports. Returns the zero-based winner.
fn play_game(
    players: usize,
    pack: &[Card],
    seed: u64,
    output: &Path,
    events: Option<&Path>,
) -> Result<Option<usize>, CliError> {
    let removed =
        prepare_report_dir(output).map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    if removed > 0 {
        tracing::debug!(removed, "cleared old reports");
    }

    let reports = Arc::new(ReportWriter::create(output, players)?);
    let logger = events.map(EventLogger::create).transpose()?.map(Arc::new);

    let mut fanout = FanoutSink::new()
        .with(reports.clone())
        .with(Arc::new(TracingSink));
    if let Some(logger) = &logger {
        fanout = fanout.with(logger.clone());
    }
    let sink: Arc<dyn EventSink> = Arc::new(fanout);

    let engine = Engine::with_sink(players, pack, seed, sink)?;
    let result = driver::play(&engine, seed);

    reports.finish()?;
    if let Some(logger) = &logger {
        logger.finish()?;
    }

    let outcome = result?;
    tracing::debug!(turns = ?outcome.turns, "game finished");
    Ok(outcome.winner)
}

fn ask_player_count(
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<usize, CliError> {
    loop {
        ui::prompt(out, "Please enter the number of players:")?;
        let Some(line) = read_stdin_line(stdin) else {
            return Err(CliError::InvalidInput(
                "no player count given before end of input".into(),
            ));
        };
        match parse_player_count(&line) {
            Ok(n) => return Ok(n),
            Err(msg) => ui::display_warning(err, &msg)?,
        }
    }
}

fn ask_pack(
    players: usize,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<Vec<Card>, CliError> {
    loop {
        ui::prompt(out, "Please enter location of pack to load:")?;
        let Some(line) = read_stdin_line(stdin) else {
            return Err(CliError::InvalidInput(
                "no pack given before end of input".into(),
            ));
        };
        if line.is_empty() {
            ui::display_warning(err, "Empty input")?;
            continue;
        }
        match load_pack(Path::new(&line), players) {
            Ok(pack) => return Ok(pack),
            Err(e) => ui::display_warning(err, &e.to_string())?,
        }
    }
}
