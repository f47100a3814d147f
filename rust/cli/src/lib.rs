//! # Fourfold CLI Library
//!
//! Command-line front end for the fourfold card game engine: pack files,
//! prompting, report files and configuration.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line
//! arguments and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["fourfold", "play", "--players", "4", "--pack", "four.txt"];
//! let code = fourfold_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Play a full game and write the player and deck reports
//! - `deal`: Validate a pack and show the initial deal
//! - `pack`: Generate a valid pack file
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;
pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod report;
pub mod ui;
pub mod validation;

use cli::{Commands, FourfoldCli};
use commands::{
    PlayArgs, handle_cfg_command, handle_deal_command, handle_pack_command, handle_play_command,
};

pub use error::CliError;

/// Main entry point for the CLI application.
///
/// # Arguments
///
/// * `args` - Iterator over command-line arguments (typically `std::env::args()`)
/// * `out` - Output stream for normal output (typically `stdout`)
/// * `err` - Output stream for error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["fourfold", "cfg"];
/// let code = fourfold_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &["play", "deal", "pack", "cfg"];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match FourfoldCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    if writeln!(err, "{}", e).is_err()
                        || writeln!(err).is_err()
                        || writeln!(err, "Usage: fourfold <command> [options]\n").is_err()
                        || writeln!(err, "Commands:").is_err()
                    {
                        return exit_code::ERROR;
                    }
                    for c in COMMANDS {
                        if writeln!(err, "  {}", c).is_err() {
                            return exit_code::ERROR;
                        }
                    }
                    let _ = writeln!(err, "\nFor full help, run: fourfold --help");
                    exit_code::ERROR
                }
            };
        }
    };

    let result = match cli.cmd {
        Commands::Play {
            players,
            pack,
            seed,
            output,
            events,
        } => {
            // Use stdin for real input (supports both TTY and piped stdin)
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            let args = PlayArgs {
                players: players.map(|n| n as usize),
                pack,
                seed,
                output,
                events,
            };
            handle_play_command(args, out, err, &mut stdin_lock)
        }
        Commands::Deal { players, pack } => handle_deal_command(players as usize, &pack, out),
        Commands::Pack {
            players,
            seed,
            output,
        } => handle_pack_command(players as usize, seed, output.as_deref(), out),
        // reports its own error
        Commands::Cfg => {
            return match handle_cfg_command(out, err) {
                Ok(()) => exit_code::SUCCESS,
                Err(_) => exit_code::ERROR,
            };
        }
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}
