//! Command handler modules for the fourfold CLI.
//!
//! Each command lives in its own module with the same shape:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Module-private helpers specific to that command
//! - Output streams (`&mut dyn Write`) and stdin (`&mut dyn BufRead`) passed in
//! - Errors propagated via the `CliError` enum

pub mod cfg;
pub mod deal;
pub mod pack;
pub mod play;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use pack::handle_pack_command;
pub use play::{PlayArgs, handle_play_command};
