//! Configuration command handler.
//!
//! Prints the resolved configuration with the source of each value
//! (default, configuration file or environment).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "players": {
//!     "value": 4,
//!     "source": "env"
//!   },
//!   "output_dir": {
//!     "value": "output",
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "players": {
            "value": config.players,
            "source": sources.players,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "output_dir": {
            "value": config.output_dir,
            "source": sources.output_dir,
        },
        "events": {
            "value": config.events,
            "source": sources.events,
        },
    });
    let text = serde_json::to_string_pretty(&display)
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    writeln!(out, "{}", text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            config::CONFIG_ENV,
            config::PLAYERS_ENV,
            config::SEED_ENV,
            config::OUTPUT_DIR_ENV,
            config::EVENTS_ENV,
        ] {
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    #[test]
    #[serial]
    fn reports_env_values_and_sources() {
        clear_env();
        unsafe {
            std::env::set_var(config::PLAYERS_ENV, "5");
        }
        let mut out = Vec::new();
        let result = handle_cfg_command(&mut out, &mut Vec::new());
        clear_env();
        result.unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["players"]["value"], 5);
        assert_eq!(json["players"]["source"], "env");
        assert_eq!(json["output_dir"]["value"], "output");
        assert_eq!(json["output_dir"]["source"], "default");
        assert!(json["seed"]["value"].is_null());
    }

    #[test]
    #[serial]
    fn invalid_configuration_is_reported() {
        clear_env();
        unsafe {
            std::env::set_var(config::SEED_ENV, "not-a-number");
        }
        let mut err = Vec::new();
        let result = handle_cfg_command(&mut Vec::new(), &mut err);
        clear_env();
        assert!(matches!(result, Err(CliError::Config(_))));
        assert!(String::from_utf8(err).unwrap().starts_with("Error: Invalid configuration"));
    }
}
