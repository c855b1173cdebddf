//! Config commands

use std::path::Path;

use anyhow::{anyhow, Result};
use clap::Subcommand;

use super::output::Output;
use crate::config::ResolverConfig;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the path of the configuration file in use
    Path,

    /// Print the effective configuration
    Show,
}

pub fn run(cmd: ConfigCommands, explicit: Option<&Path>, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Path => {
            let path = match explicit {
                Some(p) => p.to_path_buf(),
                None => ResolverConfig::default_path()
                    .ok_or_else(|| anyhow!("Could not determine config directory"))?,
            };

            if output.is_json() {
                output.data(&serde_json::json!({
                    "path": path.display().to_string(),
                    "exists": path.exists(),
                }));
            } else {
                output.line(&path.display().to_string());
            }
        }

        ConfigCommands::Show => {
            let config = match explicit {
                Some(p) => ResolverConfig::load_from(p)?,
                None => ResolverConfig::load()?,
            };

            if output.is_json() {
                output.data(&config);
            } else {
                output.line(config.to_toml()?.trim_end());
            }
        }
    }

    Ok(())
}
