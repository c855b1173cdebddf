//! Main CLI application structure

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use super::output::{Output, OutputFormat};
use super::{config_cmd, guess};
use crate::config::ResolverConfig;
use crate::resolver::PackagerResolver;

#[derive(Parser)]
#[command(name = "guess-packager")]
#[command(author, version, about = "Guess the packager identity for RPM changelog entries")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true, env = "GUESS_PACKAGER_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory to read version-control identity from
    #[arg(short = 'C', long = "repo", global = true, value_name = "DIR")]
    pub repo: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the packager identity (the default command)
    Guess {
        /// Fail if no source yields a packager
        #[arg(long)]
        require: bool,
    },

    /// Show what every identity source reports
    Sources,

    /// Inspect configuration
    #[command(subcommand)]
    Config(config_cmd::ConfigCommands),
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output = Output::new(cli.format, cli.verbose);
    output.verbose("guess-packager starting");

    match cli.command.unwrap_or(Commands::Guess { require: false }) {
        Commands::Guess { require } => {
            let config = load_config(cli.config.as_deref(), cli.repo, &output)?;
            let resolver = PackagerResolver::from_config(&config);
            guess::guess(&resolver, &config.sources, &output, require)?
        }
        Commands::Sources => {
            let config = load_config(cli.config.as_deref(), cli.repo, &output)?;
            guess::sources(&PackagerResolver::from_config(&config), &output)?
        }
        Commands::Config(cmd) => config_cmd::run(cmd, cli.config.as_deref(), &output)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Loads configuration and applies command-line overrides
fn load_config(
    path: Option<&Path>,
    repo: Option<PathBuf>,
    output: &Output,
) -> Result<ResolverConfig> {
    let mut config = match path {
        Some(path) => {
            output.verbose_ctx("config", &format!("Loading {}", path.display()));
            ResolverConfig::load_from(path)?
        }
        None => {
            output.verbose_ctx("config", "Loading default configuration");
            ResolverConfig::load()?
        }
    };

    if let Some(dir) = repo {
        if !dir.is_dir() {
            bail!("Not a directory: {}", dir.display());
        }
        output.verbose_ctx("config", &format!("Version-control directory: {}", dir.display()));
        config = config.with_vcs_dir(dir);
    }

    Ok(config)
}

/// Sends library diagnostics to stderr
///
/// `RUST_LOG` takes precedence over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "guess_packager=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
