//! # Command-Line Interface
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `guess` (default) | Print the packager identity |
//! | `sources` | Show what every source reports and which one wins |
//! | `config path`, `config show` | Inspect configuration |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr, including a trace
//! of every source that was queried:
//! ```bash
//! guess-packager --verbose
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod config_cmd;
mod guess;
mod output;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
