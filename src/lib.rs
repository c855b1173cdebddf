//! guess-packager - Work out who to credit for an RPM changelog entry
//!
//! The packager is taken from the first source that has one, in this
//! order: `$RPM_PACKAGER`, the `%packager` rpm macro, the git
//! `user.name`/`user.email` of the working directory, and finally the
//! GECOS field of the current user. When none of them has a value the
//! result is an empty string.
//!
//! ```no_run
//! let packager = guess_packager::guess_packager();
//! if packager.is_empty() {
//!     eprintln!("packager unknown");
//! }
//! ```

pub mod cli;
pub mod config;
pub mod resolver;
pub mod sources;

pub use config::{ConfigError, ResolverConfig, SourcesConfig};
pub use resolver::{guess_packager, PackagerResolver, ProbeReport, Resolution};
pub use sources::{ProbeKind, SourceProbe};
