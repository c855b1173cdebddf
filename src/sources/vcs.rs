//! Version-control identity source
//!
//! Reads `user.name` and `user.email` the way a commit would see them.
//! Which config file a value comes from (repository, global, system) is
//! left entirely to git.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::command::run_query;
use super::{non_empty, ProbeKind, SourceProbe};

pub const NAME_KEY: &str = "user.name";
pub const EMAIL_KEY: &str = "user.email";

/// Read access to version-control configuration
pub trait VcsConfig {
    /// Effective value of `key`, or `None` when it is unset or unreadable
    fn value(&self, key: &str) -> Option<String>;
}

/// Queries `git config --get` in a working directory
#[derive(Debug, Clone)]
pub struct GitConfig {
    program: String,
    dir: Option<PathBuf>,
}

impl GitConfig {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            dir: None,
        }
    }

    /// Runs git in `dir` instead of the current directory
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }
}

impl Default for GitConfig {
    fn default() -> Self {
        Self::new("git")
    }
}

impl VcsConfig for GitConfig {
    fn value(&self, key: &str) -> Option<String> {
        match run_query(&self.program, &["config", "--get", key], self.dir()) {
            Ok(value) => value,
            // git config exits 1 when the key is not set
            Err(e) if e.exit_code() == Some(1) => {
                debug!(source = "vcs", key, "git config key not set");
                None
            }
            Err(e) => {
                debug!(source = "vcs", key, error = %e, "git config failed");
                None
            }
        }
    }
}

impl VcsConfig for HashMap<String, String> {
    fn value(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Combines the configured author name and email
///
/// Yields `"name <email>"`, or just the name when no email is set. With no
/// name the probe is empty even if an email is configured, and the email
/// is not queried at all.
pub struct VcsProbe<V> {
    config: V,
}

impl<V: VcsConfig> VcsProbe<V> {
    pub fn new(config: V) -> Self {
        Self { config }
    }
}

impl<V: VcsConfig> SourceProbe for VcsProbe<V> {
    fn kind(&self) -> ProbeKind {
        ProbeKind::VersionControl
    }

    fn query(&self) -> Option<String> {
        let Some(name) = non_empty(self.config.value(NAME_KEY)) else {
            debug!(source = "vcs", "no user.name configured");
            return None;
        };

        let identity = match non_empty(self.config.value(EMAIL_KEY)) {
            Some(email) => format!("{} <{}>", name, email),
            None => name,
        };

        debug!(source = "vcs", identity = %identity, "found version-control identity");
        Some(identity)
    }
}
