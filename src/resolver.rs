//! Packager resolution
//!
//! [`PackagerResolver`] asks its four probes in a fixed order and returns
//! the first answer. The order is encoded in the struct fields and cannot
//! be changed by callers:
//!
//! 1. environment (`$RPM_PACKAGER`)
//! 2. rpm macro (`%packager`)
//! 3. version control (`user.name` / `user.email`)
//! 4. system account (GECOS)
//!
//! "No packager known" is the empty string, not an error.

use serde::Serialize;
use tracing::debug;

use crate::config::ResolverConfig;
use crate::sources::{
    AccountProbe, EnvProbe, GitConfig, MacroProbe, ProbeKind, ProcessEnv, RpmEval, SourceProbe,
    SystemAccounts, VcsProbe,
};

/// The identity that won and the source it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub source: ProbeKind,
    pub identity: String,
}

/// Outcome of a single probe during [`PackagerResolver::explain`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    pub source: ProbeKind,
    pub value: Option<String>,
    pub selected: bool,
}

/// Resolves the packager identity from the configured sources
pub struct PackagerResolver {
    env: Box<dyn SourceProbe>,
    macros: Box<dyn SourceProbe>,
    vcs: Box<dyn SourceProbe>,
    account: Box<dyn SourceProbe>,
}

impl PackagerResolver {
    /// Builds a resolver from explicit probes
    ///
    /// Arguments are taken in precedence order, highest first.
    pub fn new(
        env: impl SourceProbe + 'static,
        macros: impl SourceProbe + 'static,
        vcs: impl SourceProbe + 'static,
        account: impl SourceProbe + 'static,
    ) -> Self {
        Self {
            env: Box::new(env),
            macros: Box::new(macros),
            vcs: Box::new(vcs),
            account: Box::new(account),
        }
    }

    /// Builds a resolver backed by the real environment, rpm, git and the
    /// passwd database
    pub fn from_config(config: &ResolverConfig) -> Self {
        let sources = &config.sources;

        let mut git = GitConfig::new(&sources.git_command);
        if let Some(dir) = &config.vcs_dir {
            git = git.in_dir(dir);
        }

        Self::new(
            EnvProbe::new(ProcessEnv, &sources.env_var),
            MacroProbe::new(RpmEval::new(&sources.rpm_command), &sources.macro_name),
            VcsProbe::new(git),
            AccountProbe::new(SystemAccounts),
        )
    }

    fn probes(&self) -> [&dyn SourceProbe; 4] {
        [&*self.env, &*self.macros, &*self.vcs, &*self.account]
    }

    /// Returns the first non-empty identity, or `""` if no source has one
    ///
    /// Probes after the first hit are not queried.
    pub fn resolve(&self) -> String {
        self.resolve_with_source()
            .map(|r| r.identity)
            .unwrap_or_default()
    }

    /// Like [`resolve`](Self::resolve), but also reports the winning source
    pub fn resolve_with_source(&self) -> Option<Resolution> {
        for probe in self.probes() {
            if let Some(identity) = probe.query().filter(|v| !v.is_empty()) {
                debug!(source = %probe.kind(), "packager resolved");
                return Some(Resolution {
                    source: probe.kind(),
                    identity,
                });
            }
        }

        debug!("no source yielded a packager");
        None
    }

    /// Queries every probe, in precedence order, without short-circuiting
    ///
    /// The entry that [`resolve`](Self::resolve) would return is marked
    /// `selected`. Intended for diagnostics only.
    pub fn explain(&self) -> Vec<ProbeReport> {
        let mut selected = false;

        self.probes()
            .into_iter()
            .map(|probe| {
                let value = probe.query().filter(|v| !v.is_empty());
                let is_selected = !selected && value.is_some();
                selected |= is_selected;

                ProbeReport {
                    source: probe.kind(),
                    value,
                    selected: is_selected,
                }
            })
            .collect()
    }
}

/// Guesses the packager using the default sources
///
/// This is what changelog tooling calls when building a new entry.
pub fn guess_packager() -> String {
    PackagerResolver::from_config(&ResolverConfig::default()).resolve()
}
