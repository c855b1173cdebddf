//! # Identity Sources
//!
//! Each place a packager identity can come from is wrapped twice:
//!
//! - a collaborator trait describing the external system
//!   ([`Environment`], [`MacroEngine`], [`VcsConfig`], [`AccountDirectory`]),
//!   with a production implementation and an in-memory fake;
//! - a [`SourceProbe`] that applies the retrieval rules for that source and
//!   turns every failure into `None`.
//!
//! | Probe | Source | Production backend |
//! |-------|--------|--------------------|
//! | [`EnvProbe`] | `$RPM_PACKAGER` | [`ProcessEnv`] |
//! | [`MacroProbe`] | `%packager` | [`RpmEval`] (`rpm --eval`) |
//! | [`VcsProbe`] | `user.name` / `user.email` | [`GitConfig`] (`git config --get`) |
//! | [`AccountProbe`] | GECOS field | [`SystemAccounts`] |

mod account;
mod command;
mod env;
mod rpm_macro;
mod vcs;

use std::fmt;

use serde::Serialize;

pub use account::{AccountDirectory, AccountProbe, SystemAccounts};
pub use command::{run_query, CommandError};
pub use env::{EnvProbe, Environment, ProcessEnv, DEFAULT_ENV_VAR};
pub use rpm_macro::{MacroEngine, MacroProbe, MacroTable, RpmEval, DEFAULT_MACRO};
pub use vcs::{GitConfig, VcsConfig, VcsProbe, EMAIL_KEY, NAME_KEY};

/// Identifies which source a probe reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeKind {
    #[serde(rename = "env")]
    Environment,
    Macro,
    #[serde(rename = "vcs")]
    VersionControl,
    Account,
}

impl ProbeKind {
    /// All kinds, highest precedence first
    pub const PRECEDENCE: [ProbeKind; 4] = [
        ProbeKind::Environment,
        ProbeKind::Macro,
        ProbeKind::VersionControl,
        ProbeKind::Account,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeKind::Environment => "env",
            ProbeKind::Macro => "macro",
            ProbeKind::VersionControl => "vcs",
            ProbeKind::Account => "account",
        }
    }
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single best-effort query against one identity source
///
/// Implementations must not panic or leak errors: anything that prevents
/// an answer is reported as `None`. A returned `Some` is never empty.
pub trait SourceProbe {
    fn kind(&self) -> ProbeKind;

    fn query(&self) -> Option<String>;
}

impl<P: SourceProbe + ?Sized> SourceProbe for Box<P> {
    fn kind(&self) -> ProbeKind {
        (**self).kind()
    }

    fn query(&self) -> Option<String> {
        (**self).query()
    }
}

/// Drops empty strings so `Some("")` never escapes a probe
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_order_is_fixed() {
        let names: Vec<_> = ProbeKind::PRECEDENCE.iter().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["env", "macro", "vcs", "account"]);
    }

    #[test]
    fn kind_serializes_to_short_name() {
        for kind in ProbeKind::PRECEDENCE {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn non_empty_filters_blank() {
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(" ".into())), Some(" ".into()));
    }
}
