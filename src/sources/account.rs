//! System account database source

use tracing::debug;

use super::{non_empty, ProbeKind, SourceProbe};

/// Lookup of the current user's display name
pub trait AccountDirectory {
    fn display_name(&self) -> Option<String>;
}

/// The passwd database of the host, keyed by effective uid
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemAccounts;

#[cfg(unix)]
impl AccountDirectory for SystemAccounts {
    fn display_name(&self) -> Option<String> {
        use nix::unistd::{Uid, User};

        let uid = Uid::effective();
        match User::from_uid(uid) {
            Ok(Some(user)) => match user.gecos.into_string() {
                Ok(gecos) => Some(gecos),
                Err(_) => {
                    debug!(source = "account", %uid, "GECOS field is not valid UTF-8");
                    None
                }
            },
            Ok(None) => {
                debug!(source = "account", %uid, "no passwd entry for uid");
                None
            }
            Err(e) => {
                debug!(source = "account", %uid, error = %e, "passwd lookup failed");
                None
            }
        }
    }
}

#[cfg(not(unix))]
impl AccountDirectory for SystemAccounts {
    fn display_name(&self) -> Option<String> {
        None
    }
}

/// A fixed answer, for tests and for callers that already know the name
impl AccountDirectory for Option<String> {
    fn display_name(&self) -> Option<String> {
        self.clone()
    }
}

/// Returns the free-form GECOS field verbatim
///
/// Sub-fields such as room or phone number are not split off.
pub struct AccountProbe<A> {
    directory: A,
}

impl<A: AccountDirectory> AccountProbe<A> {
    pub fn new(directory: A) -> Self {
        Self { directory }
    }
}

impl AccountProbe<SystemAccounts> {
    pub fn system() -> Self {
        Self::new(SystemAccounts)
    }
}

impl<A: AccountDirectory> SourceProbe for AccountProbe<A> {
    fn kind(&self) -> ProbeKind {
        ProbeKind::Account
    }

    fn query(&self) -> Option<String> {
        let value = non_empty(self.directory.display_name());
        debug!(source = "account", found = value.is_some(), "queried account directory");
        value
    }
}
