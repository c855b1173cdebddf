//! Environment variable source

use std::collections::HashMap;

use tracing::debug;

use super::{non_empty, ProbeKind, SourceProbe};

/// Variable consulted when no other name is configured
pub const DEFAULT_ENV_VAR: &str = "RPM_PACKAGER";

/// Read-only view of a process environment
pub trait Environment {
    fn var(&self, name: &str) -> Option<String>;
}

/// The environment of the running process
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        // Non-Unicode values cannot be an identity string
        std::env::var_os(name).and_then(|v| v.into_string().ok())
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Returns the value of one variable, verbatim
pub struct EnvProbe<E> {
    env: E,
    name: String,
}

impl<E: Environment> EnvProbe<E> {
    pub fn new(env: E, name: impl Into<String>) -> Self {
        Self {
            env,
            name: name.into(),
        }
    }

    pub fn variable(&self) -> &str {
        &self.name
    }
}

impl<E: Environment> SourceProbe for EnvProbe<E> {
    fn kind(&self) -> ProbeKind {
        ProbeKind::Environment
    }

    fn query(&self) -> Option<String> {
        let value = non_empty(self.env.var(&self.name));
        debug!(source = "env", variable = %self.name, found = value.is_some(), "queried environment");
        value
    }
}
