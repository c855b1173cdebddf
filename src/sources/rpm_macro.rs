//! RPM macro source
//!
//! rpm has no "is this macro defined" query on the command line. Expanding
//! an undefined macro returns the reference unchanged, so `%packager`
//! expanding to the literal text `%packager` is how an unset macro is
//! recognised. Any other output is a real value, even if it happens to
//! contain a `%`.

use std::collections::HashMap;

use tracing::debug;

use super::command::run_query;
use super::{non_empty, ProbeKind, SourceProbe};

/// Macro consulted when no other name is configured
pub const DEFAULT_MACRO: &str = "packager";

/// Something that can expand macro expressions the way rpm does
pub trait MacroEngine {
    /// Expands `expr`. Undefined macros are left as written.
    fn expand(&self, expr: &str) -> String;
}

/// Expands macros by running `rpm --eval`
#[derive(Debug, Clone)]
pub struct RpmEval {
    program: String,
}

impl RpmEval {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for RpmEval {
    fn default() -> Self {
        Self::new("rpm")
    }
}

impl MacroEngine for RpmEval {
    fn expand(&self, expr: &str) -> String {
        match run_query(&self.program, &["--eval", expr], None) {
            Ok(out) => out.unwrap_or_default(),
            Err(e) => {
                // Without rpm nothing is defined
                debug!(source = "macro", error = %e, "rpm --eval failed");
                expr.to_string()
            }
        }
    }
}

/// In-memory macro definitions with rpm's expansion semantics for plain
/// `%name` and `%{name}` references
#[derive(Debug, Clone, Default)]
pub struct MacroTable {
    macros: HashMap<String, String>,
}

impl MacroTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: impl Into<String>, body: impl Into<String>) {
        self.macros.insert(name.into(), body.into());
    }

    pub fn undefine(&mut self, name: &str) {
        self.macros.remove(name);
    }

    pub fn with(mut self, name: impl Into<String>, body: impl Into<String>) -> Self {
        self.define(name, body);
        self
    }
}

impl MacroEngine for MacroTable {
    fn expand(&self, expr: &str) -> String {
        let name = expr
            .strip_prefix("%{")
            .and_then(|rest| rest.strip_suffix('}'))
            .or_else(|| expr.strip_prefix('%'));

        match name.and_then(|n| self.macros.get(n)) {
            Some(body) => body.clone(),
            None => expr.to_string(),
        }
    }
}

/// Returns the expansion of one macro, or nothing if it is undefined
pub struct MacroProbe<M> {
    engine: M,
    reference: String,
}

impl<M: MacroEngine> MacroProbe<M> {
    pub fn new(engine: M, macro_name: &str) -> Self {
        Self {
            engine,
            reference: format!("%{}", macro_name),
        }
    }

    /// The literal reference that is expanded, e.g. `%packager`
    pub fn reference(&self) -> &str {
        &self.reference
    }
}

impl<M: MacroEngine> SourceProbe for MacroProbe<M> {
    fn kind(&self) -> ProbeKind {
        ProbeKind::Macro
    }

    fn query(&self) -> Option<String> {
        let expanded = self.engine.expand(&self.reference);

        if expanded == self.reference {
            debug!(source = "macro", reference = %self.reference, "macro is not defined");
            return None;
        }

        let value = non_empty(Some(expanded));
        debug!(source = "macro", reference = %self.reference, found = value.is_some(), "expanded macro");
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_leaves_undefined_reference_alone() {
        let table = MacroTable::new();
        assert_eq!(table.expand("%packager"), "%packager");
        assert_eq!(table.expand("%{packager}"), "%{packager}");
    }

    #[test]
    fn table_expands_both_reference_forms() {
        let table = MacroTable::new().with("packager", "Patricia Packager");
        assert_eq!(table.expand("%packager"), "Patricia Packager");
        assert_eq!(table.expand("%{packager}"), "Patricia Packager");
    }

    #[test]
    fn undefine_restores_marker() {
        let mut table = MacroTable::new().with("packager", "Patricia Packager");
        table.undefine("packager");
        assert_eq!(table.expand("%packager"), "%packager");
    }

    #[test]
    fn probe_returns_expansion() {
        let probe = MacroProbe::new(
            MacroTable::new().with("packager", "Patricia Packager"),
            DEFAULT_MACRO,
        );
        assert_eq!(probe.reference(), "%packager");
        assert_eq!(probe.query().as_deref(), Some("Patricia Packager"));
    }

    #[test]
    fn probe_treats_unexpanded_marker_as_unset() {
        let probe = MacroProbe::new(MacroTable::new(), DEFAULT_MACRO);
        assert_eq!(probe.query(), None);
    }

    #[test]
    fn probe_treats_empty_expansion_as_unset() {
        let probe = MacroProbe::new(MacroTable::new().with("packager", ""), DEFAULT_MACRO);
        assert_eq!(probe.query(), None);
    }

    #[test]
    fn probe_keeps_values_that_merely_contain_percent() {
        let probe = MacroProbe::new(
            MacroTable::new().with("packager", "100% Packager"),
            DEFAULT_MACRO,
        );
        assert_eq!(probe.query().as_deref(), Some("100% Packager"));
    }

    #[test]
    fn probe_uses_configured_macro_name() {
        let table = MacroTable::new()
            .with("packager", "default")
            .with("vendor_packager", "Vendor Build Team");
        let probe = MacroProbe::new(table, "vendor_packager");
        assert_eq!(probe.query().as_deref(), Some("Vendor Build Team"));
    }

    #[test]
    fn missing_rpm_binary_means_undefined() {
        let rpm = RpmEval::new("guess-packager-no-such-rpm");
        assert_eq!(rpm.expand("%packager"), "%packager");
        assert_eq!(MacroProbe::new(rpm, DEFAULT_MACRO).query(), None);
    }

    #[cfg(unix)]
    #[test]
    fn rpm_eval_output_is_used() {
        // Stand-in for an rpm with %packager defined
        let dir = tempfile::TempDir::new().unwrap();
        let script = dir.path().join("fake-rpm");
        std::fs::write(&script, "#!/bin/sh\necho 'Patricia Packager'\n").unwrap();
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let rpm = RpmEval::new(script.to_string_lossy());
        let probe = MacroProbe::new(rpm, DEFAULT_MACRO);
        assert_eq!(probe.query().as_deref(), Some("Patricia Packager"));
    }
}
