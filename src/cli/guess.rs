//! Identity commands

use anyhow::{bail, Result};
use serde::Serialize;

use super::output::Output;
use crate::config::SourcesConfig;
use crate::resolver::PackagerResolver;
use crate::sources::ProbeKind;

#[derive(Serialize)]
struct GuessOutput {
    packager: String,
    source: Option<ProbeKind>,
}

/// Prints the resolved packager
///
/// An undetermined packager prints nothing in text mode, and is an error
/// only when `require` is set.
pub fn guess(
    resolver: &PackagerResolver,
    sources: &SourcesConfig,
    output: &Output,
    require: bool,
) -> Result<()> {
    let resolution = resolver.resolve_with_source();

    match &resolution {
        Some(r) => output.verbose_ctx("guess", &format!("Resolved from {}", r.source)),
        None => output.verbose_ctx("guess", "No source yielded a packager"),
    }

    if require && resolution.is_none() {
        bail!(
            "Could not determine the packager; set ${} or the %{} macro",
            sources.env_var,
            sources.macro_name
        );
    }

    if output.is_json() {
        output.data(&GuessOutput {
            source: resolution.as_ref().map(|r| r.source),
            packager: resolution.map(|r| r.identity).unwrap_or_default(),
        });
    } else if let Some(r) = resolution {
        output.line(&r.identity);
    }

    Ok(())
}

/// Prints every source's answer, marking the one that wins
pub fn sources(resolver: &PackagerResolver, output: &Output) -> Result<()> {
    let report = resolver.explain();

    if output.is_json() {
        output.data(&report);
        return Ok(());
    }

    for entry in &report {
        let marker = if entry.selected { "*" } else { " " };
        let value = entry.value.as_deref().unwrap_or("(unset)");
        output.row(&[marker, entry.source.as_str(), value]);
    }

    Ok(())
}
