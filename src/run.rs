//! Application execution logic.
//!
//! Runs one interface query with the validated configuration and writes
//! the rendered result to stdout.

use std::io::{self, Write};

use thiserror::Error;

use lanaddr::config::ValidatedConfig;
use lanaddr::network::{InterfaceQuery, InterfaceSource};
use lanaddr::output;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to serialize the result.
    #[error("Failed to render output: {0}")]
    Render(#[source] serde_json::Error),

    /// Failed to write the result.
    #[error("Failed to write output: {0}")]
    Write(#[source] io::Error),
}

/// What a completed query produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// At least one address was printed.
    Found(usize),
    /// No address matched (or enumeration failed and was logged).
    NotFound,
}

/// Queries the platform interfaces and prints the matches to stdout.
///
/// # Errors
///
/// Returns an error if the result cannot be rendered or written.
///
/// # Coverage Note
///
/// Excluded from coverage because it depends on the host's interfaces.
#[cfg(not(tarpaulin_include))]
pub fn execute(config: &ValidatedConfig) -> Result<Outcome, RunError> {
    let query = InterfaceQuery::platform();
    let stdout = io::stdout();
    execute_with(&query, config, &mut stdout.lock())
}

/// Runs the configured query against `query` and writes to `out`.
///
/// Nothing is written when no address matches, regardless of format.
fn execute_with<S, W>(
    query: &InterfaceQuery<S>,
    config: &ValidatedConfig,
    out: &mut W,
) -> Result<Outcome, RunError>
where
    S: InterfaceSource,
    W: Write,
{
    let found = query.select(&config.criteria, config.mode, &config.filter);

    if found.is_empty() {
        tracing::debug!("No interface address matched policy {}", config.criteria);
        return Ok(Outcome::NotFound);
    }

    let mut rendered = output::render(&found, config.format).map_err(RunError::Render)?;
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    out.write_all(rendered.as_bytes())
        .and_then(|()| out.flush())
        .map_err(RunError::Write)?;

    tracing::debug!("Printed {} address(es)", found.len());
    Ok(Outcome::Found(found.len()))
}
