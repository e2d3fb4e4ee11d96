//! `json-cli`: the logic behind the `json-delta` binary.
//!
//! Reads a base document and a delta, merges them, and formats the result as
//! an outline, as the merged tree's JSON view, or as per-kind counts.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use serde_json::Value as Json;
use thiserror::Error;

use crate::delta::Delta;
use crate::merge::{merge, MergeError, MergeOptions};
use crate::merged::{kind_counts, to_json};
use crate::render::{OutlineRenderer, Renderer};
use crate::value::Value;

/// Path that stands for standard input.
pub const STDIN_PATH: &str = "-";

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("{what} is not valid JSON: {source}")]
    Json { what: &'static str, source: serde_json::Error },
    #[error(transparent)]
    Merge(#[from] MergeError),
    #[error("only one input can be read from stdin")]
    StdinTwice,
}

// ── Output ────────────────────────────────────────────────────────────────

/// Output format of the merged tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Indented text, one line per entry.
    #[default]
    Outline,
    /// JSON view of the merged tree.
    Json,
    /// Number of entries per change kind.
    Summary,
}

// ── Commands ──────────────────────────────────────────────────────────────

/// Merge `base` with `delta` (both JSON text) and format the result.
///
/// An empty or `null` delta means the documents are equal.
pub fn run_merge(base: &str, delta: &str, options: &MergeOptions, format: OutputFormat) -> Result<String, CliError> {
    let base: Json = serde_json::from_str(base).map_err(|source| CliError::Json { what: "base", source })?;
    let delta: Option<Json> = if delta.trim().is_empty() {
        None
    } else {
        serde_json::from_str(delta).map_err(|source| CliError::Json { what: "delta", source })?
    };

    let base = Value::from(base);
    let delta = delta.as_ref().map(Delta::from_json);
    let merged = merge(&base, delta.as_ref(), options)?;
    tracing::info!(entries = merged.len(), ?format, "merged document");

    Ok(match format {
        OutputFormat::Outline => OutlineRenderer::new().render(&merged),
        OutputFormat::Json => format!("{:#}\n", to_json(&merged)),
        OutputFormat::Summary => kind_counts(&merged)
            .into_iter()
            .map(|(kind, count)| format!("{kind}: {count}\n"))
            .collect(),
    })
}

/// Read an input file, or stdin for [`STDIN_PATH`].
pub fn read_input(path: &Path) -> Result<String, CliError> {
    let io_err = |source| CliError::Io { path: path.display().to_string(), source };
    if path.as_os_str() == STDIN_PATH {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(io_err)?;
        return Ok(buf);
    }
    fs::read_to_string(path).map_err(io_err)
}

/// Read both inputs; at most one of them may come from stdin.
pub fn read_inputs(base: &Path, delta: &Path) -> Result<(String, String), CliError> {
    if base.as_os_str() == STDIN_PATH && delta.as_os_str() == STDIN_PATH {
        return Err(CliError::StdinTwice);
    }
    Ok((read_input(base)?, read_input(delta)?))
}
