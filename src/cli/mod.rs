//! CLI command handlers.
//!
//! Testable handlers invoked by main.rs. Each returns the process exit code;
//! the caller exits with it when it is non-zero.

mod diff;
mod merge;

pub use diff::run_diff;
pub use merge::run_merge;

// Re-export config types used by handlers
pub use crate::config::{DiffConfig, MergeCommandConfig};

use crate::config::ConfigError;
use crate::error::SbomMergeError;

/// Fail with every validation error on one line each.
pub(crate) fn ensure_valid(what: &str, errors: &[ConfigError]) -> anyhow::Result<()> {
    if errors.is_empty() {
        return Ok(());
    }
    let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
    Err(SbomMergeError::config(format!("{what} command:\n  {}", details.join("\n  "))).into())
}
