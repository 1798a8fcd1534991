//! Diff command handler.
//!
//! Implements the `diff` subcommand for comparing two BOMs.

use super::ensure_valid;
use crate::config::{DiffConfig, Validatable};
use crate::diff::{diff_boms, render_diff, DiffResult};
use crate::pipeline::{exit_codes, parse_bom_with_context, write_output, OutputTarget};
use anyhow::{Context, Result};

/// Run the diff command, returning the desired exit code.
#[allow(clippy::needless_pass_by_value)]
pub fn run_diff(config: DiffConfig) -> Result<i32> {
    ensure_valid("diff", &config.validate())?;
    let quiet = config.behavior.quiet;

    let (old_parsed, new_parsed) = rayon::join(
        || parse_bom_with_context(&config.paths.old, quiet),
        || parse_bom_with_context(&config.paths.new, quiet),
    );
    let old_parsed = old_parsed?;
    let new_parsed = new_parsed?;

    let result = diff_boms(old_parsed.bom(), new_parsed.bom());
    if !quiet {
        tracing::info!("Found {} changes", result.summary.total_changes);
    }

    let exit_code = determine_exit_code(&config, &result);

    let report = render_diff(&result, config.output.diff_format)
        .context("Failed to render diff report")?;
    let target = OutputTarget::from_option(config.output.file.clone());
    write_output(&report, &target, quiet)?;

    Ok(exit_code)
}

/// Determine the appropriate exit code based on diff results and config flags.
const fn determine_exit_code(config: &DiffConfig, result: &DiffResult) -> i32 {
    if config.behavior.fail_on_change && result.summary.total_changes > 0 {
        return exit_codes::CHANGES_DETECTED;
    }
    exit_codes::SUCCESS
}
