//! Merge command handler.

use super::ensure_valid;
use crate::config::{MergeCommandConfig, Validatable};
use crate::merge::MergeEngine;
use crate::model::Bom;
use crate::pipeline::{exit_codes, parse_boms_parallel, write_bom, OutputTarget, ParsedBom};
use anyhow::{Context, Result};

/// Run the merge command, returning the desired exit code.
///
/// Inputs are decoded in parallel; the fold runs left to right in argument
/// order. The output is encoded in the first input's format unless
/// `config.merge.format` forces one.
#[allow(clippy::needless_pass_by_value)]
pub fn run_merge(config: MergeCommandConfig) -> Result<i32> {
    ensure_valid("merge", &config.validate())?;
    let quiet = config.behavior.quiet;

    let parsed = parse_boms_parallel(&config.inputs, quiet)?;
    let detected = parsed
        .first()
        .map(|p| p.format)
        .context("No input documents to merge")?;
    let boms: Vec<Bom> = parsed.into_iter().map(ParsedBom::into_bom).collect();

    let engine = MergeEngine::new(config.merge.mode);
    let merged = engine
        .merge_all(&boms)
        .context("No input documents to merge")?;

    if !quiet {
        tracing::info!(
            "Merged {} documents ({} mode): {} components, {} dependency entries",
            boms.len(),
            engine.mode(),
            merged.component_count(),
            merged.dependencies.as_ref().map_or(0, Vec::len)
        );
    }

    let format = config.merge.format.resolve(detected);
    let target = OutputTarget::from_option(config.output.file.clone());
    write_bom(&merged, format, config.merge.pretty, &target, quiet)?;

    Ok(exit_codes::SUCCESS)
}
