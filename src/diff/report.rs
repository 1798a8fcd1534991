//! Rendering of diff results.

use super::result::{ChangeSet, DiffResult, EntityChange};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// Output format for diff reports.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum DiffFormat {
    /// Human-readable summary
    #[default]
    Summary,
    /// Full result as JSON
    Json,
}

impl fmt::Display for DiffFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Summary => write!(f, "summary"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Render a diff result in the requested format.
pub fn render_diff(result: &DiffResult, format: DiffFormat) -> serde_json::Result<String> {
    match format {
        DiffFormat::Json => serde_json::to_string_pretty(result).map(|mut s| {
            s.push('\n');
            s
        }),
        DiffFormat::Summary => Ok(render_summary(result)),
    }
}

fn render_summary(result: &DiffResult) -> String {
    let mut out = String::new();
    if result.identical {
        out.push_str("Documents are identical\n");
        return out;
    }
    if !result.has_changes() {
        out.push_str("No changes\n");
        return out;
    }

    let s = &result.summary;
    let _ = writeln!(out, "Total changes: {}", s.total_changes);
    let _ = writeln!(
        out,
        "Components:      +{} -{} ~{}",
        s.components_added, s.components_removed, s.components_modified
    );
    let _ = writeln!(
        out,
        "Services:        +{} -{} ~{}",
        s.services_added, s.services_removed, s.services_modified
    );
    let _ = writeln!(
        out,
        "Dependencies:    +{} -{}",
        s.dependencies_added, s.dependencies_removed
    );
    let _ = writeln!(
        out,
        "Vulnerabilities: +{} -{} ~{}",
        s.vulnerabilities_added, s.vulnerabilities_removed, s.vulnerabilities_modified
    );

    section(&mut out, "Components", &result.components);
    section(&mut out, "Services", &result.services);
    section(&mut out, "Vulnerabilities", &result.vulnerabilities);

    if !result.dependencies.is_empty() {
        let _ = writeln!(out, "\nDependencies");
        for edge in &result.dependencies.added {
            let _ = writeln!(out, "  + {} -> {}", edge.from, edge.to);
        }
        for edge in &result.dependencies.removed {
            let _ = writeln!(out, "  - {} -> {}", edge.from, edge.to);
        }
    }
    out
}

fn section(out: &mut String, title: &str, changes: &ChangeSet<EntityChange>) {
    if changes.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{title}");
    for change in &changes.added {
        let _ = writeln!(out, "  + {}", change.label());
    }
    for change in &changes.removed {
        let _ = writeln!(out, "  - {}", change.label());
    }
    for change in &changes.modified {
        let _ = writeln!(
            out,
            "  ~ {} [{}]",
            change.label(),
            change.changed_fields.join(", ")
        );
    }
}
