//! Diff result structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Complete result of a BOM diff.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[must_use]
pub struct DiffResult {
    /// Summary statistics
    pub summary: DiffSummary,
    /// Component changes, nested components included
    pub components: ChangeSet<EntityChange>,
    pub services: ChangeSet<EntityChange>,
    /// Dependency edge changes (`modified` is always empty)
    pub dependencies: ChangeSet<DependencyChange>,
    pub vulnerabilities: ChangeSet<EntityChange>,
    /// Both documents hashed to the same content
    pub identical: bool,
    pub generated_at: DateTime<Utc>,
}

impl DiffResult {
    /// Create a new empty diff result
    pub fn new() -> Self {
        Self {
            summary: DiffSummary::default(),
            components: ChangeSet::new(),
            services: ChangeSet::new(),
            dependencies: ChangeSet::new(),
            vulnerabilities: ChangeSet::new(),
            identical: false,
            generated_at: Utc::now(),
        }
    }

    /// Result for two documents with identical content.
    pub fn identical() -> Self {
        Self {
            identical: true,
            ..Self::new()
        }
    }

    /// Calculate and update summary statistics
    pub fn calculate_summary(&mut self) {
        self.summary.components_added = self.components.added.len();
        self.summary.components_removed = self.components.removed.len();
        self.summary.components_modified = self.components.modified.len();
        self.summary.services_added = self.services.added.len();
        self.summary.services_removed = self.services.removed.len();
        self.summary.services_modified = self.services.modified.len();
        self.summary.dependencies_added = self.dependencies.added.len();
        self.summary.dependencies_removed = self.dependencies.removed.len();
        self.summary.vulnerabilities_added = self.vulnerabilities.added.len();
        self.summary.vulnerabilities_removed = self.vulnerabilities.removed.len();
        self.summary.vulnerabilities_modified = self.vulnerabilities.modified.len();

        self.summary.total_changes = self.components.total()
            + self.services.total()
            + self.dependencies.total()
            + self.vulnerabilities.total();
    }

    /// Check if there are any changes
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.summary.total_changes > 0
    }
}

impl Default for DiffResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary counts of a diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub total_changes: usize,
    pub components_added: usize,
    pub components_removed: usize,
    pub components_modified: usize,
    pub services_added: usize,
    pub services_removed: usize,
    pub services_modified: usize,
    pub dependencies_added: usize,
    pub dependencies_removed: usize,
    pub vulnerabilities_added: usize,
    pub vulnerabilities_removed: usize,
    pub vulnerabilities_modified: usize,
}

/// Generic change set for added/removed/modified items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeSet<T> {
    pub added: Vec<T>,
    pub removed: Vec<T>,
    pub modified: Vec<T>,
}

impl<T> ChangeSet<T> {
    pub fn new() -> Self {
        Self {
            added: Vec::new(),
            removed: Vec::new(),
            modified: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }

    pub fn total(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len()
    }
}

impl<T> Default for ChangeSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// One added, removed or modified entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityChange {
    /// Identity key the entity was matched by
    pub id: String,
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_version: Option<String>,
    /// Top-level fields whose content differs (modified entries only)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub changed_fields: Vec<String>,
}

impl EntityChange {
    /// Short human label: name and version(s), falling back to the id.
    #[must_use]
    pub fn label(&self) -> String {
        let name = self.name.as_deref().unwrap_or(&self.id);
        match (&self.old_version, &self.new_version) {
            (Some(old), Some(new)) if old != new => format!("{name} {old} -> {new}"),
            (_, Some(v)) | (Some(v), None) => format!("{name} {v}"),
            (None, None) => name.to_string(),
        }
    }
}

/// A single `ref -> dependsOn` edge of the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyChange {
    pub from: String,
    pub to: String,
}

impl DependencyChange {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_all_sections() {
        let mut result = DiffResult::new();
        result.components.added.push(EntityChange {
            id: "ref:a".to_string(),
            name: Some("a".to_string()),
            old_version: None,
            new_version: Some("1.0".to_string()),
            changed_fields: Vec::new(),
        });
        result
            .dependencies
            .removed
            .push(DependencyChange::new("app", "a"));

        result.calculate_summary();
        assert_eq!(result.summary.components_added, 1);
        assert_eq!(result.summary.dependencies_removed, 1);
        assert_eq!(result.summary.total_changes, 2);
        assert!(result.has_changes());
    }

    #[test]
    fn test_identical_has_no_changes() {
        let result = DiffResult::identical();
        assert!(result.identical);
        assert!(!result.has_changes());
    }

    #[test]
    fn test_entity_label() {
        let mut change = EntityChange {
            id: "ref:lib".to_string(),
            name: Some("lib".to_string()),
            old_version: Some("1.0".to_string()),
            new_version: Some("2.0".to_string()),
            changed_fields: vec!["version".to_string()],
        };
        assert_eq!(change.label(), "lib 1.0 -> 2.0");

        change.old_version = None;
        assert_eq!(change.label(), "lib 2.0");

        change.name = None;
        change.new_version = None;
        assert_eq!(change.label(), "ref:lib");
    }
}
