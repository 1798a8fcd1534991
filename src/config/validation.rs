//! Configuration validation for sbom-merge.

use super::types::{AppConfig, BehaviorConfig, DiffConfig, MergeCommandConfig, OutputConfig};
use std::path::Path;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = self.output.validate();
        errors.extend(self.behavior.validate());
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError::new(
                        "output.file",
                        format!("Parent directory does not exist: {}", parent.display()),
                    ));
                }
            }
        }

        errors
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        // only boolean flags
        Vec::new()
    }
}

fn check_input(field: &str, path: &Path, errors: &mut Vec<ConfigError>) {
    if !path.exists() {
        errors.push(ConfigError::new(
            field,
            format!("File not found: {}", path.display()),
        ));
    }
}

impl Validatable for MergeCommandConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.inputs.len() < 2 {
            errors.push(ConfigError::new(
                "inputs",
                format!("At least two inputs are required, got {}", self.inputs.len()),
            ));
        }
        for (i, input) in self.inputs.iter().enumerate() {
            check_input(&format!("inputs[{i}]"), input, &mut errors);
        }

        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for DiffConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        check_input("paths.old", &self.paths.old, &mut errors);
        check_input("paths.new", &self.paths.new, &mut errors);
        errors.extend(self.output.validate());
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiffPaths;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
    }

    #[test]
    fn test_output_parent_must_exist() {
        let config = OutputConfig {
            file: Some(PathBuf::from("/nonexistent/dir/out.json")),
            ..OutputConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "output.file");
    }

    #[test]
    fn test_bare_output_filename_is_valid() {
        let config = OutputConfig {
            file: Some(PathBuf::from("merged.cdx.json")),
            ..OutputConfig::default()
        };
        assert!(config.is_valid());
    }

    #[test]
    fn test_merge_requires_two_existing_inputs() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let config = MergeCommandConfig {
            inputs: vec![tmp.path().to_path_buf()],
            ..MergeCommandConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "inputs");

        let config = MergeCommandConfig {
            inputs: vec![tmp.path().to_path_buf(), PathBuf::from("/nonexistent.json")],
            ..MergeCommandConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "inputs[1]");
    }

    #[test]
    fn test_diff_paths_must_exist() {
        let config = DiffConfig {
            paths: DiffPaths {
                old: PathBuf::from("/nonexistent/old.json"),
                new: PathBuf::from("/nonexistent/new.json"),
            },
            ..DiffConfig::default()
        };
        let fields: Vec<_> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, ["paths.old", "paths.new"]);
    }
}
