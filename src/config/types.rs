//! Configuration types for sbom-merge.
//!
//! Settings shared by every command live in [`AppConfig`] (loadable from a
//! YAML file); each command handler takes its own config built from the
//! CLI arguments layered over it.

use crate::codec::FormatPreference;
use crate::diff::DiffFormat;
use crate::merge::MergeMode;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Top-level configuration, loadable from `.sbom-merge.yaml`.
///
/// CLI flags override whatever the file sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// How documents are merged and encoded
    pub merge: MergeConfig,
    /// Where results go
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    pub const fn mode(mut self, mode: MergeMode) -> Self {
        self.config.merge.mode = mode;
        self
    }

    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.config.merge.pretty = pretty;
        self
    }

    /// Set the output encoding.
    pub const fn format(mut self, format: FormatPreference) -> Self {
        self.config.merge.format = format;
        self
    }

    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    pub const fn diff_format(mut self, format: DiffFormat) -> Self {
        self.config.output.diff_format = format;
        self
    }

    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Enable fail-on-change mode.
    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_change = fail;
        self
    }

    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Section Configurations
// ============================================================================

/// Merge settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MergeConfig {
    /// `merge` folds documents together; `dependency` links later roots
    /// under the first root
    pub mode: MergeMode,
    /// Indent the encoded output
    pub pretty: bool,
    /// Output encoding; `auto` follows the first input
    pub format: FormatPreference,
}

/// Output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Report format for `diff`
    pub diff_format: DiffFormat,
}

/// Behavior flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Suppress progress logging
    pub quiet: bool,
    /// Exit with code 1 when `diff` finds changes
    pub fail_on_change: bool,
}

// ============================================================================
// Command Configurations
// ============================================================================

/// Everything `run_merge` needs.
#[derive(Debug, Clone, Default)]
pub struct MergeCommandConfig {
    /// Input documents, merged left to right
    pub inputs: Vec<PathBuf>,
    pub merge: MergeConfig,
    pub output: OutputConfig,
    pub behavior: BehaviorConfig,
}

impl MergeCommandConfig {
    /// Command config over the shared settings of `app`.
    #[must_use]
    pub fn from_app(inputs: Vec<PathBuf>, app: &AppConfig) -> Self {
        Self {
            inputs,
            merge: app.merge.clone(),
            output: app.output.clone(),
            behavior: app.behavior.clone(),
        }
    }
}

/// Paths for a diff operation.
#[derive(Debug, Clone, Default)]
pub struct DiffPaths {
    pub old: PathBuf,
    pub new: PathBuf,
}

/// Everything `run_diff` needs.
#[derive(Debug, Clone, Default)]
pub struct DiffConfig {
    pub paths: DiffPaths,
    pub output: OutputConfig,
    pub behavior: BehaviorConfig,
}

impl DiffConfig {
    #[must_use]
    pub fn from_app(old: PathBuf, new: PathBuf, app: &AppConfig) -> Self {
        Self {
            paths: DiffPaths { old, new },
            output: app.output.clone(),
            behavior: app.behavior.clone(),
        }
    }
}
