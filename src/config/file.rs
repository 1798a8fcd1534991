//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use crate::codec::FormatPreference;
use crate::diff::DiffFormat;
use crate::merge::MergeMode;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".sbom-merge.yaml",
    ".sbom-merge.yml",
    "sbom-merge.yaml",
    "sbom-merge.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/sbom-merge/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    config_search_dirs()
        .iter()
        .find_map(|dir| find_config_in_dir(dir))
}

/// Directories searched for a config file, in priority order.
#[must_use]
pub fn config_search_dirs() -> Vec<PathBuf> {
    let mut dirs_to_search = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs_to_search.push(cwd);
    }
    if let Some(git_root) = find_git_root() {
        dirs_to_search.push(git_root);
    }
    if let Some(config_dir) = dirs::config_dir() {
        dirs_to_search.push(config_dir.join("sbom-merge"));
    }
    if let Some(home) = dirs::home_dir() {
        dirs_to_search.push(home);
    }
    dirs_to_search
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml_ng::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml_ng::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults override; booleans can only
    /// be switched on.
    pub fn merge(&mut self, other: &Self) {
        if other.merge.mode != MergeMode::default() {
            self.merge.mode = other.merge.mode;
        }
        if other.merge.pretty {
            self.merge.pretty = true;
        }
        if other.merge.format != FormatPreference::default() {
            self.merge.format = other.merge.format;
        }

        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.diff_format != DiffFormat::default() {
            self.output.diff_format = other.output.diff_format;
        }

        if other.behavior.quiet {
            self.behavior.quiet = true;
        }
        if other.behavior.fail_on_change {
            self.behavior.fail_on_change = true;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# sbom-merge configuration
#
# Place this file at:
#   - .sbom-merge.yaml in your project root
#   - ~/.config/sbom-merge/sbom-merge.yaml for global config
#
# CLI arguments always override file settings.

merge:
  # merge: fold documents together, reparenting later roots onto the first
  # dependency: attach later roots as dependencies of the first root
  mode: merge
  # Indent the output document
  pretty: false
  # Output encoding: auto (same as first input), json, xml
  format: auto

output:
  # Output file path (omit for stdout)
  # file: merged.cdx.json
  # Diff report format: summary, json
  diff_format: summary

behavior:
  # Suppress progress logging
  quiet: false
  # Exit with code 1 when diff finds changes
  fail_on_change: false
"
    .to_string()
}
