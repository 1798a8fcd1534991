//! Configuration for sbom-merge.
//!
//! - Typed configuration structures
//! - Validation through [`Validatable`]
//! - Named presets
//! - YAML config file loading and discovery, layered under CLI flags
//!
//! # Configuration File
//!
//! Place a `.sbom-merge.yaml` file in your project root or
//! `~/.config/sbom-merge/`:
//!
//! ```yaml
//! merge:
//!   mode: dependency
//!   pretty: true
//! behavior:
//!   fail_on_change: true
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::ConfigPreset;
pub use file::{
    config_search_dirs, discover_config_file, generate_full_example_config, load_config_file,
    load_or_default, ConfigFileError, CONFIG_FILE_NAMES,
};
pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, DiffConfig, DiffPaths, MergeCommandConfig,
    MergeConfig, OutputConfig,
};
pub use validation::{ConfigError, Validatable};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Editors can use it to validate and autocomplete `.sbom-merge.yaml`.
pub fn generate_json_schema() -> serde_json::Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_names_sections() {
        let schema = generate_json_schema().unwrap();
        assert!(schema.contains("\"merge\""));
        assert!(schema.contains("\"fail_on_change\""));
        assert!(schema.contains("dependency"));
    }
}
