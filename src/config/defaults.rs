//! Named configuration presets.

use super::types::{AppConfig, BehaviorConfig, MergeConfig, OutputConfig};
use crate::codec::FormatPreference;
use crate::merge::MergeMode;

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Merge mode, compact output in the first input's format
    Default,
    /// Compact output with progress logging off, for pipes and CI
    Compact,
    /// Dependency mode with indented output, for assembling a product BOM
    /// from per-part BOMs
    Aggregate,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Compact => "compact",
            Self::Aggregate => "aggregate",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "compact" | "ci" => Some(Self::Compact),
            "aggregate" | "product" => Some(Self::Aggregate),
            _ => None,
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Fold documents together, compact output",
            Self::Compact => "Compact output without progress logging",
            Self::Aggregate => "Link each later root under the first root, indented output",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Compact, Self::Aggregate]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Compact => Self {
                merge: MergeConfig {
                    pretty: false,
                    ..MergeConfig::default()
                },
                output: OutputConfig::default(),
                behavior: BehaviorConfig {
                    quiet: true,
                    fail_on_change: false,
                },
            },
            ConfigPreset::Aggregate => Self {
                merge: MergeConfig {
                    mode: MergeMode::Dependency,
                    pretty: true,
                    format: FormatPreference::Auto,
                },
                output: OutputConfig::default(),
                behavior: BehaviorConfig::default(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names_round_trip() {
        for preset in ConfigPreset::all() {
            assert_eq!(ConfigPreset::from_name(preset.name()), Some(*preset));
        }
        assert_eq!(ConfigPreset::from_name("CI"), Some(ConfigPreset::Compact));
        assert_eq!(ConfigPreset::from_name("unknown"), None);
    }

    #[test]
    fn test_aggregate_preset() {
        let config = AppConfig::from_preset(ConfigPreset::Aggregate);
        assert_eq!(config.merge.mode, MergeMode::Dependency);
        assert!(config.merge.pretty);
    }

    #[test]
    fn test_compact_preset_is_quiet() {
        let config = AppConfig::from_preset(ConfigPreset::Compact);
        assert!(config.behavior.quiet);
        assert!(!config.merge.pretty);
    }
}
