use serde::{Deserialize, Serialize};

use crate::output::SHORTLIST_FILE_NAME;

/// Largest supported display precision for scores
pub const MAX_DECIMALS: usize = 6;

/// User configuration.
///
/// Only presentation and export settings live here; scoring weights are fixed.
///
/// Example YAML:
/// ```yaml
/// export_path: shortlist.csv
/// theme: auto
/// decimals: 2
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Where the shortlist is written (default: shortlist.csv in the working directory)
    #[serde(default = "default_export_path")]
    pub export_path: String,

    /// TUI color palette
    #[serde(default)]
    pub theme: ThemeMode,

    /// Decimals shown for scores in tables (the exported CSV keeps full precision)
    #[serde(default = "default_decimals")]
    pub decimals: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export_path: default_export_path(),
            theme: ThemeMode::default(),
            decimals: default_decimals(),
        }
    }
}

fn default_export_path() -> String {
    SHORTLIST_FILE_NAME.to_string()
}

fn default_decimals() -> usize {
    2
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Pick dark or light from the terminal background
    #[default]
    Auto,
    Dark,
    Light,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.export_path, "shortlist.csv");
        assert_eq!(config.theme, ThemeMode::Auto);
        assert_eq!(config.decimals, 2);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            export_path: "out/top.csv".to_string(),
            theme: ThemeMode::Light,
            decimals: 3,
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_config_parse() {
        let yaml = "theme: dark\n";
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.theme, ThemeMode::Dark);
        assert_eq!(config.export_path, "shortlist.csv");
        assert_eq!(config.decimals, 2);
    }

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let yaml = "weights:\n  education: 50\n";
        assert!(serde_saphyr::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_invalid_theme_rejected() {
        assert!(serde_saphyr::from_str::<Config>("theme: neon\n").is_err());
    }
}
