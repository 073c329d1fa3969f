mod init;
mod schema;

pub use init::write_default_config;
pub use schema::{Config, ThemeMode, MAX_DECIMALS};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/selectai/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("selectai"))
}

/// Get the default config file path (~/.config/selectai/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path and
///   falls back to built-in defaults when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Config file not found at {}", p.display());
            }
            p
        }
        None => {
            let default = get_config_path()?;
            if !default.exists() {
                tracing::debug!(path = %default.display(), "no config file, using defaults");
                return Ok(Config::default());
            }
            default
        }
    };

    parse_config_file(&config_path)
}

fn parse_config_file(config_path: &Path) -> Result<Config> {
    let config_content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    Ok(config)
}

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.export_path.trim().is_empty() {
        errors.push("export_path: must not be empty".to_string());
    } else if !config.export_path.to_lowercase().ends_with(".csv") {
        errors.push(format!(
            "export_path: '{}' must end with .csv",
            config.export_path
        ));
    }

    if config.decimals > MAX_DECIMALS {
        errors.push(format!(
            "decimals: {} exceeds the maximum of {}",
            config.decimals, MAX_DECIMALS
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_export_path_must_be_csv() {
        let config = Config {
            export_path: "shortlist.txt".to_string(),
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("export_path"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = Config {
            export_path: " ".to_string(),
            decimals: 12,
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[1].contains("decimals"));
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(Some(dir.path().join("nope.yaml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "decimals: 4\nexport_path: picks.csv\n").unwrap();

        let config = load_config(Some(path)).unwrap();
        assert_eq!(config.decimals, 4);
        assert_eq!(config.export_path, "picks.csv");
    }

    #[test]
    fn test_load_invalid_yaml_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "decimals: [not a number\n").unwrap();

        let err = load_config(Some(path)).unwrap_err();
        assert!(err.to_string().contains("invalid YAML"));
    }
}
