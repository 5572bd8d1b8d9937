pub mod types;

use crate::error::{ConfigError, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub use types::{AnalysisConfig, Config, ConfigFormat, GenerationConfig, OutputConfig};

const CONFIG_DIR_NAME: &str = "repo-containerizer";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Location of the per-user configuration file, if the platform has a config directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load configuration from file or use defaults.
///
/// An explicitly requested file must exist and parse. The per-user file is
/// only read when present; otherwise the built-in defaults apply.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()).into());
        }
        return read_config_file(path);
    }

    match default_config_path() {
        Some(default_path) if default_path.is_file() => {
            log::debug!("Using configuration file {}", default_path.display());
            read_config_file(&default_path)
        }
        _ => {
            log::debug!("No configuration file found, using defaults");
            Ok(Config::default())
        }
    }
}

fn read_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse a TOML configuration document; missing keys fall back to defaults
pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content)
        .map_err(|e| ConfigError::ParsingFailed(e.to_string()).into())
}

/// Render a configuration back to TOML
pub fn render_config(config: &Config) -> Result<String> {
    toml::to_string_pretty(config)
        .map_err(|e| ConfigError::SerializationFailed(e.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse_config(
            r#"
[analysis]
max_source_files = 5
augment_database_url = false

[output]
format = "json"
"#,
        )
        .unwrap();

        assert_eq!(config.analysis.max_source_files, 5);
        assert!(!config.analysis.augment_database_url);
        assert_eq!(config.analysis.max_content_chars, 10_000);
        assert_eq!(config.output.format, ConfigFormat::Json);
        assert!(config.generation.include_health_check);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        assert!(parse_config("analysis = 42\n[analysis").is_err());
    }

    #[test]
    fn test_missing_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.toml");
        assert!(load_config(Some(&missing)).is_err());
    }

    #[test]
    fn test_render_round_trips() {
        let config = Config::default();
        let rendered = render_config(&config).unwrap();
        assert_eq!(parse_config(&rendered).unwrap(), config);
    }

    #[test]
    fn test_load_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[generation]\nnon_root_user = false\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert!(!config.generation.non_root_user);
    }
}
