use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub generation: GenerationConfig,
    pub output: OutputConfig,
}

/// Repository walking and detector configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Directory or file names (or glob patterns) skipped while walking
    pub ignore_patterns: Vec<String>,
    /// Files larger than this many bytes are never read
    pub max_file_size: u64,
    /// Upper bound on the number of paths collected into the file list
    pub max_files: usize,
    /// How many entry-point-looking source files are read besides manifests
    pub max_source_files: usize,
    /// Each scanned document is truncated to this many characters
    pub max_content_chars: usize,
    /// Insert DATABASE_URL whenever DB_* style variables are detected
    pub augment_database_url: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            ignore_patterns: vec![
                "node_modules".to_string(),
                ".git".to_string(),
                "target".to_string(),
                "build".to_string(),
                "dist".to_string(),
                "__pycache__".to_string(),
                ".venv".to_string(),
                "venv".to_string(),
            ],
            max_file_size: 1024 * 1024, // 1MB
            max_files: 20_000,
            max_source_files: 3,
            max_content_chars: 10_000,
            augment_database_url: true,
        }
    }
}

/// Generation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub base_image_override: Option<String>,
    pub include_health_check: bool,
    pub non_root_user: bool,
    /// Add a compose service for every detected database
    pub include_databases: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_image_override: None,
            include_health_check: true,
            non_root_user: true,
            include_databases: true,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: ConfigFormat,
    pub overwrite_existing: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ConfigFormat::Yaml,
            overwrite_existing: false,
        }
    }
}

/// Serialization format of the unified container configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Yaml => "yml",
            ConfigFormat::Json => "json",
        }
    }
}
