use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContainerizerError {
    #[error("Repository analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Container plan generation failed: {0}")]
    Generation(#[from] GeneratorError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Walk directory error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Security error: {0}")]
    Security(#[from] SecurityError),
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("No files found to analyze in {path}")]
    EmptyRepository { path: PathBuf },

    #[error("Invalid ignore pattern '{pattern}': {reason}")]
    InvalidIgnorePattern { pattern: String, reason: String },
}

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Template rendering failed: {0}")]
    TemplateRendering(String),

    #[error("Refusing to overwrite existing file: {path}")]
    OutputExists { path: PathBuf },

    #[error("Output file creation failed: {path}")]
    OutputCreation { path: PathBuf },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Configuration parsing failed: {0}")]
    ParsingFailed(String),

    #[error("Configuration serialization failed: {0}")]
    SerializationFailed(String),
}

#[derive(Error, Debug)]
pub enum SecurityError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

pub type Result<T> = std::result::Result<T, ContainerizerError>;
