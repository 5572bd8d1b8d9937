use crate::analyzer::RepositoryAnalysis;
use crate::config::{Config, ConfigFormat};
use crate::error::Result;

pub mod compose_gen;
pub mod config_gen;
pub mod dockerfile_gen;
pub mod env_gen;
pub mod readme_gen;
pub mod templates;

/// A rendered file and its name relative to the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub name: String,
    pub content: String,
}

/// Which files `generate_outputs` should produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSelection {
    pub dockerfile: bool,
    pub compose: bool,
    pub config_file: bool,
    pub env_example: bool,
    pub readme: bool,
}

impl OutputSelection {
    pub fn all() -> Self {
        Self {
            dockerfile: true,
            compose: true,
            config_file: true,
            env_example: true,
            readme: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.dockerfile || self.compose || self.config_file || self.env_example || self.readme)
    }
}

/// Generate a Dockerfile based on repository analysis
pub fn generate_dockerfile(analysis: &RepositoryAnalysis, config: &Config) -> Result<String> {
    dockerfile_gen::generate(analysis, &config.generation)
}

/// Generate a Docker Compose file based on repository analysis
pub fn generate_compose(analysis: &RepositoryAnalysis, config: &Config) -> Result<String> {
    compose_gen::generate(analysis, &config.generation)
}

/// Generate the unified container configuration
pub fn generate_container_config(analysis: &RepositoryAnalysis, format: ConfigFormat) -> Result<String> {
    config_gen::generate(analysis, format)
}

pub fn generate_env_example(analysis: &RepositoryAnalysis) -> String {
    env_gen::generate(analysis)
}

pub fn generate_readme(analysis: &RepositoryAnalysis) -> Result<String> {
    readme_gen::generate(analysis)
}

/// Renders every selected file, in a stable order
pub fn generate_outputs(
    analysis: &RepositoryAnalysis,
    config: &Config,
    selection: OutputSelection,
) -> Result<Vec<GeneratedFile>> {
    let mut files = Vec::new();

    if selection.dockerfile {
        files.push(GeneratedFile {
            name: "Dockerfile".to_string(),
            content: generate_dockerfile(analysis, config)?,
        });
    }
    if selection.compose {
        files.push(GeneratedFile {
            name: "docker-compose.yml".to_string(),
            content: generate_compose(analysis, config)?,
        });
    }
    if selection.config_file {
        let format = config.output.format;
        files.push(GeneratedFile {
            name: format!("container-config.{}", format.extension()),
            content: generate_container_config(analysis, format)?,
        });
    }
    if selection.env_example {
        files.push(GeneratedFile {
            name: ".env.example".to_string(),
            content: generate_env_example(analysis),
        });
    }
    if selection.readme {
        files.push(GeneratedFile {
            name: "CONTAINERIZATION_README.md".to_string(),
            content: generate_readme(analysis)?,
        });
    }

    log::debug!("Generated {} files", files.len());
    Ok(files)
}
