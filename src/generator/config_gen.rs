use crate::analyzer::{CommandSet, RepositoryAnalysis};
use crate::config::ConfigFormat;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Unified container configuration written as `container-config.{yml,json}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerConfig {
    pub containerization: Containerization,
    pub analysis: AnalysisSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Containerization {
    pub image_name: String,
    pub ports: Vec<String>,
    pub environment_variables: BTreeMap<String, String>,
    pub commands: CommandSet,
    pub health_check: HealthCheck,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCheck {
    pub test: String,
    pub interval: String,
    pub timeout: String,
    pub retries: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub primary_language: String,
    pub framework: String,
    pub package_manager: String,
    pub databases: Vec<String>,
    pub dependencies: BTreeSet<String>,
    pub build_tools: BTreeSet<String>,
    pub analyzed_at: String,
    pub analyzer_version: String,
}

/// Lowercase image name safe for `docker build -t`
pub fn image_name(analysis: &RepositoryAnalysis) -> String {
    let sanitized: String = analysis
        .project_name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' { c } else { '-' })
        .collect();
    let trimmed = sanitized.trim_matches(|c: char| !c.is_ascii_alphanumeric());

    if trimmed.is_empty() {
        format!("{}-app", analysis.language_name().to_lowercase())
    } else {
        trimmed.to_string()
    }
}

pub fn build_container_config(analysis: &RepositoryAnalysis) -> ContainerConfig {
    ContainerConfig {
        containerization: Containerization {
            image_name: image_name(analysis),
            ports: vec![format!("{}:{}", analysis.port, analysis.port)],
            environment_variables: analysis.environment_variables.clone(),
            commands: analysis.commands.clone(),
            health_check: HealthCheck {
                test: analysis.health_check.clone(),
                interval: "30s".to_string(),
                timeout: "10s".to_string(),
                retries: 3,
            },
        },
        analysis: AnalysisSummary {
            primary_language: analysis.language_name().to_string(),
            framework: analysis.framework.to_string(),
            package_manager: analysis.package_manager.to_string(),
            databases: analysis.databases.iter().map(|db| db.to_string()).collect(),
            dependencies: analysis.dependencies.clone(),
            build_tools: analysis.build_tools.clone(),
            analyzed_at: analysis.analysis_metadata.timestamp.clone(),
            analyzer_version: analysis.analysis_metadata.analyzer_version.clone(),
        },
    }
}

/// Generate the unified configuration file in the requested format
pub fn generate(analysis: &RepositoryAnalysis, format: ConfigFormat) -> Result<String> {
    let config = build_container_config(analysis);
    let rendered = match format {
        ConfigFormat::Yaml => serde_yaml::to_string(&config)?,
        ConfigFormat::Json => serde_json::to_string_pretty(&config)?,
    };
    Ok(rendered)
}
