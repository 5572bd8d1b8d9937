//! # Analyzer Module
//!
//! Heuristic detection of everything a container build needs to know about a
//! repository:
//! - Primary language and framework
//! - Package manager and dependencies
//! - Backing databases
//! - Listening port and environment variables
//! - Build tools, lifecycle commands and a health check
//!
//! The detectors are pure functions over a [`RepositorySnapshot`]; only
//! [`analyze_repository`] touches the filesystem.

use crate::config::{AnalysisConfig, Config};
use crate::error::{AnalysisError, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::time::Instant;

pub mod build_tools;
pub mod commands;
pub mod database_detector;
pub mod dependency_parser;
pub mod display;
pub mod framework_detector;
pub mod indicators;
pub mod language_detector;
pub mod package_manager;
pub mod project_context;
pub mod recommendations;

pub use build_tools::{detect_build_tools, package_scripts};
pub use commands::{generate_health_check_command, generate_run_commands, CommandSet};
pub use database_detector::{detect_database_requirements, Database};
pub use dependency_parser::extract_dependencies;
pub use framework_detector::{resolve_framework, Framework};
pub use language_detector::{classify_language, Language};
pub use package_manager::{detect_package_manager, PackageManager};
pub use project_context::{detect_environment_variables, detect_port_from_files};
pub use recommendations::generate_recommendations;

/// The file list and scanned documents of one repository
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositorySnapshot {
    /// Display name, usually the root directory name
    pub name: String,
    /// Repository-relative paths with `/` separators
    pub files: Vec<String>,
    /// Path -> (possibly truncated) text of the documents worth scanning
    pub contents: BTreeMap<String, String>,
}

impl RepositorySnapshot {
    pub fn new(name: impl Into<String>, files: Vec<String>, contents: BTreeMap<String, String>) -> Self {
        Self {
            name: name.into(),
            files,
            contents,
        }
    }
}

/// Everything the generators need to containerize a repository
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RepositoryAnalysis {
    pub project_name: String,
    /// `None` when no file had a recognised extension
    pub language: Option<Language>,
    pub framework: Framework,
    pub package_manager: PackageManager,
    pub dependencies: BTreeSet<String>,
    pub databases: BTreeSet<Database>,
    pub port: u16,
    /// Variable name -> description
    pub environment_variables: BTreeMap<String, String>,
    pub build_tools: BTreeSet<String>,
    pub commands: CommandSet,
    pub health_check: String,
    pub recommendations: Vec<String>,
    pub analysis_metadata: AnalysisMetadata,
}

impl RepositoryAnalysis {
    /// Display name of the language, "unknown" when none was detected
    pub fn language_name(&self) -> &'static str {
        self.language.map(|language| language.as_str()).unwrap_or("unknown")
    }

    /// Databases that run as their own service next to the application
    pub fn service_databases(&self) -> impl Iterator<Item = Database> + '_ {
        self.databases.iter().copied().filter(Database::needs_service)
    }
}

/// Metadata about the analysis process
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisMetadata {
    pub timestamp: String,
    pub analyzer_version: String,
    pub analysis_duration_ms: u64,
    pub files_scanned: usize,
    pub documents_scanned: usize,
}

/// Runs every detector over an in-memory snapshot.
///
/// Framework resolution happens first since the port default and the
/// command tables depend on it.
pub fn analyze_snapshot(snapshot: &RepositorySnapshot, config: &AnalysisConfig) -> RepositoryAnalysis {
    let start_time = Instant::now();
    let files = &snapshot.files;
    let contents = &snapshot.contents;

    let language = classify_language(files);
    let framework = resolve_framework(files, contents);
    let package_manager = detect_package_manager(files);
    log::debug!(
        "Resolved language={:?} framework={} package_manager={}",
        language,
        framework,
        package_manager
    );

    let dependencies = extract_dependencies(contents);
    let databases = detect_database_requirements(contents);
    let port = detect_port_from_files(contents, framework);
    let environment_variables =
        project_context::detect_environment_variables_with(contents, config.augment_database_url);

    let build_tools = detect_build_tools(files, contents);
    let scripts = package_scripts(contents);
    let commands = generate_run_commands(language, framework, package_manager, &scripts);
    let health_check = generate_health_check_command(language, framework, port);
    let recommendations = generate_recommendations(files, language, framework, &commands);

    let duration = start_time.elapsed();

    RepositoryAnalysis {
        project_name: snapshot.name.clone(),
        language,
        framework,
        package_manager,
        dependencies,
        databases,
        port,
        environment_variables,
        build_tools,
        commands,
        health_check,
        recommendations,
        analysis_metadata: AnalysisMetadata {
            timestamp: Utc::now().to_rfc3339(),
            analyzer_version: env!("CARGO_PKG_VERSION").to_string(),
            analysis_duration_ms: duration.as_millis() as u64,
            files_scanned: files.len(),
            documents_scanned: contents.len(),
        },
    }
}

/// Walks the repository at `path` and analyzes it
///
/// # Examples
/// ```no_run
/// use repo_containerizer::analyzer::analyze_repository;
/// use repo_containerizer::config::Config;
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let analysis = analyze_repository(Path::new("./my-service"), &Config::default())?;
/// println!("{} on port {}", analysis.framework, analysis.port);
/// # Ok(())
/// # }
/// ```
pub fn analyze_repository(path: &Path, config: &Config) -> Result<RepositoryAnalysis> {
    let root = crate::common::file_utils::validate_project_path(path)?;
    log::info!("Starting analysis of repository: {}", root.display());

    let files = crate::common::file_utils::collect_repository_files(&root, &config.analysis)?;
    if files.is_empty() {
        return Err(AnalysisError::EmptyRepository { path: root }.into());
    }

    let contents = crate::common::file_utils::read_content_map(&root, &files, &config.analysis);
    log::debug!("Collected {} files, scanning {} documents", files.len(), contents.len());

    let name = root
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "app".to_string());

    let snapshot = RepositorySnapshot::new(name, files, contents);
    let analysis = analyze_snapshot(&snapshot, &config.analysis);

    log::info!(
        "Analysis completed in {}ms",
        analysis.analysis_metadata.analysis_duration_ms
    );
    Ok(analysis)
}
