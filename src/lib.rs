//! # Repo Containerizer
//!
//! Analyzes a source repository and produces everything needed to run it in a
//! container.
//!
//! ## Features
//!
//! - **Stack Detection**: Primary language, framework and package manager from file names and manifests
//! - **Dependency Extraction**: package.json, requirements.txt, pom.xml, go.mod and Cargo.toml
//! - **Runtime Context**: Backing databases, listening port and environment variables
//! - **Generation**: Dockerfile, Docker Compose file, unified container config, `.env.example` and a guide
//!
//! ## Example
//!
//! ```rust,no_run
//! use repo_containerizer::{analyze_repository, generate_dockerfile, Config};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let analysis = analyze_repository(Path::new("./my-project"), &config)?;
//! let dockerfile = generate_dockerfile(&analysis, &config)?;
//! println!("{}", dockerfile);
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod cli;
pub mod common;
pub mod config;
pub mod error;
pub mod generator;

// Re-export commonly used types and functions
pub use analyzer::{analyze_repository, analyze_snapshot, RepositoryAnalysis, RepositorySnapshot};
pub use config::Config;
pub use error::{ContainerizerError, Result};
pub use generator::{generate_compose, generate_container_config, generate_dockerfile, generate_outputs};

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
