use crate::analyzer::display::DisplayMode;
use crate::config::ConfigFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "containerize")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Plan the containerization of a source repository")]
#[command(long_about = "Analyzes a repository to detect its language, framework, package manager, dependencies, databases, port and environment variables, then generates a Dockerfile, a Docker Compose file and a unified container configuration from the result.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a repository and display the detected stack
    Analyze {
        /// Path to the repository to analyze
        #[arg(value_name = "PROJECT_PATH")]
        path: PathBuf,

        /// Display format for analysis results
        #[arg(long, value_enum, default_value = "matrix")]
        display: DisplayFormat,

        /// Output analysis results in JSON format
        #[arg(long, conflicts_with = "yaml")]
        json: bool,

        /// Output analysis results in YAML format
        #[arg(long)]
        yaml: bool,
    },

    /// Generate container files for a repository
    Generate {
        /// Path to the repository to analyze
        #[arg(value_name = "PROJECT_PATH")]
        path: PathBuf,

        /// Output directory for generated files (defaults to the repository)
        #[arg(short, long, value_name = "OUTPUT_DIR")]
        output: Option<PathBuf>,

        /// Generate Dockerfile
        #[arg(long)]
        dockerfile: bool,

        /// Generate docker-compose.yml
        #[arg(long)]
        compose: bool,

        /// Generate the unified container-config file
        #[arg(long)]
        config_file: bool,

        /// Generate .env.example
        #[arg(long)]
        env: bool,

        /// Generate CONTAINERIZATION_README.md
        #[arg(long)]
        readme: bool,

        /// Generate every supported file (the default when nothing is selected)
        #[arg(long, conflicts_with_all = ["dockerfile", "compose", "config_file", "env", "readme"])]
        all: bool,

        /// Format of the container-config file
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Print the files instead of writing them
        #[arg(long)]
        dry_run: bool,

        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Show supported languages and frameworks
    Support {
        /// Show only languages
        #[arg(long)]
        languages: bool,

        /// Show only frameworks
        #[arg(long)]
        frameworks: bool,
    },

    /// Print the effective configuration as TOML
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DisplayFormat {
    /// Boxed dashboard view
    Matrix,
    /// Every detected item, one per line
    Detailed,
    /// Brief summary only
    Summary,
}

impl From<DisplayFormat> for DisplayMode {
    fn from(format: DisplayFormat) -> Self {
        match format {
            DisplayFormat::Matrix => DisplayMode::Matrix,
            DisplayFormat::Detailed => DisplayMode::Detailed,
            DisplayFormat::Summary => DisplayMode::Summary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

impl From<OutputFormat> for ConfigFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Yaml => ConfigFormat::Yaml,
            OutputFormat::Json => ConfigFormat::Json,
        }
    }
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        env_logger::Builder::from_default_env()
            .filter_level(self.log_level())
            .init();
    }

    pub fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Off;
        }
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
