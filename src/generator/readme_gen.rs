use crate::analyzer::{CommandSet, RepositoryAnalysis};
use crate::error::Result;
use crate::generator::config_gen::image_name;
use crate::generator::templates;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Serialize)]
struct ReadmeContext<'a> {
    project_name: &'a str,
    image_name: String,
    language: &'static str,
    framework: &'static str,
    package_manager: &'static str,
    port: u16,
    databases: Vec<&'static str>,
    environment_variables: &'a BTreeMap<String, String>,
    commands: &'a CommandSet,
    health_check: &'a str,
    dependencies: &'a BTreeSet<String>,
    build_tools: &'a BTreeSet<String>,
    recommendations: &'a [String],
    version: &'static str,
}

/// `CONTAINERIZATION_README.md` with build/run instructions
pub fn generate(analysis: &RepositoryAnalysis) -> Result<String> {
    let context = ReadmeContext {
        project_name: &analysis.project_name,
        image_name: image_name(analysis),
        language: analysis.language_name(),
        framework: analysis.framework.as_str(),
        package_manager: analysis.package_manager.as_str(),
        port: analysis.port,
        databases: analysis.databases.iter().map(|db| db.as_str()).collect(),
        environment_variables: &analysis.environment_variables,
        commands: &analysis.commands,
        health_check: &analysis.health_check,
        dependencies: &analysis.dependencies,
        build_tools: &analysis.build_tools,
        recommendations: &analysis.recommendations,
        version: env!("CARGO_PKG_VERSION"),
    };
    templates::render("readme.md", &context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{analyze_snapshot, RepositorySnapshot};
    use crate::config::AnalysisConfig;

    fn analysis(files: &[&str], contents: &[(&str, &str)]) -> RepositoryAnalysis {
        let snapshot = RepositorySnapshot::new(
            "Inventory",
            files.iter().map(|s| s.to_string()).collect(),
            contents.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        );
        analyze_snapshot(&snapshot, &AnalysisConfig::default())
    }

    #[test]
    fn test_readme_sections() {
        let readme = generate(&analysis(
            &["go.mod", "main.go"],
            &[("go.mod", "module inv\n\nrequire (\n\tgithub.com/gin-gonic/gin v1.9.1\n\tgithub.com/lib/pq v1.10.0\n)\n")],
        ))
        .unwrap();

        assert!(readme.starts_with("# Containerization Guide: Inventory"));
        assert!(readme.contains("- **Primary Language**: Go"));
        assert!(readme.contains("- **Framework**: gin"));
        assert!(readme.contains("docker build -t inventory ."));
        assert!(readme.contains("docker run -p 8080:8080"));
        assert!(readme.contains("- github.com/gin-gonic/gin"));
        assert!(readme.contains("- **Start**: `./main`"));
        assert!(readme.contains("No environment variables detected."));
        assert!(readme.contains("## Build Tools\n- go\n"));
    }

    #[test]
    fn test_readme_lists_environment() {
        let readme = generate(&analysis(&["app.py"], &[("app.py", "os.environ.get('API_KEY')")])).unwrap();
        assert!(readme.contains("- `API_KEY`: API key for external services"));
        assert!(!readme.contains("No environment variables detected."));
        assert!(!readme.contains("## Dependencies"));
    }
}
