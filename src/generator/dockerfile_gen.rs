use crate::analyzer::{Framework, Language, PackageManager, RepositoryAnalysis};
use crate::config::GenerationConfig;
use crate::error::Result;
use crate::generator::templates;
use serde::Serialize;

/// Characters that need a shell to interpret the start command
const SHELL_METACHARACTERS: &[char] = &['*', '|', '&', ';', '$', '<', '>', '"', '\''];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockerfileTemplate {
    Python,
    Node,
    Next,
    /// SPA build served by nginx
    StaticSite,
    Jvm,
    Go,
    Rust,
    Generic,
}

impl DockerfileTemplate {
    pub fn for_project(language: Option<Language>, framework: Framework) -> Self {
        match language {
            Some(Language::Python) => DockerfileTemplate::Python,
            Some(lang) if lang.is_node() => match framework {
                Framework::Next => DockerfileTemplate::Next,
                Framework::React | Framework::Vue | Framework::Angular => DockerfileTemplate::StaticSite,
                _ => DockerfileTemplate::Node,
            },
            Some(Language::Java | Language::Kotlin) => DockerfileTemplate::Jvm,
            Some(Language::Go) => DockerfileTemplate::Go,
            Some(Language::Rust) => DockerfileTemplate::Rust,
            _ => DockerfileTemplate::Generic,
        }
    }

    fn template_name(&self) -> &'static str {
        match self {
            DockerfileTemplate::Python => "python.dockerfile",
            DockerfileTemplate::Node => "node.dockerfile",
            DockerfileTemplate::Next => "next.dockerfile",
            DockerfileTemplate::StaticSite => "static-site.dockerfile",
            DockerfileTemplate::Jvm => "jvm.dockerfile",
            DockerfileTemplate::Go => "go.dockerfile",
            DockerfileTemplate::Rust => "rust.dockerfile",
            DockerfileTemplate::Generic => "generic.dockerfile",
        }
    }
}

#[derive(Debug, Serialize)]
struct DockerfileContext {
    base_image: String,
    runtime_image: String,
    port: u16,
    manifests: Vec<&'static str>,
    install_command: String,
    build_command: Option<String>,
    cmd: String,
    health_check: Option<String>,
    non_root_user: bool,
    corepack: bool,
    framework: &'static str,
    static_dir: &'static str,
    artifact: &'static str,
}

/// (build or only stage, runtime stage)
fn default_images(template: DockerfileTemplate, analysis: &RepositoryAnalysis) -> (&'static str, &'static str) {
    match template {
        DockerfileTemplate::Python => ("python:3.11-slim", "python:3.11-slim"),
        DockerfileTemplate::Node | DockerfileTemplate::Next => ("node:18-alpine", "node:18-alpine"),
        DockerfileTemplate::StaticSite => ("node:18-alpine", "nginx:alpine"),
        DockerfileTemplate::Jvm if analysis.package_manager == PackageManager::Maven => {
            ("maven:3.9-eclipse-temurin-17", "eclipse-temurin:17-jre-alpine")
        }
        DockerfileTemplate::Jvm => ("gradle:8-jdk17", "eclipse-temurin:17-jre-alpine"),
        DockerfileTemplate::Go => ("golang:1.21-alpine", "alpine:3.19"),
        DockerfileTemplate::Rust => ("rust:1.75-slim", "debian:bookworm-slim"),
        DockerfileTemplate::Generic => match analysis.language {
            Some(Language::Ruby) => ("ruby:3.2-slim", "ruby:3.2-slim"),
            Some(Language::Php) => ("php:8.2-cli", "php:8.2-cli"),
            _ => ("debian:bookworm-slim", "debian:bookworm-slim"),
        },
    }
}

/// Files copied ahead of the sources so dependency layers stay cached
fn manifests(analysis: &RepositoryAnalysis) -> Vec<&'static str> {
    match analysis.package_manager {
        PackageManager::Pip => vec!["requirements.txt"],
        PackageManager::Pipenv => vec!["Pipfile", "Pipfile.lock*"],
        PackageManager::Poetry => vec!["pyproject.toml", "poetry.lock*"],
        PackageManager::Npm => vec!["package*.json"],
        PackageManager::Yarn => vec!["package*.json", "yarn.lock*"],
        PackageManager::Pnpm => vec!["package*.json", "pnpm-lock.yaml*"],
        PackageManager::Bundle => vec!["Gemfile", "Gemfile.lock*"],
        PackageManager::Composer => vec!["composer.json", "composer.lock*"],
        _ => Vec::new(),
    }
}

fn install_command(analysis: &RepositoryAnalysis) -> String {
    match analysis.package_manager {
        PackageManager::Pip => "pip install --no-cache-dir -r requirements.txt".to_string(),
        PackageManager::Pipenv => "pip install --no-cache-dir pipenv && pipenv install --system --deploy".to_string(),
        PackageManager::Poetry => {
            "pip install --no-cache-dir poetry && poetry config virtualenvs.create false && poetry install --no-root"
                .to_string()
        }
        PackageManager::Composer => {
            "curl -sS https://getcomposer.org/installer | php -- --install-dir=/usr/local/bin --filename=composer \
             && composer install --no-dev"
                .to_string()
        }
        _ => analysis.commands.install.clone(),
    }
}

/// Exec-form `CMD` unless the command relies on shell features
pub fn cmd_instruction(command: &str) -> String {
    if command.contains(SHELL_METACHARACTERS) {
        return format!("CMD {}", command);
    }

    let args: Vec<&str> = command.split_whitespace().collect();
    match serde_json::to_string(&args) {
        Ok(json) => format!("CMD {}", json.replace("\",\"", "\", \"")),
        Err(_) => format!("CMD {}", command),
    }
}

fn context(analysis: &RepositoryAnalysis, config: &GenerationConfig, template: DockerfileTemplate) -> DockerfileContext {
    let (base_image, runtime_image) = default_images(template, analysis);
    let maven = analysis.package_manager == PackageManager::Maven;

    let build_command = match template {
        DockerfileTemplate::Next | DockerfileTemplate::StaticSite => Some(analysis.commands.build.clone()),
        DockerfileTemplate::Node if analysis.build_tools.contains("npm build") => Some(analysis.commands.build.clone()),
        DockerfileTemplate::Jvm if maven => Some("mvn -q package -DskipTests".to_string()),
        DockerfileTemplate::Jvm => Some("gradle build -x test --no-daemon".to_string()),
        _ => None,
    };

    let health_check = config.include_health_check.then(|| match template {
        // nginx:alpine ships wget but not curl
        DockerfileTemplate::StaticSite => {
            format!("wget --no-verbose --tries=1 --spider http://localhost:{}/ || exit 1", analysis.port)
        }
        _ => analysis.health_check.clone(),
    });

    DockerfileContext {
        base_image: config.base_image_override.clone().unwrap_or_else(|| base_image.to_string()),
        runtime_image: runtime_image.to_string(),
        port: analysis.port,
        manifests: manifests(analysis),
        install_command: install_command(analysis),
        build_command,
        cmd: cmd_instruction(&analysis.commands.start),
        health_check,
        non_root_user: config.non_root_user,
        corepack: matches!(analysis.package_manager, PackageManager::Yarn | PackageManager::Pnpm),
        framework: analysis.framework.as_str(),
        static_dir: if analysis.framework == Framework::React { "build" } else { "dist" },
        artifact: if maven { "target/*.jar" } else { "build/libs/*.jar" },
    }
}

/// Generate a Dockerfile based on repository analysis
pub fn generate(analysis: &RepositoryAnalysis, config: &GenerationConfig) -> Result<String> {
    let template = DockerfileTemplate::for_project(analysis.language, analysis.framework);
    log::debug!("Rendering Dockerfile from {:?} template", template);

    let body = templates::render(template.template_name(), &context(analysis, config, template))?;
    Ok(format!(
        "# Generated by repo-containerizer for {} ({} / {})\n{}",
        analysis.project_name,
        analysis.language_name(),
        analysis.framework,
        body
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{analyze_snapshot, RepositorySnapshot};
    use crate::config::AnalysisConfig;

    fn analysis(files: &[&str], contents: &[(&str, &str)]) -> RepositoryAnalysis {
        let snapshot = RepositorySnapshot::new(
            "demo",
            files.iter().map(|s| s.to_string()).collect(),
            contents.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        );
        analyze_snapshot(&snapshot, &AnalysisConfig::default())
    }

    #[test]
    fn test_flask_dockerfile() {
        let analysis = analysis(
            &["requirements.txt", "app.py"],
            &[("requirements.txt", "flask==2.0.0\n"), ("app.py", "app.run(port=5000)")],
        );
        let dockerfile = generate(&analysis, &GenerationConfig::default()).unwrap();

        assert!(dockerfile.starts_with("# Generated by repo-containerizer for demo (Python / flask)"));
        assert!(dockerfile.contains("FROM python:3.11-slim"));
        assert!(dockerfile.contains("COPY requirements.txt ./"));
        assert!(dockerfile.contains("RUN pip install --no-cache-dir -r requirements.txt"));
        assert!(dockerfile.contains("USER appuser"));
        assert!(dockerfile.contains("EXPOSE 5000"));
        assert!(dockerfile.contains("CMD curl -f http://localhost:5000/health || exit 1"));
        assert!(dockerfile.contains(r#"CMD ["python", "app.py"]"#));
    }

    #[test]
    fn test_options_disable_user_and_healthcheck() {
        let analysis = analysis(&["main.go", "go.mod"], &[("go.mod", "module x\n\nrequire github.com/gin-gonic/gin v1.9.1\n")]);
        let config = GenerationConfig {
            base_image_override: Some("golang:1.22-alpine".to_string()),
            include_health_check: false,
            non_root_user: false,
            include_databases: true,
        };
        let dockerfile = generate(&analysis, &config).unwrap();

        assert!(dockerfile.contains("FROM golang:1.22-alpine AS builder"));
        assert!(dockerfile.contains("FROM alpine:3.19 AS runner"));
        assert!(!dockerfile.contains("HEALTHCHECK"));
        assert!(!dockerfile.contains("USER appuser"));
        assert!(dockerfile.contains(r#"CMD ["./main"]"#));
    }

    #[test]
    fn test_react_uses_nginx() {
        let analysis = analysis(
            &["package.json", "src/App.jsx", "src/index.jsx", "public/index.html"],
            &[("package.json", r#"{"dependencies": {"react": "18"}, "scripts": {"build": "react-scripts build"}}"#)],
        );
        let dockerfile = generate(&analysis, &GenerationConfig::default()).unwrap();

        assert!(dockerfile.contains("FROM nginx:alpine AS runner"));
        assert!(dockerfile.contains("COPY --from=builder /app/build /usr/share/nginx/html"));
        assert!(dockerfile.contains("RUN npm run build"));
        assert!(dockerfile.contains("wget --no-verbose --tries=1 --spider http://localhost:3000/"));
    }

    #[test]
    fn test_spring_gradle() {
        let analysis = analysis(
            &["build.gradle", "src/main/java/demo/Application.java"],
            &[("build.gradle", "implementation 'org.springframework.boot:spring-boot-starter-web'")],
        );
        let dockerfile = generate(&analysis, &GenerationConfig::default()).unwrap();

        assert!(dockerfile.contains("FROM gradle:8-jdk17 AS builder"));
        assert!(dockerfile.contains("COPY --from=builder /app/build/libs/*.jar app.jar"));
        assert!(dockerfile.contains("/actuator/health"));
    }

    #[test]
    fn test_unknown_language_falls_back_to_generic() {
        let analysis = analysis(&["README.md"], &[]);
        let dockerfile = generate(&analysis, &GenerationConfig::default()).unwrap();

        assert!(dockerfile.contains("FROM debian:bookworm-slim"));
        assert!(dockerfile.contains("CMD echo \"No start command available\""));
        assert!(dockerfile.contains("EXPOSE 8080"));
    }

    fn installs_curl(dockerfile: &str) -> bool {
        dockerfile
            .lines()
            .any(|line| line.trim() == "curl \\" || line.trim() == "RUN apk add --no-cache curl")
    }

    #[test]
    fn test_curl_health_checks_have_curl_installed() {
        let projects = [
            analysis(&["requirements.txt", "app.py"], &[("requirements.txt", "flask\n")]),
            analysis(&["manage.py", "requirements.txt", "settings.py"], &[("requirements.txt", "django\n")]),
            analysis(&["package.json", "server.js", "routes.js"], &[("package.json", r#"{"dependencies": {"express": "4"}}"#)]),
            analysis(&["package.json", "pages/index.js", "pages/about.js"], &[("package.json", r#"{"dependencies": {"next": "14"}}"#)]),
            analysis(
                &["build.gradle", "src/main/java/demo/Application.java"],
                &[("build.gradle", "org.springframework.boot")],
            ),
            analysis(&["Cargo.toml", "src/main.rs", "src/lib.rs"], &[("Cargo.toml", "[dependencies]\nactix-web = \"4\"\n")]),
            analysis(&["Gemfile", "app.rb", "lib/routes.rb"], &[("Gemfile", "gem 'sinatra'\n")]),
            analysis(&["composer.json", "index.php", "src/Kernel.php"], &[("composer.json", "{}")]),
            analysis(&["README.md"], &[]),
        ];

        for project in &projects {
            let dockerfile = generate(project, &GenerationConfig::default()).unwrap();
            assert!(dockerfile.contains("HEALTHCHECK"), "{}", dockerfile);
            if dockerfile.contains("CMD curl") {
                assert!(installs_curl(&dockerfile), "curl health check without curl:\n{}", dockerfile);
            }
        }
    }

    #[test]
    fn test_ruby_image_installs_curl() {
        let analysis = analysis(&["Gemfile", "app.rb", "lib/routes.rb"], &[("Gemfile", "gem 'sinatra'\n")]);
        let dockerfile = generate(&analysis, &GenerationConfig::default()).unwrap();

        assert!(dockerfile.contains("FROM ruby:3.2-slim"));
        assert!(dockerfile.contains("CMD curl -f http://localhost:"));
        assert!(installs_curl(&dockerfile));
    }

    #[test]
    fn test_cmd_instruction() {
        assert_eq!(cmd_instruction("npm start"), r#"CMD ["npm", "start"]"#);
        assert_eq!(cmd_instruction("java -jar target/*.jar"), "CMD java -jar target/*.jar");
        assert_eq!(
            cmd_instruction("uvicorn main:app --host 0.0.0.0 --port 8000"),
            r#"CMD ["uvicorn", "main:app", "--host", "0.0.0.0", "--port", "8000"]"#
        );
    }

    #[test]
    fn test_template_selection() {
        assert_eq!(
            DockerfileTemplate::for_project(Some(Language::TypeScript), Framework::Next),
            DockerfileTemplate::Next
        );
        assert_eq!(
            DockerfileTemplate::for_project(Some(Language::JavaScript), Framework::Express),
            DockerfileTemplate::Node
        );
        assert_eq!(DockerfileTemplate::for_project(Some(Language::Ruby), Framework::Rails), DockerfileTemplate::Generic);
        assert_eq!(DockerfileTemplate::for_project(None, Framework::Generic), DockerfileTemplate::Generic);
    }
}
