use crate::analyzer::framework_detector::Framework;
use crate::analyzer::language_detector::Language;
use crate::analyzer::package_manager::PackageManager;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The four canonical lifecycle commands of a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSet {
    pub install: String,
    pub build: String,
    pub start: String,
    pub test: String,
}

impl CommandSet {
    fn new(install: impl Into<String>, build: impl Into<String>, start: impl Into<String>, test: impl Into<String>) -> Self {
        Self {
            install: install.into(),
            build: build.into(),
            start: start.into(),
            test: test.into(),
        }
    }

    fn unavailable() -> Self {
        Self::new(
            "echo \"No install command available\"",
            "echo \"No build command available\"",
            "echo \"No start command available\"",
            "echo \"No test command available\"",
        )
    }
}

/// Command-line name of the Node package manager, npm unless yarn/pnpm was detected
fn node_cli(package_manager: PackageManager) -> &'static str {
    if package_manager.is_node() {
        package_manager.as_str()
    } else {
        "npm"
    }
}

fn base_commands(language: Option<Language>, package_manager: PackageManager) -> CommandSet {
    let Some(language) = language else {
        return CommandSet::unavailable();
    };

    match language {
        Language::Python => {
            let install = match package_manager {
                PackageManager::Pipenv => "pipenv install",
                PackageManager::Poetry => "poetry install",
                _ => "pip install -r requirements.txt",
            };
            CommandSet::new(install, "python setup.py build", "python main.py", "python -m pytest")
        }
        Language::JavaScript | Language::TypeScript => {
            let pm = node_cli(package_manager);
            CommandSet::new(
                format!("{} install", pm),
                format!("{} run build", pm),
                format!("{} start", pm),
                format!("{} test", pm),
            )
        }
        Language::Java | Language::Kotlin => {
            if package_manager == PackageManager::Maven {
                CommandSet::new("mvn install", "mvn package", "java -jar target/*.jar", "mvn test")
            } else {
                CommandSet::new("gradle build", "gradle build", "java -jar build/libs/*.jar", "gradle test")
            }
        }
        Language::Go => CommandSet::new("go mod download", "go build -o main .", "./main", "go test ./..."),
        Language::Rust => CommandSet::new("cargo fetch", "cargo build --release", "cargo run --release", "cargo test"),
        Language::Ruby => CommandSet::new(
            "bundle install",
            "echo \"No build command available\"",
            "bundle exec ruby app.rb",
            "bundle exec rspec",
        ),
        Language::Php => CommandSet::new(
            "composer install",
            "echo \"No build command available\"",
            "php -S 0.0.0.0:8000 -t public",
            "vendor/bin/phpunit",
        ),
        _ => CommandSet::unavailable(),
    }
}

fn apply_framework_overrides(commands: &mut CommandSet, framework: Framework, package_manager: PackageManager) {
    let pm = node_cli(package_manager);

    match framework {
        Framework::Django => {
            commands.start = "python manage.py runserver 0.0.0.0:8000".into();
            commands.test = "python manage.py test".into();
        }
        Framework::Flask => {
            commands.start = "python app.py".into();
            commands.test = "python -m pytest".into();
        }
        Framework::FastApi => {
            commands.start = "uvicorn main:app --host 0.0.0.0 --port 8000".into();
            commands.test = "python -m pytest".into();
        }
        Framework::Express => {
            commands.start = "node index.js".into();
            commands.test = format!("{} test", pm);
        }
        Framework::Next => {
            commands.start = format!("{} run start", pm);
            commands.build = format!("{} run build", pm);
        }
        Framework::React => {
            commands.start = format!("{} start", pm);
            commands.build = format!("{} run build", pm);
        }
        Framework::Spring => {
            // jar location follows the build tool chosen by the base table
            if !commands.start.starts_with("java -jar") {
                commands.start = "java -jar target/*.jar".into();
            }
        }
        Framework::Gin => {
            commands.start = "./main".into();
            commands.test = "go test ./...".into();
        }
        Framework::Rails => {
            commands.start = "bundle exec rails server -b 0.0.0.0".into();
            commands.test = "bundle exec rails test".into();
        }
        Framework::Laravel => {
            commands.start = "php artisan serve --host=0.0.0.0 --port=8000".into();
            commands.test = "php artisan test".into();
        }
        _ => {}
    }
}

/// Install/build/start/test commands for the resolved project shape.
///
/// Precedence, lowest first: the language table, framework conventions, then
/// the `build`/`test`/`start` scripts package.json actually defines (Node
/// package managers only).
pub fn generate_run_commands(
    language: Option<Language>,
    framework: Framework,
    package_manager: PackageManager,
    scripts: &BTreeSet<String>,
) -> CommandSet {
    let mut commands = base_commands(language, package_manager);
    apply_framework_overrides(&mut commands, framework, package_manager);

    if package_manager.is_node() {
        let pm = package_manager.as_str();
        if scripts.contains("build") {
            commands.build = format!("{} run build", pm);
        }
        if scripts.contains("test") {
            commands.test = format!("{} test", pm);
        }
        if scripts.contains("start") {
            commands.start = format!("{} start", pm);
        }
    }

    log::debug!("Run commands: {:?}", commands);
    commands
}

fn curl(port: u16, path: &str) -> String {
    format!("curl -f http://localhost:{}{} || exit 1", port, path)
}

fn wget(port: u16, path: &str) -> String {
    format!("wget --no-verbose --tries=1 --spider http://localhost:{}{} || exit 1", port, path)
}

/// Single-line container health check against `localhost:<port>`
pub fn generate_health_check_command(language: Option<Language>, framework: Framework, port: u16) -> String {
    match (language, framework) {
        (Some(Language::Python), Framework::Django) => curl(port, "/"),
        (Some(Language::Python), Framework::Flask | Framework::FastApi) => curl(port, "/health"),
        (Some(Language::JavaScript | Language::TypeScript), Framework::Express) => curl(port, "/health"),
        (Some(Language::JavaScript | Language::TypeScript), Framework::Next) => curl(port, "/api/health"),
        (Some(Language::Java | Language::Kotlin), Framework::Spring) => curl(port, "/actuator/health"),
        (Some(Language::Java | Language::Kotlin), _) => curl(port, "/health"),
        (Some(Language::Go), Framework::Gin) => wget(port, "/health"),
        (Some(Language::Go), _) => wget(port, ""),
        _ => curl(port, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scripts(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_django_overrides() {
        let cmds = generate_run_commands(Some(Language::Python), Framework::Django, PackageManager::Pip, &scripts(&[]));
        assert_eq!(cmds.install, "pip install -r requirements.txt");
        assert_eq!(cmds.build, "python setup.py build");
        assert_eq!(cmds.start, "python manage.py runserver 0.0.0.0:8000");
        assert_eq!(cmds.test, "python manage.py test");
    }

    #[test]
    fn test_python_install_follows_package_manager() {
        let poetry = generate_run_commands(Some(Language::Python), Framework::FastApi, PackageManager::Poetry, &scripts(&[]));
        assert_eq!(poetry.install, "poetry install");
        assert_eq!(poetry.start, "uvicorn main:app --host 0.0.0.0 --port 8000");

        let pipenv = generate_run_commands(Some(Language::Python), Framework::Generic, PackageManager::Pipenv, &scripts(&[]));
        assert_eq!(pipenv.install, "pipenv install");
        assert_eq!(pipenv.start, "python main.py");
    }

    #[test]
    fn test_node_uses_detected_manager() {
        let cmds = generate_run_commands(Some(Language::TypeScript), Framework::Generic, PackageManager::Yarn, &scripts(&[]));
        assert_eq!(
            cmds,
            CommandSet::new("yarn install", "yarn run build", "yarn start", "yarn test")
        );
    }

    #[test]
    fn test_scripts_override_framework_conventions() {
        let none = generate_run_commands(Some(Language::JavaScript), Framework::Express, PackageManager::Npm, &scripts(&[]));
        assert_eq!(none.start, "node index.js");

        let with_start = generate_run_commands(
            Some(Language::JavaScript),
            Framework::Express,
            PackageManager::Pnpm,
            &scripts(&["start", "test"]),
        );
        assert_eq!(with_start.start, "pnpm start");
        assert_eq!(with_start.test, "pnpm test");
        assert_eq!(with_start.install, "pnpm install");
    }

    #[test]
    fn test_jvm_build_tools() {
        let maven = generate_run_commands(Some(Language::Java), Framework::Spring, PackageManager::Maven, &scripts(&[]));
        assert_eq!(maven, CommandSet::new("mvn install", "mvn package", "java -jar target/*.jar", "mvn test"));

        let gradle = generate_run_commands(Some(Language::Kotlin), Framework::Spring, PackageManager::Gradle, &scripts(&[]));
        assert_eq!(gradle.install, "gradle build");
        assert_eq!(gradle.start, "java -jar build/libs/*.jar");
        assert_eq!(gradle.test, "gradle test");
    }

    #[test]
    fn test_go_and_rust() {
        let go = generate_run_commands(Some(Language::Go), Framework::Gin, PackageManager::Go, &scripts(&[]));
        assert_eq!(go, CommandSet::new("go mod download", "go build -o main .", "./main", "go test ./..."));

        let rust = generate_run_commands(Some(Language::Rust), Framework::Actix, PackageManager::Cargo, &scripts(&[]));
        assert_eq!(rust.build, "cargo build --release");
        assert_eq!(rust.test, "cargo test");
    }

    #[test]
    fn test_unknown_language() {
        let cmds = generate_run_commands(None, Framework::Generic, PackageManager::Unknown, &scripts(&["build"]));
        assert_eq!(cmds, CommandSet::unavailable());
        assert_eq!(cmds.test, "echo \"No test command available\"");

        let yaml = generate_run_commands(Some(Language::Yaml), Framework::Generic, PackageManager::Unknown, &scripts(&[]));
        assert_eq!(yaml, CommandSet::unavailable());
    }

    #[test]
    fn test_health_checks() {
        assert_eq!(
            generate_health_check_command(Some(Language::Python), Framework::Flask, 5000),
            "curl -f http://localhost:5000/health || exit 1"
        );
        assert_eq!(
            generate_health_check_command(Some(Language::Python), Framework::Django, 8001),
            "curl -f http://localhost:8001/ || exit 1"
        );
        assert_eq!(
            generate_health_check_command(Some(Language::TypeScript), Framework::Next, 3000),
            "curl -f http://localhost:3000/api/health || exit 1"
        );
        assert_eq!(
            generate_health_check_command(Some(Language::Java), Framework::Spring, 8080),
            "curl -f http://localhost:8080/actuator/health || exit 1"
        );
        assert_eq!(
            generate_health_check_command(Some(Language::Go), Framework::Generic, 9000),
            "wget --no-verbose --tries=1 --spider http://localhost:9000 || exit 1"
        );
        assert_eq!(
            generate_health_check_command(None, Framework::Generic, 8080),
            "curl -f http://localhost:8080 || exit 1"
        );
    }

    #[test]
    fn test_health_check_is_single_line() {
        for language in Language::all() {
            for framework in Framework::all() {
                let cmd = generate_health_check_command(Some(*language), *framework, 1234);
                assert!(!cmd.is_empty());
                assert!(!cmd.contains('\n'));
            }
        }
    }
}
