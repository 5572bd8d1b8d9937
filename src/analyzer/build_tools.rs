use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, BTreeSet};

const BUILD_TOOL_FILES: &[(&str, &str)] = &[
    ("webpack.config.js", "webpack"),
    ("rollup.config.js", "rollup"),
    ("vite.config.js", "vite"),
    ("gulpfile.js", "gulp"),
    ("Gruntfile.js", "grunt"),
    ("tsconfig.json", "typescript"),
    ("babel.config.js", "babel"),
    (".babelrc", "babel"),
    ("Makefile", "make"),
    ("CMakeLists.txt", "cmake"),
    ("build.gradle", "gradle"),
    ("pom.xml", "maven"),
    ("Cargo.toml", "cargo"),
    ("go.mod", "go"),
    ("setup.py", "python setuptools"),
    ("pyproject.toml", "python build"),
    ("tox.ini", "tox"),
    ("Dockerfile", "docker"),
    ("docker-compose.yml", "docker-compose"),
    ("docker-compose.yaml", "docker-compose"),
    ("Jenkinsfile", "jenkins"),
    (".travis.yml", "travis-ci"),
    (".circleci/config.yml", "circleci"),
];

/// Directories whose contents identify a tool rather than a single file
const BUILD_TOOL_DIRS: &[(&str, &str)] = &[(".github/workflows/", "github-actions")];

const TRACKED_SCRIPTS: &[&str] = &["build", "test", "start"];

/// Build and CI tooling from well-known root files plus `npm <script>`
/// entries for the `build`/`test`/`start` scripts of package.json.
pub fn detect_build_tools(files: &[String], contents: &BTreeMap<String, String>) -> BTreeSet<String> {
    let mut tools = BTreeSet::new();

    for file in files {
        if let Some((_, tool)) = BUILD_TOOL_FILES.iter().find(|(name, _)| *name == file.as_str()) {
            tools.insert(tool.to_string());
        }
        if let Some((_, tool)) = BUILD_TOOL_DIRS.iter().find(|(dir, _)| file.starts_with(*dir)) {
            tools.insert(tool.to_string());
        }
    }

    for script in package_scripts(contents) {
        tools.insert(format!("npm {}", script));
    }

    log::debug!("Build tools: {:?}", tools);
    tools
}

/// Which of `build`, `test` and `start` the root package.json defines.
///
/// Empty when package.json is absent, malformed or has no scripts object.
pub fn package_scripts(contents: &BTreeMap<String, String>) -> BTreeSet<String> {
    contents
        .get("package.json")
        .and_then(|content| parse_scripts(content))
        .unwrap_or_default()
}

fn parse_scripts(content: &str) -> Option<BTreeSet<String>> {
    let package: JsonValue = serde_json::from_str(content).ok()?;
    let scripts = package.get("scripts")?.as_object()?;

    Some(
        TRACKED_SCRIPTS
            .iter()
            .filter(|script| scripts.contains_key(**script))
            .map(|script| script.to_string())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn contents(items: &[(&str, &str)]) -> BTreeMap<String, String> {
        items.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn tools(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_file_table() {
        let found = detect_build_tools(
            &files(&["Makefile", "Dockerfile", "tsconfig.json", ".babelrc", "babel.config.js"]),
            &BTreeMap::new(),
        );
        assert_eq!(found, tools(&["babel", "docker", "make", "typescript"]));

        let found = detect_build_tools(
            &files(&["setup.py", "pyproject.toml", "tox.ini", "docker-compose.yaml", ".travis.yml"]),
            &BTreeMap::new(),
        );
        assert_eq!(
            found,
            tools(&["docker-compose", "python build", "python setuptools", "tox", "travis-ci"])
        );

        let found = detect_build_tools(&files(&["docker-compose.yml"]), &BTreeMap::new());
        assert_eq!(found, tools(&["docker-compose"]));
    }

    #[test]
    fn test_ci_configuration() {
        let found = detect_build_tools(
            &files(&[".github/workflows/ci.yml", ".github/workflows/release.yml", ".circleci/config.yml", "Jenkinsfile"]),
            &BTreeMap::new(),
        );
        assert_eq!(found, tools(&["circleci", "github-actions", "jenkins"]));
    }

    #[test]
    fn test_package_scripts_become_tools() {
        let map = contents(&[(
            "package.json",
            r#"{"scripts": {"build": "tsc", "start": "node dist", "lint": "eslint ."}}"#,
        )]);
        let found = detect_build_tools(&files(&["package.json"]), &map);
        assert_eq!(found, tools(&["npm build", "npm start"]));
    }

    #[test]
    fn test_malformed_package_json_contributes_nothing() {
        let map = contents(&[("package.json", "{\"scripts\": ")]);
        assert!(package_scripts(&map).is_empty());

        let map = contents(&[("package.json", r#"{"scripts": ["build"]}"#)]);
        assert!(package_scripts(&map).is_empty());
    }

    #[test]
    fn test_nested_files_do_not_count() {
        let found = detect_build_tools(&files(&["docs/Makefile", "web/Dockerfile"]), &BTreeMap::new());
        assert!(found.is_empty());
    }
}
