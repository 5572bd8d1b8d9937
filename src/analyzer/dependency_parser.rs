use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, BTreeSet};

static ARTIFACT_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<artifactId>(.*?)</artifactId>").expect("artifactId pattern is valid"));

/// go.mod directives that look like import paths but are not dependencies
const GO_DIRECTIVES: &[&str] = &["module", "go", "toolchain", "replace", "exclude", "retract"];

/// Characters that end a package name in a requirements.txt line
const REQUIREMENT_DELIMITERS: &[char] = &['>', '=', '<', '~', '!', '[', ';', ' ', '\t'];

/// Extracts dependency names from every manifest present in `contents`.
///
/// Sources: package.json (dependencies + devDependencies), requirements.txt,
/// pom.xml artifact ids, go.mod module paths and Cargo.toml dependency tables.
/// A manifest that fails to parse contributes nothing; the others still count.
pub fn extract_dependencies(contents: &BTreeMap<String, String>) -> BTreeSet<String> {
    let mut dependencies = BTreeSet::new();

    if let Some(content) = contents.get("package.json") {
        match parse_package_json(content) {
            Some(names) => dependencies.extend(names),
            None => log::debug!("package.json is not valid JSON, skipping its dependencies"),
        }
    }

    if let Some(content) = contents.get("requirements.txt") {
        dependencies.extend(parse_requirements_txt(content));
    }

    if let Some(content) = contents.get("pom.xml") {
        dependencies.extend(parse_pom_xml(content));
    }

    if let Some(content) = contents.get("go.mod") {
        dependencies.extend(parse_go_mod(content));
    }

    if let Some(content) = contents.get("Cargo.toml") {
        match parse_cargo_toml(content) {
            Some(names) => dependencies.extend(names),
            None => log::debug!("Cargo.toml is not valid TOML, skipping its dependencies"),
        }
    }

    log::debug!("Extracted {} dependencies", dependencies.len());
    dependencies
}

/// Keys of `dependencies` and `devDependencies`; `None` if the document is not JSON
pub fn parse_package_json(content: &str) -> Option<Vec<String>> {
    let package: JsonValue = serde_json::from_str(content).ok()?;

    let names = ["dependencies", "devDependencies"]
        .iter()
        .filter_map(|section| package.get(section).and_then(|deps| deps.as_object()))
        .flat_map(|deps| deps.keys().cloned())
        .collect();

    Some(names)
}

/// Package names from requirements.txt with version specifiers stripped
pub fn parse_requirements_txt(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('-'))
        .filter_map(|line| {
            let name = line.split(REQUIREMENT_DELIMITERS).next().unwrap_or("").trim();
            (!name.is_empty()).then(|| name.to_string())
        })
        .collect()
}

/// Every `<artifactId>`, including the project's own and its plugins
pub fn parse_pom_xml(content: &str) -> Vec<String> {
    ARTIFACT_ID
        .captures_iter(content)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Module paths from go.mod require lines (block or single-line form)
pub fn parse_go_mod(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| !line.starts_with("require") && !line.contains("//"))
        .filter(|line| line.contains('/'))
        .filter_map(|line| line.split_whitespace().next())
        .filter(|token| !GO_DIRECTIVES.contains(token))
        .map(str::to_string)
        .collect()
}

/// Keys of the Cargo dependency tables; `None` if the document is not TOML
pub fn parse_cargo_toml(content: &str) -> Option<Vec<String>> {
    let manifest: toml::Value = toml::from_str(content).ok()?;

    let names = ["dependencies", "dev-dependencies", "build-dependencies"]
        .iter()
        .filter_map(|section| manifest.get(section).and_then(|deps| deps.as_table()))
        .flat_map(|deps| deps.keys().cloned())
        .collect();

    Some(names)
}
