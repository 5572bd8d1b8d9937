use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
    Pip,
    Pipenv,
    Poetry,
    Maven,
    Gradle,
    Cargo,
    Go,
    Composer,
    Bundle,
    Unknown,
}

impl PackageManager {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Pip => "pip",
            PackageManager::Pipenv => "pipenv",
            PackageManager::Poetry => "poetry",
            PackageManager::Maven => "maven",
            PackageManager::Gradle => "gradle",
            PackageManager::Cargo => "cargo",
            PackageManager::Go => "go",
            PackageManager::Composer => "composer",
            PackageManager::Bundle => "bundle",
            PackageManager::Unknown => "unknown",
        }
    }

    /// npm, yarn and pnpm all read package.json scripts
    pub fn is_node(&self) -> bool {
        matches!(self, PackageManager::Npm | PackageManager::Yarn | PackageManager::Pnpm)
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lookup order is the precedence order for repositories with several manifests
const PACKAGE_MANAGER_FILES: &[(&str, PackageManager)] = &[
    ("package.json", PackageManager::Npm),
    ("package-lock.json", PackageManager::Npm),
    ("yarn.lock", PackageManager::Yarn),
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("requirements.txt", PackageManager::Pip),
    ("Pipfile", PackageManager::Pipenv),
    ("pyproject.toml", PackageManager::Poetry),
    ("poetry.lock", PackageManager::Poetry),
    ("pom.xml", PackageManager::Maven),
    ("build.gradle", PackageManager::Gradle),
    ("Cargo.toml", PackageManager::Cargo),
    ("go.mod", PackageManager::Go),
    ("composer.json", PackageManager::Composer),
    ("Gemfile", PackageManager::Bundle),
];

/// First table entry present at the repository root wins
pub fn detect_package_manager(files: &[String]) -> PackageManager {
    PACKAGE_MANAGER_FILES
        .iter()
        .find(|(manifest, _)| files.iter().any(|file| file.as_str() == *manifest))
        .map(|(manifest, manager)| {
            log::debug!("Package manager {} from {}", manager, manifest);
            *manager
        })
        .unwrap_or(PackageManager::Unknown)
}
