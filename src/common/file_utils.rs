use crate::analyzer::language_detector::{classify_file, Language};
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, ContainerizerError, GeneratorError, Result, SecurityError};
use glob::Pattern;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Hidden entries that still carry build or runtime information.
/// Dotenv files (`.env`, `.env.local`, ...) are admitted separately.
const HIDDEN_ALLOWLIST: &[&str] = &[".github", ".circleci", ".travis.yml", ".babelrc"];

/// Manifests and configuration files read whenever present
const CONTENT_FILE_NAMES: &[&str] = &[
    "package.json",
    "requirements.txt",
    "Pipfile",
    "pyproject.toml",
    "setup.py",
    "pom.xml",
    "build.gradle",
    "Cargo.toml",
    "go.mod",
    "composer.json",
    "Gemfile",
    "Dockerfile",
    "docker-compose.yml",
    "docker-compose.yaml",
    "application.properties",
    "application.yml",
    "application.yaml",
];

/// File stems that usually hold an entry point or runtime settings
const ENTRY_POINT_HINTS: &[&str] = &["main", "app", "server", "index", "settings", "config"];

/// Validates a project path and ensures security
pub fn validate_project_path(path: &Path) -> Result<PathBuf> {
    // Fall back to the given path when canonicalization is refused but the path exists
    let canonical = match path.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            if path.exists() {
                path.to_path_buf()
            } else {
                return Err(SecurityError::InvalidPath(format!("Invalid path '{}': {}", path.display(), e)).into());
            }
        }
    };

    if !canonical.is_dir() {
        return Err(SecurityError::InvalidPath(format!("Path is not a directory: {}", canonical.display())).into());
    }

    Ok(canonical)
}

fn compile_ignore_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).map_err(|e| {
                ContainerizerError::from(AnalysisError::InvalidIgnorePattern {
                    pattern: pattern.clone(),
                    reason: e.msg.to_string(),
                })
            })
        })
        .collect()
}

/// `/`-joined path of `path` relative to `root`
pub fn relative_path_string(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Checks if a directory entry should be skipped along with everything below it
fn is_ignored(entry: &DirEntry, root: &Path, patterns: &[Pattern]) -> bool {
    if entry.depth() == 0 {
        return false;
    }

    let lossy = entry.file_name().to_string_lossy();
    let name: &str = &lossy;
    let is_dotenv = entry.file_type().is_file() && is_dotenv_name(name);
    if name.starts_with('.') && !is_dotenv && !HIDDEN_ALLOWLIST.contains(&name) {
        return true;
    }

    let relative = relative_path_string(root, entry.path());
    patterns
        .iter()
        .any(|pattern| pattern.matches(name) || pattern.matches(&relative))
}

/// Collects the repository file list as sorted, `/`-separated relative paths.
///
/// Ignored and hidden entries are pruned, files above `max_file_size` are
/// skipped and collection stops at `max_files`.
pub fn collect_repository_files(root: &Path, config: &AnalysisConfig) -> Result<Vec<String>> {
    let patterns = compile_ignore_patterns(&config.ignore_patterns)?;
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_ignored(e, root, &patterns))
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        if let Ok(metadata) = entry.metadata() {
            if metadata.len() > config.max_file_size {
                log::debug!("Skipping large file: {}", entry.path().display());
                continue;
            }
        }

        if files.len() >= config.max_files {
            log::warn!(
                "Stopped collecting files after {} entries in {}",
                config.max_files,
                root.display()
            );
            break;
        }

        files.push(relative_path_string(root, entry.path()));
    }

    log::debug!("Collected {} files", files.len());
    Ok(files)
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn is_dotenv_name(name: &str) -> bool {
    name.starts_with(".env")
}

fn is_entry_point_candidate(path: &str) -> bool {
    let is_source = matches!(
        classify_file(path),
        Some(language) if !matches!(
            language,
            Language::Yaml | Language::Json | Language::Xml | Language::Html | Language::Css
                | Language::Scss | Language::Sass | Language::Less | Language::Sql | Language::Dockerfile
        )
    );
    if !is_source {
        return false;
    }

    let stem = file_name(path).split('.').next().unwrap_or("").to_lowercase();
    ENTRY_POINT_HINTS.iter().any(|hint| stem.contains(hint))
}

/// Picks the documents worth scanning: every known manifest/config file plus
/// up to `max_source_files` entry-point-looking sources, shallowest first.
pub fn select_documents<'a>(files: &'a [String], max_source_files: usize) -> Vec<&'a String> {
    let mut selected: Vec<&String> = files
        .iter()
        .filter(|path| {
            let name = file_name(path);
            CONTENT_FILE_NAMES.contains(&name) || is_dotenv_name(name)
        })
        .collect();

    let mut sources: Vec<&String> = files
        .iter()
        .filter(|path| !selected.contains(path) && is_entry_point_candidate(path))
        .collect();
    sources.sort_by(|a, b| {
        a.matches('/')
            .count()
            .cmp(&b.matches('/').count())
            .then_with(|| a.cmp(b))
    });
    selected.extend(sources.into_iter().take(max_source_files));

    selected
}

/// Cuts `content` to at most `max_chars` characters
pub fn truncate_chars(mut content: String, max_chars: usize) -> String {
    let cut = content.char_indices().nth(max_chars).map(|(index, _)| index);
    if let Some(index) = cut {
        content.truncate(index);
    }
    content
}

/// Reads the selected documents in parallel into a path -> text map.
///
/// Unreadable or non-UTF-8 files are logged and left out.
pub fn read_content_map(root: &Path, files: &[String], config: &AnalysisConfig) -> BTreeMap<String, String> {
    select_documents(files, config.max_source_files)
        .par_iter()
        .filter_map(|relative| match read_file_safe(&root.join(relative.as_str()), config.max_file_size) {
            Ok(content) => Some(((*relative).clone(), truncate_chars(content, config.max_content_chars))),
            Err(e) => {
                log::warn!("Skipping unreadable file {}: {}", relative, e);
                None
            }
        })
        .collect()
}

/// Reads file content safely with size limits
pub fn read_file_safe(path: &Path, max_size: u64) -> Result<String> {
    let metadata = fs::metadata(path)?;

    if metadata.len() > max_size {
        return Err(SecurityError::InvalidPath(format!("File too large: {}", path.display())).into());
    }

    Ok(fs::read_to_string(path)?)
}

/// Fails on the first target that already exists, unless `overwrite`.
///
/// Run before writing a batch so a conflict leaves nothing half-written.
pub fn check_output_targets<P: AsRef<Path>>(targets: &[P], overwrite: bool) -> Result<()> {
    if overwrite {
        return Ok(());
    }
    match targets.iter().map(AsRef::as_ref).find(|path| path.exists()) {
        Some(existing) => Err(GeneratorError::OutputExists { path: existing.to_path_buf() }.into()),
        None => Ok(()),
    }
}

/// Writes a generated file, refusing to replace an existing one unless `overwrite`
pub fn write_output_file(path: &Path, content: &str, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        return Err(GeneratorError::OutputExists { path: path.to_path_buf() }.into());
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|_| GeneratorError::OutputCreation { path: parent.to_path_buf() })?;
        }
    }

    fs::write(path, content)?;
    log::info!("Wrote {}", path.display());
    Ok(())
}
