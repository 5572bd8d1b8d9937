use serde::{Deserialize, Serialize};
use std::fmt;

/// Languages recognised by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Java,
    Kotlin,
    Go,
    Rust,
    #[serde(rename = "C++")]
    Cpp,
    C,
    #[serde(rename = "C#")]
    CSharp,
    #[serde(rename = "PHP")]
    Php,
    Ruby,
    Swift,
    Dart,
    Scala,
    Clojure,
    R,
    Shell,
    #[serde(rename = "YAML")]
    Yaml,
    #[serde(rename = "JSON")]
    Json,
    #[serde(rename = "XML")]
    Xml,
    #[serde(rename = "HTML")]
    Html,
    #[serde(rename = "CSS")]
    Css,
    #[serde(rename = "SCSS")]
    Scss,
    #[serde(rename = "SASS")]
    Sass,
    #[serde(rename = "LESS")]
    Less,
    #[serde(rename = "SQL")]
    Sql,
    Dockerfile,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Java => "Java",
            Language::Kotlin => "Kotlin",
            Language::Go => "Go",
            Language::Rust => "Rust",
            Language::Cpp => "C++",
            Language::C => "C",
            Language::CSharp => "C#",
            Language::Php => "PHP",
            Language::Ruby => "Ruby",
            Language::Swift => "Swift",
            Language::Dart => "Dart",
            Language::Scala => "Scala",
            Language::Clojure => "Clojure",
            Language::R => "R",
            Language::Shell => "Shell",
            Language::Yaml => "YAML",
            Language::Json => "JSON",
            Language::Xml => "XML",
            Language::Html => "HTML",
            Language::Css => "CSS",
            Language::Scss => "SCSS",
            Language::Sass => "SASS",
            Language::Less => "LESS",
            Language::Sql => "SQL",
            Language::Dockerfile => "Dockerfile",
        }
    }

    /// Looks up a lowercase extension (without the dot)
    pub fn from_extension(extension: &str) -> Option<Language> {
        let language = match extension {
            "py" => Language::Python,
            "js" | "jsx" => Language::JavaScript,
            "ts" | "tsx" => Language::TypeScript,
            "java" => Language::Java,
            "kt" => Language::Kotlin,
            "go" => Language::Go,
            "rs" => Language::Rust,
            "cpp" => Language::Cpp,
            "c" => Language::C,
            "cs" => Language::CSharp,
            "php" => Language::Php,
            "rb" => Language::Ruby,
            "swift" => Language::Swift,
            "dart" => Language::Dart,
            "scala" => Language::Scala,
            "clj" => Language::Clojure,
            "r" => Language::R,
            "sh" => Language::Shell,
            "yml" | "yaml" => Language::Yaml,
            "json" => Language::Json,
            "xml" => Language::Xml,
            "html" => Language::Html,
            "css" => Language::Css,
            "scss" => Language::Scss,
            "sass" => Language::Sass,
            "less" => Language::Less,
            "sql" => Language::Sql,
            "dockerfile" => Language::Dockerfile,
            _ => return None,
        };
        Some(language)
    }

    /// Parses a display name or common alias, case-insensitively
    pub fn from_name(name: &str) -> Option<Language> {
        let language = match name.to_lowercase().as_str() {
            "python" | "py" => Language::Python,
            "javascript" | "js" | "node" => Language::JavaScript,
            "typescript" | "ts" => Language::TypeScript,
            "java" => Language::Java,
            "kotlin" => Language::Kotlin,
            "go" | "golang" => Language::Go,
            "rust" => Language::Rust,
            "c++" | "cpp" => Language::Cpp,
            "c" => Language::C,
            "c#" | "csharp" => Language::CSharp,
            "php" => Language::Php,
            "ruby" => Language::Ruby,
            other => return Self::from_extension(other),
        };
        Some(language)
    }

    /// JavaScript and TypeScript share the Node toolchain
    pub fn is_node(&self) -> bool {
        matches!(self, Language::JavaScript | Language::TypeScript)
    }

    pub fn all() -> &'static [Language] {
        &[
            Language::Python,
            Language::JavaScript,
            Language::TypeScript,
            Language::Java,
            Language::Kotlin,
            Language::Go,
            Language::Rust,
            Language::Cpp,
            Language::C,
            Language::CSharp,
            Language::Php,
            Language::Ruby,
            Language::Swift,
            Language::Dart,
            Language::Scala,
            Language::Clojure,
            Language::R,
            Language::Shell,
            Language::Yaml,
            Language::Json,
            Language::Xml,
            Language::Html,
            Language::Css,
            Language::Scss,
            Language::Sass,
            Language::Less,
            Language::Sql,
            Language::Dockerfile,
        ]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a single path by its (lowercased) extension.
///
/// A file literally named `Dockerfile` has no extension but still counts.
pub fn classify_file(path: &str) -> Option<Language> {
    let file_name = path.rsplit('/').next().unwrap_or(path);

    if file_name == "Dockerfile" {
        return Some(Language::Dockerfile);
    }

    // A leading dot marks a hidden file, not an extension (".env")
    let (stem, extension) = file_name.rsplit_once('.')?;
    if stem.is_empty() {
        return None;
    }
    Language::from_extension(&extension.to_lowercase())
}

/// Counts recognised files per language, in order of first appearance
pub fn tally_languages(files: &[String]) -> Vec<(Language, usize)> {
    let mut tally: Vec<(Language, usize)> = Vec::new();

    for file in files {
        if let Some(language) = classify_file(file) {
            match tally.iter_mut().find(|(lang, _)| *lang == language) {
                Some((_, count)) => *count += 1,
                None => tally.push((language, 1)),
            }
        }
    }

    tally
}

/// Picks the language with the most files.
///
/// Ties go to the language whose first file appears earliest in `files`.
/// Returns `None` when no file has a recognised extension.
pub fn classify_language(files: &[String]) -> Option<Language> {
    let tally = tally_languages(files);
    log::debug!("Language tally: {:?}", tally);

    let mut winner: Option<(Language, usize)> = None;
    for (language, count) in tally {
        match winner {
            Some((_, best)) if count <= best => {}
            _ => winner = Some((language, count)),
        }
    }

    winner.map(|(language, _)| language)
}
