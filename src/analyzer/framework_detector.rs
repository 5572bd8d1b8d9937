use crate::analyzer::indicators::IndicatorSet;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Frameworks the resolver can name.
///
/// Declaration order is the tie-break order: when two frameworks collect the
/// same number of signals, the one declared first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    // JavaScript / TypeScript
    React,
    Next,
    Express,
    Vue,
    Angular,
    Gatsby,
    Nuxt,
    // Python
    Django,
    Flask,
    FastApi,
    Tornado,
    Bottle,
    // JVM
    Spring,
    Struts,
    Wicket,
    // Rust
    Actix,
    Rocket,
    Warp,
    // Go
    Gin,
    Echo,
    Fiber,
    Gorilla,
    // PHP
    Laravel,
    Symfony,
    CodeIgniter,
    // Ruby
    Rails,
    Sinatra,
    Hanami,
    /// Nothing recognisable
    Generic,
}

impl Framework {
    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::React => "react",
            Framework::Next => "next",
            Framework::Express => "express",
            Framework::Vue => "vue",
            Framework::Angular => "angular",
            Framework::Gatsby => "gatsby",
            Framework::Nuxt => "nuxt",
            Framework::Django => "django",
            Framework::Flask => "flask",
            Framework::FastApi => "fastapi",
            Framework::Tornado => "tornado",
            Framework::Bottle => "bottle",
            Framework::Spring => "spring",
            Framework::Struts => "struts",
            Framework::Wicket => "wicket",
            Framework::Actix => "actix",
            Framework::Rocket => "rocket",
            Framework::Warp => "warp",
            Framework::Gin => "gin",
            Framework::Echo => "echo",
            Framework::Fiber => "fiber",
            Framework::Gorilla => "gorilla",
            Framework::Laravel => "laravel",
            Framework::Symfony => "symfony",
            Framework::CodeIgniter => "codeigniter",
            Framework::Rails => "rails",
            Framework::Sinatra => "sinatra",
            Framework::Hanami => "hanami",
            Framework::Generic => "generic",
        }
    }

    pub fn from_name(name: &str) -> Option<Framework> {
        Framework::all()
            .iter()
            .copied()
            .chain(std::iter::once(Framework::Generic))
            .find(|framework| framework.as_str() == name.to_lowercase())
    }

    /// Every concrete framework, in tie-break order
    pub fn all() -> &'static [Framework] {
        &[
            Framework::React,
            Framework::Next,
            Framework::Express,
            Framework::Vue,
            Framework::Angular,
            Framework::Gatsby,
            Framework::Nuxt,
            Framework::Django,
            Framework::Flask,
            Framework::FastApi,
            Framework::Tornado,
            Framework::Bottle,
            Framework::Spring,
            Framework::Struts,
            Framework::Wicket,
            Framework::Actix,
            Framework::Rocket,
            Framework::Warp,
            Framework::Gin,
            Framework::Echo,
            Framework::Fiber,
            Framework::Gorilla,
            Framework::Laravel,
            Framework::Symfony,
            Framework::CodeIgniter,
            Framework::Rails,
            Framework::Sinatra,
            Framework::Hanami,
        ]
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const NODE_FRAMEWORKS: &[(Framework, &[&str])] = &[
    (Framework::React, &["react"]),
    (Framework::Next, &["next"]),
    (Framework::Express, &["express"]),
    (Framework::Vue, &["vue"]),
    (Framework::Angular, &["angular"]),
    (Framework::Gatsby, &["gatsby"]),
    (Framework::Nuxt, &["nuxt"]),
];

const PYTHON_FRAMEWORKS: &[(Framework, &[&str])] = &[
    (Framework::Django, &["django"]),
    (Framework::Flask, &["flask"]),
    (Framework::FastApi, &["fastapi"]),
    (Framework::Tornado, &["tornado"]),
    (Framework::Bottle, &["bottle"]),
];

const JVM_FRAMEWORKS: &[(Framework, &[&str])] = &[
    (Framework::Spring, &["spring"]),
    (Framework::Struts, &["struts"]),
    (Framework::Wicket, &["wicket"]),
];

const RUST_FRAMEWORKS: &[(Framework, &[&str])] = &[
    (Framework::Actix, &["actix"]),
    (Framework::Rocket, &["rocket"]),
    (Framework::Warp, &["warp"]),
];

const GO_FRAMEWORKS: &[(Framework, &[&str])] = &[
    (Framework::Gin, &["gin"]),
    (Framework::Echo, &["echo"]),
    (Framework::Fiber, &["fiber"]),
    (Framework::Gorilla, &["gorilla"]),
];

const PHP_FRAMEWORKS: &[(Framework, &[&str])] = &[
    (Framework::Laravel, &["laravel"]),
    (Framework::Symfony, &["symfony"]),
    (Framework::CodeIgniter, &["codeigniter"]),
];

const RUBY_FRAMEWORKS: &[(Framework, &[&str])] = &[
    (Framework::Rails, &["rails"]),
    (Framework::Sinatra, &["sinatra"]),
    (Framework::Hanami, &["hanami"]),
];

/// Manifest path -> indicator table scanned in its content
const MANIFEST_INDICATORS: &[(&str, &[(Framework, &[&str])])] = &[
    ("package.json", NODE_FRAMEWORKS),
    ("requirements.txt", PYTHON_FRAMEWORKS),
    ("Pipfile", PYTHON_FRAMEWORKS),
    ("pyproject.toml", PYTHON_FRAMEWORKS),
    ("pom.xml", JVM_FRAMEWORKS),
    ("build.gradle", JVM_FRAMEWORKS),
    ("Cargo.toml", RUST_FRAMEWORKS),
    ("go.mod", GO_FRAMEWORKS),
    ("composer.json", PHP_FRAMEWORKS),
    ("Gemfile", RUBY_FRAMEWORKS),
];

/// Files whose presence alone implies a framework
const MARKER_FILES: &[(&str, Framework)] = &[
    ("manage.py", Framework::Django),
    ("app.py", Framework::Flask),
    ("main.py", Framework::FastApi),
    ("server.js", Framework::Express),
    ("index.js", Framework::Express),
    ("next.config.js", Framework::Next),
    ("gatsby-config.js", Framework::Gatsby),
    ("nuxt.config.js", Framework::Nuxt),
    ("angular.json", Framework::Angular),
    ("vue.config.js", Framework::Vue),
    ("Application.java", Framework::Spring),
    ("main.go", Framework::Gin),
    ("artisan", Framework::Laravel),
    ("config/application.rb", Framework::Rails),
];

/// Markers that settle the question on their own, whatever else is present
const DECISIVE_MARKERS: &[&str] = &["manage.py", "artisan"];

static MANIFEST_MATCHERS: Lazy<Vec<(&'static str, IndicatorSet<Framework>)>> = Lazy::new(|| {
    MANIFEST_INDICATORS
        .iter()
        .map(|(manifest, table)| {
            let set = IndicatorSet::new(table).expect("framework indicator table is valid");
            (*manifest, set)
        })
        .collect()
});

/// Collects one signal per indicator found in a known manifest and one per
/// marker file present.
pub fn collect_framework_signals(
    files: &[String],
    contents: &BTreeMap<String, String>,
) -> Vec<Framework> {
    let mut signals = Vec::new();

    for (manifest, matcher) in MANIFEST_MATCHERS.iter() {
        if let Some(content) = contents.get(*manifest) {
            for (framework, indicator) in matcher.matched_indicators(content) {
                log::debug!("{} mentions '{}' -> {}", manifest, indicator, framework);
                signals.push(framework);
            }
        }
    }

    for file in files {
        if let Some((_, framework)) = MARKER_FILES.iter().find(|(marker, _)| *marker == file.as_str()) {
            log::debug!("Marker file {} -> {}", file, framework);
            signals.push(*framework);
        }
    }

    signals
}

/// Resolves the single most likely framework, `Framework::Generic` if nothing matched.
///
/// Highest signal count wins; ties fall to declaration order of [`Framework`].
pub fn resolve_framework(files: &[String], contents: &BTreeMap<String, String>) -> Framework {
    for marker in DECISIVE_MARKERS {
        if files.iter().any(|file| file.as_str() == *marker) {
            if let Some((_, framework)) = MARKER_FILES.iter().find(|(name, _)| name == marker) {
                log::debug!("Decisive marker {} -> {}", marker, framework);
                return *framework;
            }
        }
    }

    let mut tally: BTreeMap<Framework, usize> = BTreeMap::new();
    for framework in collect_framework_signals(files, contents) {
        *tally.entry(framework).or_insert(0) += 1;
    }
    log::debug!("Framework tally: {:?}", tally);

    // BTreeMap iterates in declaration order, so keeping the first maximum
    // implements the tie-break.
    let mut winner: Option<(Framework, usize)> = None;
    for (framework, count) in tally {
        match winner {
            Some((_, best)) if count <= best => {}
            _ => winner = Some((framework, count)),
        }
    }

    winner.map(|(framework, _)| framework).unwrap_or(Framework::Generic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn files(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn contents(items: &[(&str, &str)]) -> BTreeMap<String, String> {
        items.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_empty_input_is_generic() {
        assert_eq!(resolve_framework(&[], &BTreeMap::new()), Framework::Generic);
    }

    #[test]
    fn test_flask_from_requirements_and_marker() {
        let files = files(&["requirements.txt", "app.py"]);
        let contents = contents(&[("requirements.txt", "Flask==2.0.0\nrequests>=2.25.0\n")]);
        assert_eq!(resolve_framework(&files, &contents), Framework::Flask);
    }

    #[test]
    fn test_next_outweighs_react() {
        let files = files(&["package.json", "next.config.js"]);
        let contents = contents(&[(
            "package.json",
            r#"{"dependencies": {"next": "13.0.0", "react": "18.2.0", "react-dom": "18.2.0"}}"#,
        )]);
        assert_eq!(resolve_framework(&files, &contents), Framework::Next);
    }

    #[test]
    fn test_tie_uses_declaration_order() {
        // express (package.json) vs vue (vue.config.js): one signal each
        let files = files(&["package.json", "vue.config.js"]);
        let contents = contents(&[("package.json", r#"{"dependencies": {"express": "4"}}"#)]);
        assert_eq!(resolve_framework(&files, &contents), Framework::Express);
    }

    #[test]
    fn test_manage_py_is_decisive() {
        let files = files(&["requirements.txt", "manage.py", "app.py"]);
        let contents = contents(&[("requirements.txt", "flask\nfastapi\nflask-cors\n")]);
        assert_eq!(resolve_framework(&files, &contents), Framework::Django);
    }

    #[test]
    fn test_nested_marker_is_ignored() {
        let files = files(&["tools/manage.py"]);
        assert_eq!(resolve_framework(&files, &BTreeMap::new()), Framework::Generic);
    }

    #[test]
    fn test_nested_rails_marker() {
        let files = files(&["Gemfile", "config/application.rb"]);
        let contents = contents(&[("Gemfile", "gem 'rails', '~> 7.0'\n")]);
        assert_eq!(resolve_framework(&files, &contents), Framework::Rails);
    }

    #[test]
    fn test_content_of_unknown_files_is_ignored() {
        let contents = contents(&[("README.md", "Built with django and flask")]);
        assert_eq!(resolve_framework(&[], &contents), Framework::Generic);
    }

    #[test]
    fn test_name_round_trip() {
        for framework in Framework::all() {
            assert_eq!(Framework::from_name(framework.as_str()), Some(*framework));
        }
        assert_eq!(Framework::from_name("FastAPI"), Some(Framework::FastApi));
        assert_eq!(Framework::from_name("generic"), Some(Framework::Generic));
    }

    proptest! {
        #[test]
        fn prop_manage_py_always_django(
            extra in prop::collection::vec("[a-z]{1,8}\\.(py|js|go|json)", 0..10),
            requirements in "[a-z=\\n]{0,60}",
        ) {
            let mut file_list = extra.clone();
            file_list.push("manage.py".to_string());
            let contents = contents(&[("requirements.txt", requirements.as_str())]);
            prop_assert_eq!(resolve_framework(&file_list, &contents), Framework::Django);
        }
    }
}
