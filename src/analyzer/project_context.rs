//! Runtime context of a project: the port it listens on and the environment
//! variables it reads.

use crate::analyzer::framework_detector::Framework;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// Used when nothing in the repository names a port and the framework has no convention
pub const DEFAULT_PORT: u16 = 8080;

/// Port assignments, tried in order against every document
static PORT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)port[:\s]*=?\s*(\d+)",
        r"(?i)PORT[:\s]*=?\s*(\d+)",
        r"(?i)listen[:\s]*=?\s*(\d+)",
        r"(?i)server\.port[:\s]*=?\s*(\d+)",
        r"(?i)app\.listen\s*\(\s*(\d+)",
        r"(?i)\.run\s*\(\s*port\s*=\s*(\d+)",
        r"(?i)server_port[:\s]*=?\s*(\d+)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("port pattern is valid"))
    .collect()
});

/// Environment access idioms; the capture class only admits upper-case names
static ENV_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r#"os\.environ\.get\(['"]([A-Z_]+)['"]"#,
        r"process\.env\.([A-Z_]+)",
        r#"System\.getenv\(['"]([A-Z_]+)['"]"#,
        r#"std::env::var\(['"]([A-Z_]+)['"]"#,
        r"\$\{([A-Z_]+)\}",
        r"\$([A-Z_]+)",
        r#"env\(['"]([A-Z_]+)['"]"#,
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("environment pattern is valid"))
    .collect()
});

static DOTENV_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:export\s+)?([A-Za-z_][A-Za-z0-9_]*)\s*=").expect("dotenv key pattern is valid")
});

const FRAMEWORK_PORTS: &[(Framework, u16)] = &[
    (Framework::Django, 8000),
    (Framework::Flask, 5000),
    (Framework::FastApi, 8000),
    (Framework::Express, 3000),
    (Framework::Next, 3000),
    (Framework::React, 3000),
    (Framework::Vue, 8080),
    (Framework::Angular, 4200),
    (Framework::Spring, 8080),
    (Framework::Gin, 8080),
    (Framework::Laravel, 8000),
    (Framework::Rails, 3000),
];

const ENV_LEXICON: &[(&str, &str)] = &[
    ("DATABASE_URL", "Database connection URL"),
    ("DB_HOST", "Database host"),
    ("DB_PORT", "Database port"),
    ("DB_NAME", "Database name"),
    ("DB_USER", "Database username"),
    ("DB_PASSWORD", "Database password"),
    ("REDIS_URL", "Redis connection URL"),
    ("SECRET_KEY", "Secret key for encryption"),
    ("JWT_SECRET", "JWT token secret"),
    ("API_KEY", "API key for external services"),
    ("PORT", "Application port"),
    ("HOST", "Application host"),
    ("NODE_ENV", "Node.js environment"),
    ("FLASK_ENV", "Flask environment"),
    ("DJANGO_SETTINGS_MODULE", "Django settings module"),
    ("DEBUG", "Debug mode flag"),
    ("LOG_LEVEL", "Logging level"),
    ("CORS_ORIGIN", "CORS allowed origins"),
    ("MAIL_SERVER", "Email server"),
    ("MAIL_PORT", "Email server port"),
    ("MAIL_USERNAME", "Email username"),
    ("MAIL_PASSWORD", "Email password"),
    ("AWS_ACCESS_KEY_ID", "AWS access key"),
    ("AWS_SECRET_ACCESS_KEY", "AWS secret key"),
    ("AWS_REGION", "AWS region"),
    ("GOOGLE_APPLICATION_CREDENTIALS", "Google Cloud credentials"),
    ("MONGODB_URI", "MongoDB connection URI"),
    ("ELASTICSEARCH_URL", "Elasticsearch URL"),
];

/// Conventional port for a framework, [`DEFAULT_PORT`] when it has none
pub fn default_port(framework: Framework) -> u16 {
    FRAMEWORK_PORTS
        .iter()
        .find(|(candidate, _)| *candidate == framework)
        .map(|(_, port)| *port)
        .unwrap_or(DEFAULT_PORT)
}

/// Returns the first valid port (1-65535) assigned anywhere in `contents`.
///
/// Documents are scanned in path order and, within a document, patterns in
/// list order. `.env*` files are skipped: they declare ports of backing
/// services as often as the application's own. Out-of-range or unparsable
/// candidates are skipped. Falls back to the framework's conventional port.
pub fn detect_port_from_files(contents: &BTreeMap<String, String>, framework: Framework) -> u16 {
    for (path, content) in contents.iter().filter(|(path, _)| !is_dotenv_file(path)) {
        for pattern in PORT_PATTERNS.iter() {
            for cap in pattern.captures_iter(content) {
                let Some(digits) = cap.get(1) else { continue };
                match parse_port(digits.as_str()) {
                    Some(port) => {
                        log::debug!("Port {} found in {}", port, path);
                        return port;
                    }
                    None => log::debug!("Ignoring out-of-range port '{}' in {}", digits.as_str(), path),
                }
            }
        }
    }

    let port = default_port(framework);
    log::debug!("No port assignment found, using {} default {}", framework, port);
    port
}

fn parse_port(digits: &str) -> Option<u16> {
    digits.parse::<u16>().ok().filter(|port| *port != 0)
}

/// Lexicon description, or a generic one for unknown names
pub fn describe_environment_variable(name: &str) -> String {
    ENV_LEXICON
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, description)| description.to_string())
        .unwrap_or_else(|| format!("Environment variable: {}", name))
}

/// Environment variables read by the code, with `DATABASE_URL` augmentation on
pub fn detect_environment_variables(contents: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    detect_environment_variables_with(contents, true)
}

/// Environment variables referenced in `contents` or declared in `.env*` files.
///
/// With `augment_database_url`, any `DB_*` or `*DATABASE*` name also brings in
/// `DATABASE_URL`.
pub fn detect_environment_variables_with(
    contents: &BTreeMap<String, String>,
    augment_database_url: bool,
) -> BTreeMap<String, String> {
    let mut variables = BTreeMap::new();

    for (path, content) in contents {
        for pattern in ENV_PATTERNS.iter() {
            for cap in pattern.captures_iter(content) {
                if let Some(name) = cap.get(1) {
                    insert_variable(&mut variables, name.as_str());
                }
            }
        }

        if is_dotenv_file(path) {
            for name in parse_dotenv_keys(content) {
                insert_variable(&mut variables, &name);
            }
        }
    }

    if augment_database_url
        && !variables.contains_key("DATABASE_URL")
        && variables
            .keys()
            .any(|name| name.starts_with("DB_") || name.contains("DATABASE"))
    {
        log::debug!("Database variables present, adding DATABASE_URL");
        insert_variable(&mut variables, "DATABASE_URL");
    }

    log::debug!("Detected {} environment variables", variables.len());
    variables
}

fn insert_variable(variables: &mut BTreeMap<String, String>, name: &str) {
    variables
        .entry(name.to_string())
        .or_insert_with(|| describe_environment_variable(name));
}

fn is_dotenv_file(path: &str) -> bool {
    path.rsplit('/')
        .next()
        .map(|name| name.starts_with(".env"))
        .unwrap_or(false)
}

/// Keys of `KEY=value` lines, skipping blanks and comments
pub fn parse_dotenv_keys(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| DOTENV_KEY.captures(line))
        .filter_map(|cap| cap.get(1).map(|key| key.as_str().to_string()))
        .collect()
}
