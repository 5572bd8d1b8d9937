use crate::analyzer::commands::CommandSet;
use crate::analyzer::framework_detector::Framework;
use crate::analyzer::language_detector::Language;

fn has_file(files: &[String], name: &str) -> bool {
    files.iter().any(|file| file.as_str() == name)
}

fn has_dir(files: &[String], dir: &str) -> bool {
    let prefix = format!("{}/", dir);
    files.iter().any(|file| file.starts_with(&prefix))
}

/// Advice on what the repository is missing before it containerizes cleanly
pub fn generate_recommendations(
    files: &[String],
    language: Option<Language>,
    framework: Framework,
    commands: &CommandSet,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    match language {
        Some(Language::Python) => {
            if !has_file(files, "requirements.txt") && !has_file(files, "pyproject.toml") {
                recommendations
                    .push("Consider adding requirements.txt or pyproject.toml for dependency management".to_string());
            }
            if framework == Framework::Django && !has_file(files, "manage.py") {
                recommendations.push("This appears to be a Django project but manage.py is missing".to_string());
            }
        }
        Some(lang) if lang.is_node() => {
            if !has_file(files, "package.json") {
                recommendations.push("Consider adding package.json for dependency management".to_string());
            }
            if framework == Framework::React && !has_dir(files, "public") {
                recommendations.push("React projects typically need a public directory".to_string());
            }
        }
        _ => {}
    }

    if !files.iter().any(|file| file.eq_ignore_ascii_case("README.md")) {
        recommendations.push("Add a README.md file with project description and setup instructions".to_string());
    }

    if has_file(files, ".env") {
        recommendations
            .push("Found .env file - ensure it's in .gitignore and not committed to version control".to_string());
    }

    if !has_file(files, "Dockerfile") {
        recommendations.push("Consider adding a Dockerfile for containerization".to_string());
    }

    if commands.test.starts_with("echo ") {
        recommendations.push("No test commands detected - consider adding automated tests".to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::commands::generate_run_commands;
    use crate::analyzer::package_manager::PackageManager;
    use std::collections::BTreeSet;

    fn files(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn commands(language: Option<Language>) -> CommandSet {
        generate_run_commands(language, Framework::Generic, PackageManager::Unknown, &BTreeSet::new())
    }

    #[test]
    fn test_complete_python_project() {
        let recs = generate_recommendations(
            &files(&["README.md", "Dockerfile", "requirements.txt", "app.py"]),
            Some(Language::Python),
            Framework::Flask,
            &commands(Some(Language::Python)),
        );
        assert!(recs.is_empty(), "unexpected: {:?}", recs);
    }

    #[test]
    fn test_django_without_manage_py() {
        let recs = generate_recommendations(
            &files(&["requirements.txt", "README.md", "Dockerfile"]),
            Some(Language::Python),
            Framework::Django,
            &commands(Some(Language::Python)),
        );
        assert_eq!(recs, vec!["This appears to be a Django project but manage.py is missing"]);
    }

    #[test]
    fn test_react_without_public_dir() {
        let recs = generate_recommendations(
            &files(&["package.json", "src/App.jsx", "readme.md", "Dockerfile"]),
            Some(Language::JavaScript),
            Framework::React,
            &commands(Some(Language::JavaScript)),
        );
        assert_eq!(recs, vec!["React projects typically need a public directory"]);

        let recs = generate_recommendations(
            &files(&["package.json", "public/index.html", "README.md", "Dockerfile"]),
            Some(Language::JavaScript),
            Framework::React,
            &commands(Some(Language::JavaScript)),
        );
        assert!(recs.is_empty());
    }

    #[test]
    fn test_unknown_project() {
        let recs = generate_recommendations(&files(&[".env", "notes.txt"]), None, Framework::Generic, &commands(None));
        assert_eq!(recs.len(), 4);
        assert!(recs[1].starts_with("Found .env file"));
        assert!(recs[3].starts_with("No test commands detected"));
    }
}
