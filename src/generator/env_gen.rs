use crate::analyzer::RepositoryAnalysis;

/// `.env.example` listing every detected variable with an empty value
pub fn generate(analysis: &RepositoryAnalysis) -> String {
    let mut content = String::from("# Environment variables for containerization\n");

    for (name, description) in &analysis.environment_variables {
        let value = if name == "PORT" { analysis.port.to_string() } else { String::new() };
        content.push_str(&format!("{}={}  # {}\n", name, value, description));
    }

    content
}
