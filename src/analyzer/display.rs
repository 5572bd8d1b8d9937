//! # Display Module
//!
//! Terminal rendering of a [`RepositoryAnalysis`]: a boxed dashboard, a
//! detailed listing, a one-paragraph summary, or machine-readable JSON/YAML.
//!
//! Every view is built as a `String` first so callers (and tests) can
//! inspect it before printing.

use crate::analyzer::RepositoryAnalysis;
use crate::error::Result;
use colored::*;

/// A row inside a [`BoxDrawer`]
#[derive(Debug, Clone)]
enum BoxLine {
    Field { label: String, value: String },
    Text(String),
    Separator,
}

/// Draws a titled box whose width follows its widest row
pub struct BoxDrawer {
    title: String,
    lines: Vec<BoxLine>,
    min_width: usize,
    max_width: usize,
}

const LABEL_COLUMN: usize = 18;

impl BoxDrawer {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            lines: Vec::new(),
            min_width: 60,
            max_width: 120,
        }
    }

    pub fn add_line(&mut self, label: &str, value: &str) {
        self.lines.push(BoxLine::Field {
            label: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn add_value_only(&mut self, value: &str) {
        self.lines.push(BoxLine::Text(value.to_string()));
    }

    pub fn add_separator(&mut self) {
        self.lines.push(BoxLine::Separator);
    }

    fn content_width(&self) -> usize {
        let widest = self
            .lines
            .iter()
            .map(|line| match line {
                BoxLine::Field { label, value } => visual_width(label).max(LABEL_COLUMN) + 1 + visual_width(value),
                BoxLine::Text(text) => visual_width(text),
                BoxLine::Separator => 0,
            })
            .max()
            .unwrap_or(0);

        // "┌─ " + title + " " + at least one dash + "┐"
        let title_needs = visual_width(&self.title) + 2;
        (widest.max(title_needs) + 4).clamp(self.min_width, self.max_width) - 4
    }

    pub fn draw(&self) -> String {
        let inner = self.content_width();
        let mut output = Vec::with_capacity(self.lines.len() + 2);

        let dashes = (inner + 4).saturating_sub(visual_width(&self.title) + 5);
        output.push(format!("┌─ {} {}┐", self.title.bright_cyan(), "─".repeat(dashes)));

        for line in &self.lines {
            let content = match line {
                BoxLine::Separator => {
                    output.push(format!("│ {} │", "─".repeat(inner).dimmed()));
                    continue;
                }
                BoxLine::Field { label, value } => {
                    let padding = LABEL_COLUMN.saturating_sub(visual_width(label));
                    format!("{}{} {}", label.bright_white(), " ".repeat(padding), value)
                }
                BoxLine::Text(text) => text.clone(),
            };
            output.push(format!("│ {} │", pad_to_width(&content, inner)));
        }

        output.push(format!("└{}┘", "─".repeat(inner + 2)));
        output.join("\n")
    }
}

/// Width of a string as printed, ignoring ANSI color sequences
fn visual_width(s: &str) -> usize {
    strip_ansi_codes(s).chars().map(char_width).sum()
}

fn char_width(ch: char) -> usize {
    match ch {
        '\u{0000}'..='\u{001F}' | '\u{007F}' | '\u{0300}'..='\u{036F}' => 0,
        '\u{1100}'..='\u{115F}'
        | '\u{2E80}'..='\u{A4CF}'
        | '\u{AC00}'..='\u{D7AF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{FF00}'..='\u{FF60}'
        | '\u{FFE0}'..='\u{FFE6}'
        | '\u{1F300}'..='\u{1F9FF}' => 2,
        _ => 1,
    }
}

fn strip_ansi_codes(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            result.push(ch);
        }
    }
    result
}

/// Pads to exactly `width` columns, cutting with "..." when too long.
/// Truncated content loses its colors.
fn pad_to_width(s: &str, width: usize) -> String {
    let current = visual_width(s);
    if current <= width {
        return format!("{}{}", s, " ".repeat(width - current));
    }

    let mut result = String::new();
    let mut used = 0;
    for ch in strip_ansi_codes(s).chars() {
        let w = char_width(ch);
        if used + w > width.saturating_sub(3) {
            break;
        }
        result.push(ch);
        used += w;
    }
    result.push_str("...");
    format!("{}{}", result, " ".repeat(width.saturating_sub(used + 3)))
}

/// How `display_analysis` renders an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Boxed dashboard (default)
    Matrix,
    /// Every detected item, one per line
    Detailed,
    /// A few lines
    Summary,
    Json,
    Yaml,
}

/// Renders the analysis in the requested mode
pub fn render_analysis(analysis: &RepositoryAnalysis, mode: DisplayMode) -> Result<String> {
    let rendered = match mode {
        DisplayMode::Matrix => render_matrix_view(analysis),
        DisplayMode::Detailed => render_detailed_view(analysis),
        DisplayMode::Summary => render_summary_view(analysis),
        DisplayMode::Json => serde_json::to_string_pretty(analysis)?,
        DisplayMode::Yaml => serde_yaml::to_string(analysis)?,
    };
    Ok(rendered)
}

/// Prints the analysis to stdout
pub fn display_analysis(analysis: &RepositoryAnalysis, mode: DisplayMode) -> Result<()> {
    println!("{}", render_analysis(analysis, mode)?);
    Ok(())
}

fn join_or_dash<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    let joined = items.into_iter().collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined
    }
}

pub fn render_matrix_view(analysis: &RepositoryAnalysis) -> String {
    let mut sections = Vec::new();
    sections.push(format!("{}", "═".repeat(80).bright_blue()));
    sections.push(format!(
        "{}",
        format!("📊 CONTAINERIZATION ANALYSIS: {}", analysis.project_name)
            .bright_white()
            .bold()
    ));
    sections.push(format!("{}", "═".repeat(80).bright_blue()));

    let mut stack = BoxDrawer::new("Technology Stack");
    stack.add_line("Language:", &analysis.language_name().blue().to_string());
    stack.add_line("Framework:", &analysis.framework.as_str().magenta().to_string());
    stack.add_line("Package Manager:", analysis.package_manager.as_str());
    stack.add_line(
        "Databases:",
        &join_or_dash(analysis.databases.iter().map(|db| db.as_str()))
            .cyan()
            .to_string(),
    );
    stack.add_line("Dependencies:", &analysis.dependencies.len().to_string());
    stack.add_line("Build Tools:", &join_or_dash(analysis.build_tools.iter().map(String::as_str)));
    sections.push(stack.draw());

    let mut runtime = BoxDrawer::new("Runtime");
    runtime.add_line("Port:", &analysis.port.to_string().green().to_string());
    runtime.add_line("Health Check:", &analysis.health_check);
    runtime.add_separator();
    runtime.add_line("Install:", &analysis.commands.install);
    runtime.add_line("Build:", &analysis.commands.build);
    runtime.add_line("Start:", &analysis.commands.start);
    runtime.add_line("Test:", &analysis.commands.test);
    sections.push(runtime.draw());

    let mut environment = BoxDrawer::new("Environment Variables");
    if analysis.environment_variables.is_empty() {
        environment.add_value_only(&"No environment variables detected".dimmed().to_string());
    }
    for (name, description) in &analysis.environment_variables {
        environment.add_line(name, &description.dimmed().to_string());
    }
    sections.push(environment.draw());

    if !analysis.recommendations.is_empty() {
        let mut advice = BoxDrawer::new("Recommendations");
        for recommendation in &analysis.recommendations {
            advice.add_value_only(&format!("• {}", recommendation).yellow().to_string());
        }
        sections.push(advice.draw());
    }

    let metadata = &analysis.analysis_metadata;
    let mut metrics = BoxDrawer::new("Analysis Metrics");
    metrics.add_line("Files:", &metadata.files_scanned.to_string());
    metrics.add_line("Documents:", &metadata.documents_scanned.to_string());
    metrics.add_line("Duration:", &format!("{}ms", metadata.analysis_duration_ms));
    metrics.add_line("Version:", &metadata.analyzer_version);
    sections.push(metrics.draw());

    sections.join("\n\n")
}

pub fn render_detailed_view(analysis: &RepositoryAnalysis) -> String {
    let mut out = Vec::new();
    let heading = |title: &str| format!("\n{}", title.bright_yellow().bold());

    out.push(format!("{}", "=".repeat(80).bright_blue()));
    out.push(format!("📁 Repository: {}", analysis.project_name.bright_white().bold()));
    out.push(format!(
        "   Analyzed at {} in {}ms",
        analysis.analysis_metadata.timestamp, analysis.analysis_metadata.analysis_duration_ms
    ));
    out.push(format!("{}", "=".repeat(80).bright_blue()));

    out.push(heading("🌐 Stack"));
    out.push(format!("   Language:        {}", analysis.language_name()));
    out.push(format!("   Framework:       {}", analysis.framework));
    out.push(format!("   Package Manager: {}", analysis.package_manager));
    out.push(format!("   Port:            {}", analysis.port));

    out.push(heading(&format!("📦 Dependencies ({})", analysis.dependencies.len())));
    if analysis.dependencies.is_empty() {
        out.push("   none detected".dimmed().to_string());
    }
    out.extend(analysis.dependencies.iter().map(|dep| format!("   • {}", dep)));

    out.push(heading("🗄️  Databases"));
    if analysis.databases.is_empty() {
        out.push("   none detected".dimmed().to_string());
    }
    for database in &analysis.databases {
        let note = if database.needs_service() { "" } else { " (embedded)" };
        out.push(format!("   • {}{}", database, note));
    }

    out.push(heading("🔐 Environment Variables"));
    if analysis.environment_variables.is_empty() {
        out.push("   none detected".dimmed().to_string());
    }
    for (name, description) in &analysis.environment_variables {
        out.push(format!("   • {}: {}", name.bright_white(), description));
    }

    out.push(heading("🔨 Build Tools"));
    out.push(format!("   {}", join_or_dash(analysis.build_tools.iter().map(String::as_str))));

    out.push(heading("▶️  Commands"));
    out.push(format!("   install: {}", analysis.commands.install));
    out.push(format!("   build:   {}", analysis.commands.build));
    out.push(format!("   start:   {}", analysis.commands.start));
    out.push(format!("   test:    {}", analysis.commands.test));
    out.push(format!("   health:  {}", analysis.health_check));

    if !analysis.recommendations.is_empty() {
        out.push(heading("💡 Recommendations"));
        out.extend(analysis.recommendations.iter().map(|r| format!("   • {}", r)));
    }

    out.join("\n")
}

pub fn render_summary_view(analysis: &RepositoryAnalysis) -> String {
    let mut out = vec![
        format!("{} {}", "▶ REPOSITORY:".bright_blue().bold(), analysis.project_name),
        format!(
            "│ Stack: {} / {} ({})",
            analysis.language_name(),
            analysis.framework,
            analysis.package_manager
        ),
        format!("│ Port: {}", analysis.port),
    ];
    if analysis.databases.is_empty() {
        out.push("│ Databases: none".to_string());
    } else {
        out.push(format!(
            "│ Databases: {}",
            join_or_dash(analysis.databases.iter().map(|db| db.as_str()))
        ));
    }
    out.push(format!(
        "│ {} dependencies, {} environment variables, {} recommendations",
        analysis.dependencies.len(),
        analysis.environment_variables.len(),
        analysis.recommendations.len()
    ));
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{analyze_snapshot, RepositorySnapshot};
    use crate::config::AnalysisConfig;

    fn flask() -> RepositoryAnalysis {
        let snapshot = RepositorySnapshot::new(
            "shop",
            vec!["app.py".to_string(), "requirements.txt".to_string()],
            [
                ("requirements.txt", "flask\npsycopg2\n"),
                ("app.py", "os.environ.get('SECRET_KEY')\napp.run(port=5000)"),
            ]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        );
        analyze_snapshot(&snapshot, &AnalysisConfig::default())
    }

    #[test]
    fn test_visual_width_ignores_colors() {
        let colored = "hello".red().to_string();
        assert_eq!(visual_width(&colored), 5);
        assert_eq!(visual_width("日本"), 4);
        assert_eq!(strip_ansi_codes("\x1b[31mred\x1b[0m"), "red");
    }

    #[test]
    fn test_box_rows_have_equal_width() {
        let mut drawer = BoxDrawer::new("Title");
        drawer.add_line("Key:", "value");
        drawer.add_separator();
        drawer.add_value_only(&"x".repeat(200));

        let drawn = drawer.draw();
        let widths: Vec<usize> = drawn.lines().map(visual_width).collect();
        assert!(widths.iter().all(|w| *w == widths[0]), "{:?}", widths);
        assert!(widths[0] <= 120);
        assert!(drawn.contains("..."));
    }

    #[test]
    fn test_views_mention_detected_stack() {
        let analysis = flask();

        let matrix = strip_ansi_codes(&render_analysis(&analysis, DisplayMode::Matrix).unwrap());
        assert!(matrix.contains("Python"));
        assert!(matrix.contains("flask"));
        assert!(matrix.contains("SECRET_KEY"));

        let detailed = strip_ansi_codes(&render_analysis(&analysis, DisplayMode::Detailed).unwrap());
        assert!(detailed.contains("• postgresql"));
        assert!(detailed.contains("start:"));

        let summary = strip_ansi_codes(&render_analysis(&analysis, DisplayMode::Summary).unwrap());
        assert!(summary.contains("Port: 5000"));
    }

    #[test]
    fn test_machine_readable_views_round_trip() {
        let analysis = flask();
        let json = render_analysis(&analysis, DisplayMode::Json).unwrap();
        let parsed: RepositoryAnalysis = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, analysis);

        let yaml = render_analysis(&analysis, DisplayMode::Yaml).unwrap();
        let parsed: RepositoryAnalysis = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.port, 5000);
    }
}
