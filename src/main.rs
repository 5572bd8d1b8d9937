use clap::Parser;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use repo_containerizer::{
    analyzer::{
        self,
        display::{display_analysis, DisplayMode},
        Framework, Language,
    },
    cli::{Cli, Commands, DisplayFormat, OutputFormat},
    common::file_utils::{check_output_targets, write_output_file},
    config::{self, Config},
    generator::{self, OutputSelection},
};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> repo_containerizer::Result<()> {
    let cli = Cli::parse();
    cli.init_logging();

    let config = config::load_config(cli.config.as_deref())?;
    log::debug!("Loaded configuration: {:?}", config);

    match cli.command {
        Commands::Analyze { path, display, json, yaml } => handle_analyze(&path, &config, display, json, yaml),
        Commands::Generate {
            path,
            output,
            dockerfile,
            compose,
            config_file,
            env,
            readme,
            all,
            format,
            dry_run,
            force,
        } => {
            let selection = OutputSelection {
                dockerfile,
                compose,
                config_file,
                env_example: env,
                readme,
            };
            let selection = if all || selection.is_empty() {
                OutputSelection::all()
            } else {
                selection
            };
            let options = GenerateOptions {
                output,
                format,
                dry_run,
                force,
                quiet: cli.quiet,
            };
            handle_generate(&path, config, selection, options)
        }
        Commands::Support { languages, frameworks } => {
            handle_support(languages, frameworks);
            Ok(())
        }
        Commands::Config => {
            print!("{}", config::render_config(&config)?);
            Ok(())
        }
    }
}

fn handle_analyze(
    path: &Path,
    config: &Config,
    display: DisplayFormat,
    json: bool,
    yaml: bool,
) -> repo_containerizer::Result<()> {
    let mode = if json {
        DisplayMode::Json
    } else if yaml {
        DisplayMode::Yaml
    } else {
        DisplayMode::from(display)
    };

    // Machine-readable output stays clean for piping
    if !matches!(mode, DisplayMode::Json | DisplayMode::Yaml) {
        println!("🔍 Analyzing repository: {}", path.display());
    }

    let analysis = analyzer::analyze_repository(path, config)?;
    display_analysis(&analysis, mode)
}

struct GenerateOptions {
    output: Option<PathBuf>,
    format: Option<OutputFormat>,
    dry_run: bool,
    force: bool,
    quiet: bool,
}

fn analysis_spinner(quiet: bool) -> Option<ProgressBar> {
    // Spinner output would interleave with log lines
    if quiet || log::max_level() >= log::LevelFilter::Info {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("  {spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ");
    pb.set_style(style);
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

fn handle_generate(
    path: &Path,
    mut config: Config,
    selection: OutputSelection,
    options: GenerateOptions,
) -> repo_containerizer::Result<()> {
    if let Some(format) = options.format {
        config.output.format = format.into();
    }
    let overwrite = options.force || config.output.overwrite_existing;

    let spinner = analysis_spinner(options.quiet);
    if let Some(pb) = &spinner {
        pb.set_message(format!("Analyzing {}...", path.display()));
    }
    let analysis = analyzer::analyze_repository(path, &config);
    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }
    let analysis = analysis?;

    if !options.quiet {
        println!(
            "✅ Detected {} / {} on port {}",
            analysis.language_name().bright_blue(),
            analysis.framework.as_str().magenta(),
            analysis.port
        );
    }

    let files = generator::generate_outputs(&analysis, &config, selection)?;
    let output_dir = options.output.unwrap_or_else(|| path.to_path_buf());

    if options.dry_run {
        for file in &files {
            println!("--- {} (dry run) ---", file.name);
            println!("{}", file.content);
        }
        return Ok(());
    }

    let targets: Vec<PathBuf> = files.iter().map(|file| output_dir.join(&file.name)).collect();
    check_output_targets(&targets, overwrite)?;

    for (file, target) in files.iter().zip(&targets) {
        write_output_file(target, &file.content, overwrite)?;
        if !options.quiet {
            println!("📝 Wrote {}", target.display());
        }
    }

    if !options.quiet {
        println!(
            "\n🎉 Generated {} file(s) in {}",
            files.len(),
            output_dir.display()
        );
        for recommendation in &analysis.recommendations {
            println!("💡 {}", recommendation.yellow());
        }
    }
    Ok(())
}

fn handle_support(languages: bool, frameworks: bool) {
    let show_all = !languages && !frameworks;

    if languages || show_all {
        println!("🌐 Supported Languages:");
        print_tree(Language::all().iter().map(|language| language.as_str()));
    }

    if frameworks || show_all {
        if show_all {
            println!();
        }
        println!("🚀 Supported Frameworks:");
        print_tree(Framework::all().iter().map(|framework| framework.as_str()));
    }
}

fn print_tree<'a>(items: impl ExactSizeIterator<Item = &'a str>) {
    let last = items.len().saturating_sub(1);
    for (i, item) in items.enumerate() {
        let branch = if i == last { "└──" } else { "├──" };
        println!("{} {}", branch, item);
    }
}
