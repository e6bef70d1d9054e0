use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use usagescope::analysis::Analyzer;
use usagescope::config::AnalyzerConfig;
use usagescope::export::{self, ExportData, ExportFormat};
use usagescope::project;

#[derive(Parser)]
#[command(name = "usagescope")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version = "0.1.0")]
#[command(about = "Find where npm dependencies are used and how risky they are to migrate", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze dependency usage in a project
    Analyze {
        /// Path to analyze (defaults to current directory)
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Output format: json or markdown
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,

        /// Config file (defaults to usagescope.toml in the project root)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show version information
    Version,
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("usagescope=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_analyze(
    path: PathBuf,
    format: ExportFormat,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = match config {
        Some(config_path) => AnalyzerConfig::from_file(&config_path)
            .with_context(|| format!("loading config {}", config_path.display()))?,
        None => AnalyzerConfig::discover(&path)
            .with_context(|| format!("loading config from {}", path.display()))?,
    };

    let project = project::load_project(&path, &config)
        .with_context(|| format!("loading project {}", path.display()))?;
    info!(
        files = project.files.len(),
        dependencies = project.dependencies.len(),
        "project loaded"
    );

    let analyzer = Analyzer::new(config);
    let outcome = analyzer
        .analyze(&project.files, &project.dependencies)
        .context("analysis failed")?;

    for diagnostic in &outcome.diagnostics {
        warn!("{}", diagnostic);
    }

    let project_name = project
        .name
        .clone()
        .unwrap_or_else(|| path.display().to_string());
    let data = ExportData::new(project_name, project.dependencies, outcome);

    match output {
        Some(output_path) => {
            let file = File::create(&output_path)
                .with_context(|| format!("creating {}", output_path.display()))?;
            let mut writer = BufWriter::new(file);
            export::export(format, &data, &mut writer)?;
            writer.flush()?;
            info!(path = %output_path.display(), %format, "report written");
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            export::export(format, &data, &mut writer)?;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Analyze {
            path,
            format,
            config,
            output,
        }) => run_analyze(path, format, config, output),
        Some(Commands::Version) => {
            println!("usagescope v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        None => {
            println!("usagescope - dependency usage analyzer");
            println!("Run 'usagescope analyze' to analyze a project");
            println!("Run 'usagescope --help' for more information");
            Ok(())
        }
    }
}
