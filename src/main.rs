//! appatlas CLI entry point

use appatlas::{
    commands::{
        cmd_analyze, cmd_init, cmd_inspect, cmd_scrape, print_analysis_report, print_diagnostics,
        print_scrape_report, AnalyzeOptions, InitOptions, ScrapeOptions,
    },
    config::Config,
    error::Result,
    progress::LogWriterFactory,
};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "appatlas")]
#[command(version, about = "App-template catalog scraper and dataset analyzer", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "APPATLAS_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// Fetch the catalog page once and probe it for static content
    Scrape {
        /// Catalog URL (defaults to the configured one)
        #[arg(long)]
        url: Option<String>,

        /// Write extracted records to the dataset CSV
        #[arg(long)]
        export: bool,
    },

    /// Diagnose a previously saved raw page without fetching
    Inspect {
        /// Raw HTML file (defaults to the configured side file)
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Analyze the collected dataset and write the reports
    Analyze {
        /// Dataset CSV (defaults to the configured input)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output directory for the JSON results
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() {
    match run().await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(LogWriterFactory))
        .with(filter)
        .init();

    match cli.command {
        Commands::Init { force } => {
            let options = match cli.config {
                Some(path) => InitOptions::for_config_path(path, force),
                None => InitOptions {
                    force,
                    ..Default::default()
                },
            };
            let path = cmd_init(options)?;
            println!("✓ appatlas initialized");
            println!("  Config: {}", path.display());
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "appatlas", &mut std::io::stdout());
        }

        Commands::Scrape { url, export } => {
            let config = load_config(cli.config.as_deref())?;
            let report = cmd_scrape(&config, ScrapeOptions { url, export }).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_scrape_report(&report, config.scrape.candidate_sample);
            }

            if report.failed() {
                return Ok(1);
            }
        }

        Commands::Inspect { file } => {
            let config = load_config(cli.config.as_deref())?;
            let diagnostics = cmd_inspect(&config, file)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&diagnostics)?);
            } else {
                print_diagnostics(&diagnostics);
            }
        }

        Commands::Analyze { input, output_dir } => {
            let config = load_config(cli.config.as_deref())?;
            let outcome = cmd_analyze(&config, AnalyzeOptions { input, output_dir })?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print_analysis_report(&outcome, config.analysis.taxonomy_examples);
            }
        }
    }

    Ok(0)
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Config::load_from(None),
    }
}
