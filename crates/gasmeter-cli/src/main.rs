use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "gasmeter", version, about = "Gas meter cost and usage analytics")]
struct Cli {
    /// Data file to use instead of ~/.config/gasmeter/data.json
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Meter readings
    Reading {
        #[command(subcommand)]
        action: commands::reading::ReadingAction,
    },
    /// Daily temperature samples
    Weather {
        #[command(subcommand)]
        action: commands::weather::WeatherAction,
    },
    /// Analyse readings: costs, trends, anomalies and projections
    Analyze(commands::analyze::AnalyzeArgs),
    /// Cost breakdown for a given usage
    Cost(commands::cost::CostArgs),
    /// Usage and cost forecast from upcoming temperatures
    Forecast {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let data = cli.data.as_deref();
    let result = match cli.command {
        Commands::Reading { action } => commands::reading::run(action, data),
        Commands::Weather { action } => commands::weather::run(action, data),
        Commands::Analyze(args) => commands::analyze::run(args, data),
        Commands::Cost(args) => commands::cost::run(args),
        Commands::Forecast { json } => commands::forecast::run(json, data),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
