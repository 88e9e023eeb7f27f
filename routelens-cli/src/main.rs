//! RouteLens CLI - compare ranked walking routes from the terminal.

mod commands;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use commands::find::FindArgs;

#[derive(Debug, Parser)]
#[command(name = "routelens", version, about = "Compare ranked walking routes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch ranked route candidates for an origin/destination pair
    Find {
        /// Origin as lat,lon (e.g. "45.506,-73.578")
        #[arg(long)]
        from: String,

        /// Destination as lat,lon
        #[arg(long)]
        to: String,

        /// Candidate id to drill into instead of the backend's pick
        #[arg(long)]
        select: Option<String>,

        /// Fetch turn-by-turn steps for the selected candidate
        #[arg(long)]
        steps: bool,

        /// Directions API key (or set GOOGLE_MAPS_API_KEY)
        #[arg(long)]
        google_api_key: Option<String>,

        /// Route backend base URL, overriding config and environment
        #[arg(long)]
        backend_url: Option<String>,

        /// Path to an INI configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show the effective configuration
    Config {
        /// Path to an INI configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    routelens::logging::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Find {
            from,
            to,
            select,
            steps,
            google_api_key,
            backend_url,
            config,
        } => {
            commands::find::run(FindArgs {
                from,
                to,
                select,
                steps,
                google_api_key,
                backend_url,
                config,
            })
            .await
        }
        Commands::Config { config } => commands::config::run(config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
