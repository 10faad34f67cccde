//! Silhouette CLI - play and inspect the country guessing game.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Silhouette - guess the country from its outline
#[derive(Parser, Debug)]
#[command(name = "silhouette")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Reference countries file (world-countries JSON)
    #[arg(long, global = true, env = "SILHOUETTE_COUNTRIES", default_value = "data/countries.json")]
    countries: PathBuf,

    /// Boundary file (GeoJSON FeatureCollection or TopoJSON Topology)
    #[arg(long, global = true, env = "SILHOUETTE_BOUNDARIES", default_value = "data/boundaries.geojson")]
    boundaries: PathBuf,

    /// Leaderboard file
    #[arg(
        long,
        global = true,
        env = "SILHOUETTE_LEADERBOARD",
        default_value = "silhouette-leaderboard.json"
    )]
    leaderboard: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play in the terminal
    Play {
        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// How rounds chain together
        #[arg(short, long, default_value = "classic")]
        mode: cli::ModeArg,

        /// Starting lives for `--mode lives` (1-5)
        #[arg(short, long, default_value = "3", value_parser = clap::value_parser!(u8).range(1..=5))]
        lives: u8,

        /// Guesses per round (default: 5)
        #[arg(short, long, default_value = "5", value_parser = clap::value_parser!(u8).range(1..))]
        guesses: u8,

        /// Pause before the next round in streak and lives runs, in milliseconds
        #[arg(long, default_value = "1400")]
        delay: u64,

        /// Name recorded on the leaderboard (default: Anonymous)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Resolve free text to countries
    Resolve {
        /// Names, aliases or abbreviations to resolve
        #[arg(required = true)]
        text: Vec<String>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Distance and direction from a guessed country to a target
    Compare {
        /// Guessed country
        guess: String,

        /// Target country
        target: String,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// List the playable countries
    Countries {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Print a country's silhouette
    Outline {
        /// Country to draw
        country: String,

        /// Output format: ascii or svg
        #[arg(short, long, default_value = "ascii")]
        format: cli::OutlineFormat,

        /// Columns for ascii output
        #[arg(long, default_value = "60")]
        width: usize,

        /// Rows for ascii output
        #[arg(long, default_value = "20")]
        height: usize,
    },

    /// Show the stored leaderboard
    Leaderboard {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("silhouette=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    let data = cli::DataPaths {
        countries: args.countries,
        boundaries: args.boundaries,
        leaderboard: args.leaderboard,
    };

    let result = match args.command {
        Commands::Play {
            seed,
            mode,
            lives,
            guesses,
            delay,
            name,
        } => cli::play::execute(&data, seed, mode.into_run_mode(lives), guesses, delay, name),

        Commands::Resolve { text, format } => cli::resolve::execute(&data, &text, format),

        Commands::Compare {
            guess,
            target,
            format,
        } => cli::compare::execute(&data, &guess, &target, format),

        Commands::Countries { format } => cli::countries::execute(&data, format),

        Commands::Outline {
            country,
            format,
            width,
            height,
        } => cli::outline::execute(&data, &country, format, width, height),

        Commands::Leaderboard { format } => cli::leaderboard::execute(&data, format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
