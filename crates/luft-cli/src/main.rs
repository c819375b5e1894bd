mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "luft",
    version,
    about = "Air quality scoring tool for European pollutant measurements"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a measurement CSV export into structured readings (without scoring)
    Parse {
        /// Path to the CSV export
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write parsed readings to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Score every observation: composite score and overall level per station and time
    Score {
        /// Path to the CSV export, or readings JSON from `luft parse --out`
        input_file: PathBuf,

        /// Custom JSON threshold table (overrides --preset)
        #[arg(short, long = "thresholds", value_name = "FILE")]
        thresholds: Option<PathBuf>,

        /// Predefined threshold table
        #[arg(short, long, default_value = "who")]
        preset: String,

        /// Tighten every band for sensitive populations
        #[arg(long)]
        sensitive: bool,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Show all observations, not just Moderate and High
        #[arg(long)]
        show_all: bool,

        /// Show per-pollutant reasoning
        #[arg(long)]
        verbose: bool,
    },
    /// Rank cities by the weighted pollution index
    Index {
        /// Path to the CSV export
        input_file: PathBuf,

        /// Custom JSON threshold table (overrides --preset)
        #[arg(short, long = "thresholds", value_name = "FILE")]
        thresholds: Option<PathBuf>,

        /// Predefined threshold table
        #[arg(short, long, default_value = "who")]
        preset: String,

        /// Tighten every band for sensitive populations
        #[arg(long)]
        sensitive: bool,

        /// Only show the N worst cities
        #[arg(short = 'n', long, value_name = "N")]
        top: Option<usize>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Manage and inspect threshold tables
    Thresholds {
        #[command(subcommand)]
        action: ThresholdsAction,
    },
}

#[derive(Subcommand)]
enum ThresholdsAction {
    /// List predefined threshold tables
    List,
    /// Explain a threshold table in plain language
    Explain {
        /// Preset name (e.g., "who")
        preset: String,
    },
    /// Print the JSON schema with field descriptions and example
    Schema,
    /// Validate a custom threshold file
    Validate {
        /// Path to JSON threshold file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse {
            input_file,
            output,
            out,
        } => commands::parse::run(input_file, &output, out),
        Commands::Score {
            input_file,
            thresholds,
            preset,
            sensitive,
            output,
            show_all,
            verbose,
        } => commands::score::run(
            input_file,
            thresholds,
            &preset,
            sensitive,
            &output,
            show_all,
            verbose,
        ),
        Commands::Index {
            input_file,
            thresholds,
            preset,
            sensitive,
            top,
            output,
        } => commands::index::run(input_file, thresholds, &preset, sensitive, top, &output),
        Commands::Thresholds { action } => match action {
            ThresholdsAction::List => commands::thresholds::list(),
            ThresholdsAction::Explain { preset } => commands::thresholds::explain(&preset),
            ThresholdsAction::Schema => commands::thresholds::schema(),
            ThresholdsAction::Validate { file } => commands::thresholds::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
