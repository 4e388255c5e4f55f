mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::scenario::{EvaluateArgs, SimulateArgs, SweepArgs};

/// Deterministic what-if net worth scenario projections
#[derive(Parser)]
#[command(
    name = "whatif",
    version,
    about = "Deterministic what-if net worth scenario projections",
    long_about = "Projects a fixed baseline plan and a user scenario month by month \
                  with decimal precision, compares the two ledgers, and reports a \
                  risk score and a qualitative verdict. Supports single simulations, \
                  full reports, and one-variable parameter sweeps."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the dual-ledger simulation
    Simulate(SimulateArgs),
    /// Run the full pipeline: simulation, metrics, risk score, verdict
    Evaluate(EvaluateArgs),
    /// Sweep one parameter across a range
    Sweep(SweepArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Simulate(args) => commands::scenario::run_simulate(args),
        Commands::Evaluate(args) => commands::scenario::run_evaluate(args),
        Commands::Sweep(args) => commands::scenario::run_sweep(args),
        Commands::Version => {
            println!("whatif {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
