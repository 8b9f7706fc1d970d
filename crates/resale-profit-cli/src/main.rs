mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::calculate::CalculateArgs;
use commands::export::ExportArgs;
use commands::scenarios::ScenariosArgs;

/// Resale profit and margin calculator
#[derive(Parser)]
#[command(
    name = "resale",
    version,
    about = "Resale profit and margin calculator",
    long_about = "Computes per-unit and total profit and margin for a marketplace listing \
                  from price, discount, return rate, advertising rate, commission and \
                  per-unit costs. Compares discount scenarios and exports them to a \
                  spreadsheet or CSV."
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
    /// Profit and margin for a single listing
    Calculate(CalculateArgs),
    /// Compare the original price with 20%/50%/custom discount scenarios
    Scenarios(ScenariosArgs),
    /// Write discount scenarios to an .xlsx or .csv file
    Export(ExportArgs),
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
        Commands::Calculate(args) => commands::calculate::run_calculate(args),
        Commands::Scenarios(args) => commands::scenarios::run_scenarios(args),
        Commands::Export(args) => commands::export::run_export(args),
        Commands::Version => {
            println!("resale {}", env!("CARGO_PKG_VERSION"));
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
