mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::calculate::CalculateArgs;
use commands::program::ProgramArgs;
use commands::schedule::ScheduleArgs;

/// Subsidized loan repayment calculations
#[derive(Parser)]
#[command(
    name = "subsidy",
    version,
    about = "Subsidized loan repayment calculations",
    long_about = "A CLI for the business-support portal's subsidy amortization engine. \
                  Compares annuity repayment under the raw bank rate and the \
                  bank-rate-minus-subsidy rate, with decimal precision, and builds \
                  full month-by-month schedules."
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
    /// Compare monthly payments and savings under both rate regimes
    Calculate(CalculateArgs),
    /// Build the full month-by-month amortization schedule
    Schedule(ScheduleArgs),
    /// Run a calculation constrained by a support program's limits
    ProgramCalculate(ProgramArgs),
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
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::ProgramCalculate(args) => commands::program::run_program_calculate(args),
        Commands::Version => {
            println!("subsidy {}", env!("CARGO_PKG_VERSION"));
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
