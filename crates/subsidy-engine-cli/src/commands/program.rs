use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use subsidy_engine_core::amortization::program::{self, ProgramCalculationInput};

use crate::input;

/// Arguments for a program-constrained calculation
#[derive(Args)]
pub struct ProgramArgs {
    /// Path to a JSON file with the program record and loan request
    #[arg(long)]
    pub input: Option<String>,

    /// Override the program's default bank rate, percent
    #[arg(long)]
    pub bank_rate: Option<Decimal>,

    /// Override the program's default subsidy rate, percentage points
    #[arg(long)]
    pub subsidy_rate: Option<Decimal>,
}

pub fn run_program_calculate(args: ProgramArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut request: ProgramCalculationInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input file is required for a program-constrained calculation".into());
    };

    // Flag overrides beat both the request body and the program defaults
    if args.bank_rate.is_some() {
        request.bank_rate = args.bank_rate;
    }
    if args.subsidy_rate.is_some() {
        request.subsidy_rate = args.subsidy_rate;
    }

    let result = program::calculate_with_program(&request)?;
    Ok(serde_json::to_value(result)?)
}
