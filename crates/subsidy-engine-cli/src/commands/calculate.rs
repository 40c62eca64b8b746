use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use subsidy_engine_core::amortization::engine;
use subsidy_engine_core::CalculationInput;

use crate::input;

/// Arguments for the subsidy comparison calculation
#[derive(Args)]
pub struct CalculateArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal in tenge
    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Loan term in months (1-360)
    #[arg(long, alias = "term")]
    pub loan_term_months: Option<u32>,

    /// Nominal annual bank rate, percent
    #[arg(long)]
    pub bank_rate: Option<Decimal>,

    /// Annual subsidy, percentage points
    #[arg(long)]
    pub subsidy_rate: Option<Decimal>,
}

pub(crate) fn build_calculation_input(
    input_path: &Option<String>,
    loan_amount: Option<Decimal>,
    loan_term_months: Option<u32>,
    bank_rate: Option<Decimal>,
    subsidy_rate: Option<Decimal>,
) -> Result<CalculationInput, Box<dyn std::error::Error>> {
    if let Some(path) = input_path {
        return input::file::read_json(path);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }
    Ok(CalculationInput {
        loan_amount: loan_amount.ok_or("--loan-amount is required (or provide --input)")?,
        loan_term_months: loan_term_months
            .ok_or("--loan-term-months is required (or provide --input)")?,
        bank_rate: bank_rate.ok_or("--bank-rate is required (or provide --input)")?,
        subsidy_rate: subsidy_rate.ok_or("--subsidy-rate is required (or provide --input)")?,
    })
}

pub fn run_calculate(args: CalculateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let calc_input = build_calculation_input(
        &args.input,
        args.loan_amount,
        args.loan_term_months,
        args.bank_rate,
        args.subsidy_rate,
    )?;

    let result = engine::calculate(&calc_input)?;
    Ok(serde_json::to_value(result)?)
}
