use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use subsidy_engine_core::amortization::schedule;

use crate::commands::calculate::build_calculation_input;

/// Arguments for the full amortization schedule
#[derive(Args)]
pub struct ScheduleArgs {
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

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let calc_input = build_calculation_input(
        &args.input,
        args.loan_amount,
        args.loan_term_months,
        args.bank_rate,
        args.subsidy_rate,
    )?;

    let result = schedule::generate_schedule(&calc_input)?;
    Ok(serde_json::to_value(result)?)
}
