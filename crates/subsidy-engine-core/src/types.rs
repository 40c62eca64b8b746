use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// All monetary values (tenge). Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Annual rates expressed in percent (20.5 = 20.5% p.a.). Never as fractions.
pub type Rate = Decimal;

/// Longest supported loan term (30 years).
pub const MAX_TERM_MONTHS: u32 = 360;

/// Upper bound on the nominal annual bank rate.
pub const MAX_RATE_PERCENT: Decimal = dec!(100);

/// Request for a subsidy comparison. Immutable once constructed;
/// field names follow the portal's JSON contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInput {
    /// Loan principal.
    pub loan_amount: Money,
    /// Term in months, 1..=360.
    pub loan_term_months: u32,
    /// Nominal annual bank rate, percent.
    pub bank_rate: Rate,
    /// Annual subsidy, percentage points subtracted from the bank rate.
    pub subsidy_rate: Rate,
}

/// Comparison of repayment under the raw bank rate ("before") and the
/// subsidized rate ("after"). All monetary fields are rounded to 2 dp
/// (half-up) for presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub input: CalculationInput,
    /// Bank rate minus subsidy rate, percent.
    pub effective_rate: Rate,
    pub monthly_payment_before: Money,
    pub monthly_payment_after: Money,
    pub monthly_savings: Money,
    pub total_savings: Money,
    pub total_payment_before: Money,
    pub total_payment_after: Money,
    pub total_interest_before: Money,
    pub total_interest_after: Money,
}

/// One month of the amortization schedule, under both rate regimes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    /// 1-based month number.
    pub month: u32,
    pub payment_before: Money,
    pub payment_after: Money,
    pub principal_before: Money,
    pub principal_after: Money,
    pub interest_before: Money,
    pub interest_after: Money,
    pub balance_before: Money,
    pub balance_after: Money,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
