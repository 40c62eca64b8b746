use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use std::time::Instant;

use crate::error::SubsidyEngineError;
use crate::rounding::round_money;
use crate::types::*;
use crate::SubsidyResult;

/// Months per year times 100: converts an annual percent rate to a
/// monthly fraction in one division.
const ANNUAL_PERCENT_TO_MONTHLY: Decimal = dec!(1200);

/// Validate a calculation request. Checks run in contract order and
/// fail fast on the first violation.
pub fn validate(input: &CalculationInput) -> SubsidyResult<()> {
    if input.loan_amount <= Decimal::ZERO {
        return Err(SubsidyEngineError::InvalidAmount);
    }
    if input.loan_term_months == 0 || input.loan_term_months > MAX_TERM_MONTHS {
        return Err(SubsidyEngineError::InvalidTerm {
            max: MAX_TERM_MONTHS,
        });
    }
    if input.bank_rate < Decimal::ZERO || input.bank_rate > MAX_RATE_PERCENT {
        return Err(SubsidyEngineError::InvalidBankRate);
    }
    if input.subsidy_rate < Decimal::ZERO {
        return Err(SubsidyEngineError::InvalidSubsidyRate);
    }
    if input.subsidy_rate > input.bank_rate {
        return Err(SubsidyEngineError::SubsidyExceedsBankRate);
    }
    Ok(())
}

pub(crate) fn monthly_rate(annual_rate_percent: Rate) -> Rate {
    annual_rate_percent / ANNUAL_PERCENT_TO_MONTHLY
}

/// Fixed monthly payment fully amortizing `principal` over
/// `term_months` at the given annual percent rate (French annuity).
///
/// A zero rate degenerates to straight division, avoiding a zero
/// denominator in the compound-factor formula.
pub fn annuity_payment(
    principal: Money,
    annual_rate_percent: Rate,
    term_months: u32,
) -> SubsidyResult<Money> {
    if term_months == 0 {
        return Err(SubsidyEngineError::InvalidTerm {
            max: MAX_TERM_MONTHS,
        });
    }

    if annual_rate_percent.is_zero() {
        return Ok(principal / Decimal::from(term_months));
    }

    let rate = monthly_rate(annual_rate_percent);
    let compound_factor = (Decimal::ONE + rate).powd(Decimal::from(term_months));

    Ok(principal * (rate * compound_factor) / (compound_factor - Decimal::ONE))
}

/// Compare repayment under the raw bank rate and the subsidized rate.
///
/// Monthly payments are rounded to 2 dp first; savings and totals are
/// derived from the rounded monthly figures, so the identity
/// `total_savings = monthly_savings * term` holds exactly.
pub fn calculate(
    input: &CalculationInput,
) -> SubsidyResult<ComputationOutput<CalculationResult>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    validate(input)?;

    let effective_rate = input.bank_rate - input.subsidy_rate;

    let monthly_payment_before = round_money(annuity_payment(
        input.loan_amount,
        input.bank_rate,
        input.loan_term_months,
    )?);
    let monthly_payment_after = round_money(annuity_payment(
        input.loan_amount,
        effective_rate,
        input.loan_term_months,
    )?);

    let term = Decimal::from(input.loan_term_months);
    let monthly_savings = monthly_payment_before - monthly_payment_after;
    let total_payment_before = monthly_payment_before * term;
    let total_payment_after = monthly_payment_after * term;

    let result = CalculationResult {
        input: input.clone(),
        effective_rate,
        monthly_payment_before,
        monthly_payment_after,
        monthly_savings,
        total_savings: monthly_savings * term,
        total_payment_before,
        total_payment_after,
        total_interest_before: round_money(total_payment_before - input.loan_amount),
        total_interest_after: round_money(total_payment_after - input.loan_amount),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "amortization": "French annuity, monthly compounding",
        "rate_basis": "annual percent",
        "rounding": "half-up to 2 dp at presentation only",
    });

    Ok(with_metadata(
        "Subsidized Loan Annuity Comparison",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}
