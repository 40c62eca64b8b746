use serde::{Deserialize, Serialize};

use crate::amortization::engine::calculate;
use crate::error::SubsidyEngineError;
use crate::types::*;
use crate::SubsidyResult;

/// An already-fetched support-program record. The engine never loads
/// programs itself; the caller supplies the record read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubsidyProgram {
    pub name: String,
    /// Default nominal annual bank rate, percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_rate: Option<Rate>,
    /// Default annual subsidy, percentage points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsidy_rate: Option<Rate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_loan_amount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_loan_amount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_loan_term_months: Option<u32>,
}

/// A calculation request scoped to a program. The optional rates
/// override the program defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramCalculationInput {
    pub program: SubsidyProgram,
    pub loan_amount: Money,
    pub loan_term_months: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_rate: Option<Rate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsidy_rate: Option<Rate>,
}

/// Run the comparison under a program's guardrails: rates resolve as
/// override-else-program-default, and the requested amount and term
/// must fit the program limits before the engine is invoked.
pub fn calculate_with_program(
    input: &ProgramCalculationInput,
) -> SubsidyResult<ComputationOutput<CalculationResult>> {
    let program = &input.program;

    let bank_rate = input
        .bank_rate
        .or(program.bank_rate)
        .ok_or(SubsidyEngineError::MissingRates)?;
    let subsidy_rate = input
        .subsidy_rate
        .or(program.subsidy_rate)
        .ok_or(SubsidyEngineError::MissingRates)?;

    if let Some(min) = program.min_loan_amount {
        if input.loan_amount < min {
            return Err(SubsidyEngineError::AmountOutOfRange {
                amount: input.loan_amount,
                reason: format!("минимальная сумма по программе «{}» — {}", program.name, min),
            });
        }
    }
    if let Some(max) = program.max_loan_amount {
        if input.loan_amount > max {
            return Err(SubsidyEngineError::AmountOutOfRange {
                amount: input.loan_amount,
                reason: format!("максимальная сумма по программе «{}» — {}", program.name, max),
            });
        }
    }
    if let Some(max_term) = program.max_loan_term_months {
        if input.loan_term_months > max_term {
            return Err(SubsidyEngineError::TermExceeded {
                requested: input.loan_term_months,
                max: max_term,
            });
        }
    }

    calculate(&CalculationInput {
        loan_amount: input.loan_amount,
        loan_term_months: input.loan_term_months,
        bank_rate,
        subsidy_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn smb_program() -> SubsidyProgram {
        SubsidyProgram {
            name: "Поддержка МСБ".into(),
            bank_rate: Some(dec!(19)),
            subsidy_rate: Some(dec!(7)),
            min_loan_amount: Some(dec!(3_000_000)),
            max_loan_amount: Some(dec!(500_000_000)),
            max_loan_term_months: Some(84),
        }
    }

    fn request(amount: Decimal, term: u32) -> ProgramCalculationInput {
        ProgramCalculationInput {
            program: smb_program(),
            loan_amount: amount,
            loan_term_months: term,
            bank_rate: None,
            subsidy_rate: None,
        }
    }

    #[test]
    fn test_program_defaults_apply() {
        let output = calculate_with_program(&request(dec!(10_000_000), 60)).unwrap();
        let r = &output.result;

        assert_eq!(r.input.bank_rate, dec!(19));
        assert_eq!(r.input.subsidy_rate, dec!(7));
        assert_eq!(r.effective_rate, dec!(12));
    }

    #[test]
    fn test_overrides_beat_program_defaults() {
        let mut input = request(dec!(10_000_000), 60);
        input.bank_rate = Some(dec!(21));
        input.subsidy_rate = Some(dec!(9));

        let output = calculate_with_program(&input).unwrap();
        assert_eq!(output.result.effective_rate, dec!(12));
        assert_eq!(output.result.input.bank_rate, dec!(21));
    }

    #[test]
    fn test_missing_rates_rejected() {
        let mut input = request(dec!(10_000_000), 60);
        input.program.bank_rate = None;
        assert_eq!(
            calculate_with_program(&input).unwrap_err(),
            SubsidyEngineError::MissingRates
        );

        let mut input = request(dec!(10_000_000), 60);
        input.program.subsidy_rate = None;
        assert_eq!(
            calculate_with_program(&input).unwrap_err(),
            SubsidyEngineError::MissingRates
        );
    }

    #[test]
    fn test_amount_below_minimum_cites_bound() {
        let err = calculate_with_program(&request(dec!(1_000_000), 60)).unwrap_err();
        match err {
            SubsidyEngineError::AmountOutOfRange { amount, reason } => {
                assert_eq!(amount, dec!(1_000_000));
                assert!(reason.contains("3000000"));
            }
            other => panic!("Expected AmountOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_amount_above_maximum_rejected() {
        let err = calculate_with_program(&request(dec!(600_000_000), 60)).unwrap_err();
        assert!(matches!(err, SubsidyEngineError::AmountOutOfRange { .. }));
    }

    #[test]
    fn test_amount_bounds_inclusive() {
        assert!(calculate_with_program(&request(dec!(3_000_000), 60)).is_ok());
        assert!(calculate_with_program(&request(dec!(500_000_000), 60)).is_ok());
    }

    #[test]
    fn test_term_cap_enforced() {
        let err = calculate_with_program(&request(dec!(10_000_000), 85)).unwrap_err();
        assert_eq!(
            err,
            SubsidyEngineError::TermExceeded {
                requested: 85,
                max: 84
            }
        );

        assert!(calculate_with_program(&request(dec!(10_000_000), 84)).is_ok());
    }

    #[test]
    fn test_unbounded_program_skips_limit_checks() {
        let input = ProgramCalculationInput {
            program: SubsidyProgram {
                name: "Без ограничений".into(),
                bank_rate: Some(dec!(18)),
                subsidy_rate: Some(dec!(6)),
                min_loan_amount: None,
                max_loan_amount: None,
                max_loan_term_months: None,
            },
            loan_amount: dec!(1),
            loan_term_months: 360,
            bank_rate: None,
            subsidy_rate: None,
        };
        assert!(calculate_with_program(&input).is_ok());
    }

    #[test]
    fn test_engine_validation_still_applies() {
        // Override pushes subsidy above bank rate; the engine rejects it
        let mut input = request(dec!(10_000_000), 60);
        input.subsidy_rate = Some(dec!(25));
        assert_eq!(
            calculate_with_program(&input).unwrap_err(),
            SubsidyEngineError::SubsidyExceedsBankRate
        );
    }
}
