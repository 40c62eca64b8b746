//! Subsidy amortization engine: annuity repayment under the raw bank
//! rate versus the bank rate net of the government subsidy, with
//! comparative savings metrics and a full month-by-month schedule.
//! All math in `rust_decimal::Decimal`.

pub mod engine;
pub mod program;
pub mod schedule;

pub use engine::{annuity_payment, calculate, validate};
pub use program::{calculate_with_program, ProgramCalculationInput, SubsidyProgram};
pub use schedule::{generate_schedule, ScheduleOutput};
