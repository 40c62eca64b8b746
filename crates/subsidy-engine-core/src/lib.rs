pub mod amortization;
pub mod error;
pub mod rounding;
pub mod types;

pub use error::SubsidyEngineError;
pub use types::*;

/// Standard result type for all subsidy-engine operations
pub type SubsidyResult<T> = Result<T, SubsidyEngineError>;
