use rust_decimal::Decimal;
use thiserror::Error;

/// Input-validation failures. Every variant is caller-correctable:
/// resubmit with fixed input and the calculation will succeed. There
/// is no internal-fault class in this component.
///
/// Display messages are Russian, matching the portal's user-facing
/// error contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubsidyEngineError {
    #[error("Сумма займа должна быть больше нуля")]
    InvalidAmount,

    #[error("Срок займа должен быть от 1 до {max} месяцев")]
    InvalidTerm { max: u32 },

    #[error("Ставка банка должна быть в диапазоне от 0 до 100 процентов")]
    InvalidBankRate,

    #[error("Ставка субсидирования не может быть отрицательной")]
    InvalidSubsidyRate,

    #[error("Ставка субсидирования не может превышать ставку банка")]
    SubsidyExceedsBankRate,

    #[error("Ставки не заданы: укажите ставки явно или выберите программу со ставками по умолчанию")]
    MissingRates,

    #[error("Сумма займа {amount} вне допустимого диапазона программы: {reason}")]
    AmountOutOfRange { amount: Decimal, reason: String },

    #[error("Срок займа {requested} месяцев превышает максимальный срок программы {max} месяцев")]
    TermExceeded { requested: u32, max: u32 },
}
