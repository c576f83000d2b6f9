//! Savings domain errors

use core_kernel::CoreError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur in the savings domain
#[derive(Debug, Error)]
pub enum SavingsError {
    #[error("Invalid goal: {0}")]
    InvalidGoal(String),

    #[error("Invalid fund: {0}")]
    InvalidFund(String),

    #[error("Invalid auto-save configuration: {0}")]
    InvalidAutoSave(String),

    /// A withdrawal asked for more than the record currently holds
    #[error("Cannot withdraw {requested}: only {held} is saved")]
    ExceedsSaved { held: Decimal, requested: Decimal },

    #[error("Auto-save is not due for fund {0}")]
    AutoSaveNotDue(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}
