//! Kernel errors shared by the domain crates

use rust_decimal::Decimal;
use thiserror::Error;

use crate::ports::PortError;
use crate::temporal::TemporalError;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A user-entered amount rounded to zero cents or below
    #[error("{field} must be greater than zero, got {amount}")]
    NonPositiveAmount { field: String, amount: Decimal },

    #[error(transparent)]
    Temporal(#[from] TemporalError),

    #[error(transparent)]
    Port(#[from] PortError),
}

impl CoreError {
    pub fn non_positive(field: impl Into<String>, amount: Decimal) -> Self {
        CoreError::NonPositiveAmount {
            field: field.into(),
            amount,
        }
    }

    /// Name of the offending input, when the error concerns one
    pub fn field(&self) -> Option<&str> {
        match self {
            CoreError::NonPositiveAmount { field, .. } => Some(field),
            CoreError::Temporal(_) | CoreError::Port(_) => None,
        }
    }
}
