//! Credit domain errors

use core_kernel::CoreError;
use thiserror::Error;

/// Errors that can occur in the credit domain
#[derive(Debug, Error)]
pub enum CreditError {
    #[error("Invalid credit: {0}")]
    InvalidCredit(String),

    #[error("Credit {0} is already paid")]
    AlreadyPaid(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}
