//! Project domain errors

use core_kernel::CoreError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur in the project domain
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Invalid project: {0}")]
    InvalidProject(String),

    #[error("Invalid project transaction: {0}")]
    InvalidTransaction(String),

    #[error("Budget line {0} does not exist in this project")]
    UnknownBudgetLine(String),

    #[error("Budget over-allocation: available {available}, requested {requested}")]
    OverAllocation { available: Decimal, requested: Decimal },

    #[error(transparent)]
    Core(#[from] CoreError),
}
