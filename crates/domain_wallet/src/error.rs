//! Wallet domain errors

use core_kernel::CoreError;
use thiserror::Error;

/// Errors that can occur in the wallet domain
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid category rename: {0}")]
    InvalidRename(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}
