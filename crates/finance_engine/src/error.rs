//! Engine errors
//!
//! Validation failures are raised before any collection is written.
//! Persistence failures carry the store's [`PortError`] unchanged.

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::money::{from_cents, Cents};
use core_kernel::{CoreError, PortError};
use domain_credit::CreditError;
use domain_project::ProjectError;
use domain_savings::SavingsError;
use domain_wallet::WalletError;

/// Errors returned by engine reads and services
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Insufficient funds: available {available}, needed {needed}")]
    InsufficientFunds { available: Decimal, needed: Decimal },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Savings(#[from] SavingsError),

    #[error(transparent)]
    Credit(#[from] CreditError),

    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PortError),

    /// A cross-collection write left a record behind that could not be removed
    #[error("Consistency gap: transaction {orphan} has no matching project income ({cause})")]
    ConsistencyGap { orphan: String, cause: String },
}

impl EngineError {
    /// Creates an InsufficientFunds error from cent amounts
    pub fn insufficient_funds(available: Cents, needed: Cents) -> Self {
        EngineError::InsufficientFunds {
            available: from_cents(available),
            needed: from_cents(needed),
        }
    }

    /// Creates a NotFound error
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        EngineError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// True for errors raised before anything was written
    pub fn is_validation(&self) -> bool {
        match self {
            EngineError::Validation(_)
            | EngineError::Wallet(_)
            | EngineError::Savings(_)
            | EngineError::Credit(_)
            | EngineError::Project(_)
            | EngineError::Core(_) => true,
            EngineError::Persistence(PortError::Validation { .. }) => true,
            _ => false,
        }
    }

    /// True when the requested record does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, EngineError::NotFound { .. })
            || matches!(self, EngineError::Persistence(error) if error.is_not_found())
    }
}
