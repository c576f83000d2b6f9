//! Wallet Domain
//!
//! The wallet is the user's liquid cash flow: a flat list of income and
//! expense transactions. Everything else in the system (goals, funds,
//! credits, projects) either earmarks or consumes money that first
//! entered through here.
//!
//! # Key Concepts
//!
//! - **Transaction**: an immutable income or expense on a calendar date
//! - **Totals**: income and expense sums carried in cents
//! - **Category rename**: the only bulk edit allowed on existing records

pub mod transaction;
pub mod totals;
pub mod error;

pub use transaction::{rename_category, Transaction, TransactionType};
pub use totals::TransactionTotals;
pub use error::WalletError;
