//! Savings Domain
//!
//! Goals and funds both earmark money out of the wallet. Each keeps an
//! append-only history of deposits and withdrawals plus a cached running
//! total.
//!
//! # Two totals
//!
//! - `current_total()` reads the cached field, which is what the user
//!   sees on the goal or fund card.
//! - `total_as_of(date)` replays the history up to a date and floors the
//!   result at zero. Every balance or savings figure computed for a date
//!   goes through this one.
//!
//! # Dynamic quota
//!
//! A goal's monthly quota is never stored. It is recomputed from the
//! remaining amount and the months left to the deadline on every call, so
//! a skipped or extra contribution spreads itself over the months that
//! remain.

pub mod history;
pub mod goal;
pub mod fund;
pub mod quota;
pub mod error;

pub use history::{replay, HistoryEntry};
pub use goal::{Goal, GoalEntryType, GoalHistoryItem};
pub use fund::{AutoSaveConfig, Fund, FundEntryType, FundTransaction};
pub use quota::{
    contributions_in_month, is_paid_this_month, monthly_quota, months_remaining,
    total_savings_at_date, GoalProgress, GoalStatus,
};
pub use error::SavingsError;
