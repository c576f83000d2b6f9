//! Project Domain
//!
//! A project (a renovation, a small venture) keeps its own ledger of
//! income and expenses, separate from the wallet. Income records where
//! the capital came from; expenses may be charged to a budget line.
//!
//! # Key Concepts
//!
//! - **Funding source**: `internal` income is moved out of the user's
//!   wallet and must be mirrored by a wallet expense; `external` income
//!   comes from somebody else and touches nothing outside the project
//! - **Budget line**: an allocation of received income; its spent amount
//!   is always recomputed from the expenses that reference it
//! - **Stats**: project-local liquidity and budget consumption

pub mod project;
pub mod budget;
pub mod stats;
pub mod error;

pub use project::{
    FundingSource, Milestone, Project, ProjectMember, ProjectStatus, ProjectTransaction, Task,
};
pub use budget::{available_to_allocate, budget_line_usage, BudgetLine, BudgetLineUsage};
pub use stats::{project_stats, ProjectStats};
pub use error::ProjectError;
