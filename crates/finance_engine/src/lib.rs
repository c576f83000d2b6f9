//! Finance Engine
//!
//! Read-only fan-in over the five record collections (transactions,
//! goals, funds, credits, projects) plus the services that write to them.
//!
//! # Architecture
//!
//! - **Collections**: one [`CollectionPort`](core_kernel::CollectionPort)
//!   per record type, injected so tests can feed fixture snapshots
//! - **Snapshot**: a copy of all five projections taken at the start of
//!   every read; nothing computed from it is cached
//! - **Balance**: net cash flow minus everything earmarked in goals and
//!   funds, as of any date
//! - **Ledger**: every money movement from every collection in one
//!   date-descending feed
//! - **Services**: validated writes, including the capital-injection
//!   saga that spans the wallet and a project
//!
//! # Example
//!
//! ```rust,ignore
//! use finance_engine::{Collections, EngineConfig, FinanceEngine};
//!
//! let engine = FinanceEngine::new(Collections::in_memory(user_id), EngineConfig::default());
//! let balance = engine.current_balance();
//! ```

pub mod config;
pub mod error;
pub mod collections;
pub mod snapshot;
pub mod balance;
pub mod ledger;
pub mod engine;
pub mod saga;
pub mod services;

pub use config::EngineConfig;
pub use error::EngineError;
pub use collections::Collections;
pub use snapshot::FinanceSnapshot;
pub use balance::{balance_at_date, BalanceBreakdown};
pub use ledger::{
    build_ledger, group_by_date, LedgerDay, LedgerEntry, LedgerFilter, LedgerSource,
    LedgerSummary,
};
pub use engine::FinanceEngine;
pub use saga::{CapitalInjection, SagaStep};
