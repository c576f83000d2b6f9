//! Core Kernel - Foundational types for the finance engine
//!
//! This crate provides the building blocks used across all domain crates:
//! - Integer-cents money arithmetic and rates
//! - Calendar helpers and the injectable clock
//! - Strongly-typed record identifiers
//! - The record-store port and its in-memory adapter

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod ports;
pub mod store;
pub mod error;

pub use money::{Cents, Rate, to_cents, from_cents, safe_add, safe_sub, safe_mul, safe_div, safe_percent};
pub use temporal::{Clock, SystemClock, FixedClock, Timezone, DateRange, TemporalError};
pub use identifiers::{
    UserId, TransactionId, GoalId, GoalEntryId, FundId, FundEntryId,
    CreditId, PaymentId, ProjectId, ProjectTransactionId, BudgetLineId,
    MilestoneId, TaskId, MemberId,
};
pub use ports::{CollectionPort, DomainPort, PortError, Record};
pub use store::InMemoryCollection;
pub use error::CoreError;
