//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! finance engine test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built dates, amounts and identifiers
//! - `builders`: Builder patterns for test records
//! - `stores`: Collection adapters that fail on demand
//! - `assertions`: Custom assertion helpers for amounts
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod stores;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use stores::*;
pub use assertions::*;
pub use generators::*;
