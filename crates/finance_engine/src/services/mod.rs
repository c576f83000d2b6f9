//! Write services
//!
//! Each service validates its input against the current snapshot before
//! touching a collection, so a rejected request leaves every collection
//! unchanged. Store failures are returned as
//! [`EngineError::Persistence`](crate::EngineError::Persistence).

pub mod wallet;
pub mod savings;
pub mod credits;
pub mod projects;
