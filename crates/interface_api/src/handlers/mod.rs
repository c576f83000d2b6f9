//! Request handlers, one module per resource

pub mod health;
pub mod balance;
pub mod wallet;
pub mod ledger;
pub mod goals;
pub mod funds;
pub mod credits;
pub mod projects;
