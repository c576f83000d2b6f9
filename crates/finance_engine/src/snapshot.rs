//! Point-in-time copy of every collection

use serde::{Deserialize, Serialize};

use domain_credit::Credit;
use domain_project::Project;
use domain_savings::{Fund, Goal};
use domain_wallet::Transaction;

use crate::collections::Collections;

/// The five projections as they stood when captured
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinanceSnapshot {
    pub transactions: Vec<Transaction>,
    pub goals: Vec<Goal>,
    pub funds: Vec<Fund>,
    pub credits: Vec<Credit>,
    pub projects: Vec<Project>,
}

impl FinanceSnapshot {
    /// Copies the current projection of every collection
    pub fn capture(collections: &Collections) -> Self {
        Self {
            transactions: collections.transactions.snapshot(),
            goals: collections.goals.snapshot(),
            funds: collections.funds.snapshot(),
            credits: collections.credits.snapshot(),
            projects: collections.projects.snapshot(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
            && self.goals.is_empty()
            && self.funds.is_empty()
            && self.credits.is_empty()
            && self.projects.is_empty()
    }
}
