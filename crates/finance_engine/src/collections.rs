//! The five record collections the engine reads and writes

use std::sync::Arc;

use core_kernel::{CollectionPort, InMemoryCollection, UserId};
use domain_credit::Credit;
use domain_project::Project;
use domain_savings::{Fund, Goal};
use domain_wallet::Transaction;

use crate::snapshot::FinanceSnapshot;

/// One port per record type, all scoped to the same user
#[derive(Clone)]
pub struct Collections {
    pub transactions: Arc<dyn CollectionPort<Transaction>>,
    pub goals: Arc<dyn CollectionPort<Goal>>,
    pub funds: Arc<dyn CollectionPort<Fund>>,
    pub credits: Arc<dyn CollectionPort<Credit>>,
    pub projects: Arc<dyn CollectionPort<Project>>,
}

impl Collections {
    /// Creates empty in-memory collections owned by `owner`
    pub fn in_memory(owner: UserId) -> Self {
        Self {
            transactions: Arc::new(InMemoryCollection::<Transaction>::new(owner)),
            goals: Arc::new(InMemoryCollection::<Goal>::new(owner)),
            funds: Arc::new(InMemoryCollection::<Fund>::new(owner)),
            credits: Arc::new(InMemoryCollection::<Credit>::new(owner)),
            projects: Arc::new(InMemoryCollection::<Project>::new(owner)),
        }
    }

    /// Creates the collections seen when nobody is signed in
    pub fn signed_out() -> Self {
        Self {
            transactions: Arc::new(InMemoryCollection::<Transaction>::signed_out()),
            goals: Arc::new(InMemoryCollection::<Goal>::signed_out()),
            funds: Arc::new(InMemoryCollection::<Fund>::signed_out()),
            credits: Arc::new(InMemoryCollection::<Credit>::signed_out()),
            projects: Arc::new(InMemoryCollection::<Project>::signed_out()),
        }
    }

    /// Replaces the wallet collection, keeping the others
    pub fn with_transactions(mut self, port: Arc<dyn CollectionPort<Transaction>>) -> Self {
        self.transactions = port;
        self
    }

    /// Replaces the goal collection, keeping the others
    pub fn with_goals(mut self, port: Arc<dyn CollectionPort<Goal>>) -> Self {
        self.goals = port;
        self
    }

    /// Replaces the fund collection, keeping the others
    pub fn with_funds(mut self, port: Arc<dyn CollectionPort<Fund>>) -> Self {
        self.funds = port;
        self
    }

    /// Replaces the credit collection, keeping the others
    pub fn with_credits(mut self, port: Arc<dyn CollectionPort<Credit>>) -> Self {
        self.credits = port;
        self
    }

    /// Replaces the project collection, keeping the others
    pub fn with_projects(mut self, port: Arc<dyn CollectionPort<Project>>) -> Self {
        self.projects = port;
        self
    }

    /// Pushes a full snapshot into every collection
    pub fn apply_snapshot(&self, snapshot: FinanceSnapshot) {
        self.transactions.apply_snapshot(snapshot.transactions);
        self.goals.apply_snapshot(snapshot.goals);
        self.funds.apply_snapshot(snapshot.funds);
        self.credits.apply_snapshot(snapshot.credits);
        self.projects.apply_snapshot(snapshot.projects);
    }

    /// True while any collection is still waiting for its first snapshot
    pub fn is_loading(&self) -> bool {
        self.transactions.is_loading()
            || self.goals.is_loading()
            || self.funds.is_loading()
            || self.credits.is_loading()
            || self.projects.is_loading()
    }
}
