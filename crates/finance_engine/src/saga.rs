//! Capital-injection saga
//!
//! Funding a project from the wallet writes two collections: a wallet
//! expense and the project income it mirrors. The backing store offers
//! no multi-document transaction, so the writes run in sequence:
//!
//! ```text
//!  prepare ──► debit wallet ──► credit project ──► confirmed
//!                  │                  │
//!                  ✗ nothing written  ✗ remove wallet expense
//!                                          │
//!                                          ✗ ConsistencyGap(orphan id)
//! ```
//!
//! When the project write fails the mirrored expense is removed again.
//! If that removal also fails the expense is left orphaned and the caller
//! gets [`EngineError::ConsistencyGap`] naming it. Nothing is retried.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{error, info, warn};

use core_kernel::money::ensure_positive;
use core_kernel::{ProjectId, TransactionId};
use domain_project::{FundingSource, Project, ProjectTransaction};
use domain_wallet::Transaction;

use crate::engine::FinanceEngine;
use crate::error::EngineError;

/// Progress of a capital injection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SagaStep {
    /// Inputs checked, nothing written yet
    Prepared,
    /// Wallet expense written
    WalletDebited,
    /// Project income written
    Confirmed,
    /// Wallet expense removed after the project write failed
    Compensated,
    /// Wallet expense could not be removed
    Orphaned,
}

/// One internal funding of a project, from validation to confirmation
pub struct CapitalInjection<'a> {
    engine: &'a FinanceEngine,
    project: Project,
    income: ProjectTransaction,
    mirror: Option<TransactionId>,
    step: SagaStep,
}

impl<'a> CapitalInjection<'a> {
    /// Validates the injection without writing anything
    ///
    /// # Errors
    ///
    /// - `NotFound` if the project does not exist
    /// - a validation error if the amount is not positive
    /// - `InsufficientFunds` if the amount exceeds the current balance
    pub fn prepare(
        engine: &'a FinanceEngine,
        project_id: ProjectId,
        amount: Decimal,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> Result<Self, EngineError> {
        let project = engine.find_project(project_id)?;
        let cents = ensure_positive(amount, "amount")?;
        let income =
            ProjectTransaction::income(amount, FundingSource::Internal, date, description);
        project.validate_transaction(&income)?;
        engine.ensure_affordable(cents)?;

        Ok(Self {
            engine,
            project,
            income,
            mirror: None,
            step: SagaStep::Prepared,
        })
    }

    pub fn step(&self) -> SagaStep {
        self.step
    }

    /// Id of the wallet expense written by the saga, if any
    pub fn mirror(&self) -> Option<TransactionId> {
        self.mirror
    }

    /// Runs the writes and returns the recorded project income
    ///
    /// The saga keeps its final [`SagaStep`] so callers can inspect how
    /// far it got.
    pub async fn execute(&mut self) -> Result<ProjectTransaction, EngineError> {
        if self.step != SagaStep::Prepared {
            return Err(EngineError::Validation(format!(
                "capital injection already ran ({:?})",
                self.step
            )));
        }
        let mirror_id = self.debit_wallet().await?;

        if let Err(cause) = self.credit_project().await {
            return Err(self.compensate(mirror_id, cause).await);
        }

        self.step = SagaStep::Confirmed;
        info!(
            project_id = %self.project.id,
            transaction_id = %mirror_id,
            amount = %self.income.amount,
            "Capital injection confirmed"
        );
        Ok(self.income.clone())
    }

    async fn debit_wallet(&mut self) -> Result<TransactionId, EngineError> {
        let expense = Transaction::expense(
            self.income.amount,
            self.engine.config.investment_category.clone(),
            self.income.date,
        )
        .with_description(format!("Capital injection: {}", self.project.name));

        let id = self.engine.collections.transactions.add(expense).await?;
        self.mirror = Some(id);
        self.step = SagaStep::WalletDebited;
        Ok(id)
    }

    async fn credit_project(&mut self) -> Result<(), EngineError> {
        let mut updated = self.project.clone();
        updated.add_transaction(self.income.clone())?;
        self.engine
            .collections
            .projects
            .update(updated.id, updated)
            .await?;
        Ok(())
    }

    async fn compensate(&mut self, mirror_id: TransactionId, cause: EngineError) -> EngineError {
        match self.engine.collections.transactions.remove(mirror_id).await {
            Ok(()) => {
                self.step = SagaStep::Compensated;
                self.mirror = None;
                warn!(
                    project_id = %self.project.id,
                    transaction_id = %mirror_id,
                    error = %cause,
                    "Project write failed, wallet expense removed"
                );
                cause
            }
            Err(compensation) => {
                self.step = SagaStep::Orphaned;
                error!(
                    project_id = %self.project.id,
                    transaction_id = %mirror_id,
                    error = %cause,
                    compensation_error = %compensation,
                    "Project write failed and the wallet expense could not be removed"
                );
                EngineError::ConsistencyGap {
                    orphan: mirror_id.to_string(),
                    cause: format!("{}; removal failed: {}", cause, compensation),
                }
            }
        }
    }
}
