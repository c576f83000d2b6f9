//! Project writes

use rust_decimal::Decimal;
use tracing::info;

use core_kernel::{BudgetLineId, ProjectId};
use domain_project::{BudgetLine, FundingSource, Project, ProjectTransaction};

use crate::engine::FinanceEngine;
use crate::error::EngineError;
use crate::saga::CapitalInjection;

impl FinanceEngine {
    /// Stores a new project
    pub async fn create_project(&self, project: Project) -> Result<ProjectId, EngineError> {
        project.validate()?;
        let id = self.collections.projects.add(project).await?;
        info!(project_id = %id, "Project created");
        Ok(id)
    }

    /// Deletes a project
    ///
    /// Wallet expenses that mirrored internal funding stay in the wallet.
    pub async fn delete_project(&self, id: ProjectId) -> Result<(), EngineError> {
        self.find_project(id)?;
        self.collections.projects.remove(id).await?;
        info!(project_id = %id, "Project deleted");
        Ok(())
    }

    /// Records project income dated today
    ///
    /// Internal funding runs the [`CapitalInjection`] saga; external
    /// funding only writes the project.
    pub async fn add_project_income(
        &self,
        id: ProjectId,
        amount: Decimal,
        funding_source: FundingSource,
        description: impl Into<String>,
    ) -> Result<ProjectTransaction, EngineError> {
        let today = self.today();
        match funding_source {
            FundingSource::Internal => {
                CapitalInjection::prepare(self, id, amount, today, description)?
                    .execute()
                    .await
            }
            FundingSource::External => {
                let tx = ProjectTransaction::income(amount, FundingSource::External, today, description);
                self.append_project_transaction(id, tx).await
            }
        }
    }

    /// Records a project expense dated today, optionally charged to a budget line
    ///
    /// Expenses are paid from the project's own liquidity and do not touch
    /// the wallet.
    pub async fn add_project_expense(
        &self,
        id: ProjectId,
        amount: Decimal,
        description: impl Into<String>,
        budget_line_id: Option<BudgetLineId>,
        category: Option<String>,
    ) -> Result<ProjectTransaction, EngineError> {
        let mut tx = ProjectTransaction::expense(amount, self.today(), description);
        tx.budget_line_id = budget_line_id;
        tx.category = category;
        self.append_project_transaction(id, tx).await
    }

    /// Allocates received income to a new budget line
    pub async fn add_budget_line(
        &self,
        id: ProjectId,
        name: impl Into<String>,
        allocated_amount: Decimal,
    ) -> Result<BudgetLine, EngineError> {
        let mut project = self.find_project(id)?;
        let line = project.add_budget_line(name, allocated_amount).map_err(|error| {
            tracing::warn!(project_id = %id, error = %error, "Rejected budget line");
            error
        })?;
        self.collections.projects.update(id, project).await?;
        info!(project_id = %id, budget_line_id = %line.id, "Budget line added");
        Ok(line)
    }

    async fn append_project_transaction(
        &self,
        id: ProjectId,
        tx: ProjectTransaction,
    ) -> Result<ProjectTransaction, EngineError> {
        let mut project = self.find_project(id)?;
        if let Err(error) = project.add_transaction(tx.clone()) {
            tracing::warn!(project_id = %id, error = %error, "Rejected project transaction");
            return Err(error.into());
        }
        self.collections.projects.update(id, project).await?;
        info!(project_id = %id, transaction_id = %tx.id, "Project transaction recorded");
        Ok(tx)
    }
}
