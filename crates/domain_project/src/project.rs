//! Projects and their sub-records

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::money::{ensure_positive, to_cents, Cents};
use core_kernel::{
    BudgetLineId, MemberId, MilestoneId, ProjectId, ProjectTransactionId, Record, TaskId,
};
use domain_wallet::TransactionType;

use crate::budget::BudgetLine;
use crate::error::ProjectError;

/// Lifecycle state of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Planning,
    Active,
    Paused,
    Completed,
    Cancelled,
}

/// Where project income came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FundingSource {
    /// Moved out of the user's own wallet
    Internal,
    /// Provided by a third party
    External,
}

/// An income or expense inside a project's own ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTransaction {
    pub id: ProjectTransactionId,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Income only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding_source: Option<FundingSource>,
    /// Expense only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_line_id: Option<BudgetLineId>,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ProjectTransaction {
    /// Creates an income entry
    pub fn income(
        amount: Decimal,
        funding_source: FundingSource,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: ProjectTransactionId::new_v7(),
            amount,
            transaction_type: TransactionType::Income,
            funding_source: Some(funding_source),
            budget_line_id: None,
            date,
            description: description.into(),
            category: None,
        }
    }

    /// Creates an expense entry
    pub fn expense(amount: Decimal, date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            id: ProjectTransactionId::new_v7(),
            amount,
            transaction_type: TransactionType::Expense,
            funding_source: None,
            budget_line_id: None,
            date,
            description: description.into(),
            category: None,
        }
    }

    /// Charges the expense to a budget line
    pub fn with_budget_line(mut self, budget_line_id: BudgetLineId) -> Self {
        self.budget_line_id = Some(budget_line_id);
        self
    }

    /// Sets the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    /// True for income moved in from the user's wallet
    pub fn is_internal_funding(&self) -> bool {
        self.is_income() && self.funding_source == Some(FundingSource::Internal)
    }

    pub fn cents(&self) -> Cents {
        to_cents(self.amount)
    }
}

/// A project milestone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: MilestoneId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
}

impl Milestone {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: MilestoneId::new_v7(),
            name: name.into(),
            due_date: None,
            completed: false,
        }
    }
}

/// A to-do item inside a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<MilestoneId>,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: TaskId::new_v7(),
            title: title.into(),
            completed: false,
            milestone_id: None,
        }
    }
}

/// Someone taking part in a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMember {
    pub id: MemberId,
    pub name: String,
    #[serde(default)]
    pub role: String,
}

/// A project as persisted in the `projects` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub target_budget: Decimal,
    pub status: ProjectStatus,
    #[serde(default)]
    pub transactions: Vec<ProjectTransaction>,
    #[serde(default)]
    pub budget_lines: Vec<BudgetLine>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub members: Vec<ProjectMember>,
}

impl Project {
    /// Creates a project in the planning state
    pub fn new(name: impl Into<String>, target_budget: Decimal) -> Self {
        Self {
            id: ProjectId::new_v7(),
            name: name.into(),
            target_budget,
            status: ProjectStatus::Planning,
            transactions: Vec::new(),
            budget_lines: Vec::new(),
            milestones: Vec::new(),
            tasks: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Sets the status
    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    pub fn validate(&self) -> Result<(), ProjectError> {
        if self.name.trim().is_empty() {
            return Err(ProjectError::InvalidProject("name must not be empty".to_string()));
        }
        if self.target_budget.is_sign_negative() {
            return Err(ProjectError::InvalidProject(format!(
                "target budget must not be negative, got {}",
                self.target_budget
            )));
        }
        Ok(())
    }

    pub fn budget_line(&self, id: BudgetLineId) -> Option<&BudgetLine> {
        self.budget_lines.iter().find(|line| line.id == id)
    }

    /// Checks a transaction against this project before it is appended
    pub fn validate_transaction(&self, tx: &ProjectTransaction) -> Result<(), ProjectError> {
        ensure_positive(tx.amount, "amount")?;
        match tx.transaction_type {
            TransactionType::Income => {
                if tx.funding_source.is_none() {
                    return Err(ProjectError::InvalidTransaction(
                        "income must name a funding source".to_string(),
                    ));
                }
                if tx.budget_line_id.is_some() {
                    return Err(ProjectError::InvalidTransaction(
                        "income cannot be charged to a budget line".to_string(),
                    ));
                }
            }
            TransactionType::Expense => {
                if tx.funding_source.is_some() {
                    return Err(ProjectError::InvalidTransaction(
                        "expenses do not carry a funding source".to_string(),
                    ));
                }
                if let Some(line_id) = tx.budget_line_id {
                    if self.budget_line(line_id).is_none() {
                        return Err(ProjectError::UnknownBudgetLine(line_id.to_string()));
                    }
                }
            }
        }
        Ok(())
    }

    /// Validates and appends a transaction, refreshing budget-line usage
    pub fn add_transaction(&mut self, tx: ProjectTransaction) -> Result<(), ProjectError> {
        self.validate_transaction(&tx)?;
        self.transactions.push(tx);
        self.refresh_spent();
        Ok(())
    }

    pub fn total_income(&self) -> Cents {
        self.transactions.iter().filter(|tx| tx.is_income()).map(ProjectTransaction::cents).sum()
    }

    pub fn total_expenses(&self) -> Cents {
        self.transactions.iter().filter(|tx| tx.is_expense()).map(ProjectTransaction::cents).sum()
    }
}

impl Record for Project {
    type Id = ProjectId;
    const COLLECTION: &'static str = "projects";

    fn id(&self) -> ProjectId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, d).unwrap()
    }

    #[test]
    fn test_totals() {
        let mut project = Project::new("Kitchen", dec!(5000));
        project
            .add_transaction(ProjectTransaction::income(dec!(3000), FundingSource::External, date(1), "loan"))
            .unwrap();
        project
            .add_transaction(ProjectTransaction::expense(dec!(1250.75), date(2), "tiles"))
            .unwrap();

        assert_eq!(project.total_income(), Cents::new(300_000));
        assert_eq!(project.total_expenses(), Cents::new(125_075));
    }

    #[test]
    fn test_unknown_budget_line_rejected() {
        let mut project = Project::new("Kitchen", dec!(5000));
        let tx = ProjectTransaction::expense(dec!(10), date(2), "paint")
            .with_budget_line(BudgetLineId::new());

        assert!(matches!(
            project.add_transaction(tx),
            Err(ProjectError::UnknownBudgetLine(_))
        ));
        assert!(project.transactions.is_empty());
    }

    #[test]
    fn test_income_without_funding_source_rejected() {
        let project = Project::new("Kitchen", dec!(5000));
        let mut tx = ProjectTransaction::income(dec!(10), FundingSource::Internal, date(1), "");
        tx.funding_source = None;

        assert!(matches!(
            project.validate_transaction(&tx),
            Err(ProjectError::InvalidTransaction(_))
        ));
    }

    #[test]
    fn test_internal_funding_flag() {
        let internal = ProjectTransaction::income(dec!(10), FundingSource::Internal, date(1), "");
        let external = ProjectTransaction::income(dec!(10), FundingSource::External, date(1), "");

        assert!(internal.is_internal_funding());
        assert!(!external.is_internal_funding());
    }

    #[test]
    fn test_serialized_shape() {
        let tx = ProjectTransaction::income(dec!(10), FundingSource::Internal, date(1), "seed");
        let json = serde_json::to_value(&tx).unwrap();

        assert_eq!(json["type"], "income");
        assert_eq!(json["fundingSource"], "internal");
        assert!(json.get("budgetLineId").is_none());
    }
}
