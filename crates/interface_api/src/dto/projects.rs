//! Project DTOs

use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use domain_project::{FundingSource, ProjectStatus};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: String,
    pub target_budget: Decimal,
    pub status: Option<ProjectStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectIncomeRequest {
    pub amount: Decimal,
    pub funding_source: FundingSource,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectExpenseRequest {
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
    pub budget_line_id: Option<Uuid>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetLineRequest {
    pub name: String,
    pub allocated_amount: Decimal,
}
