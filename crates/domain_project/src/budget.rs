//! Budget lines
//!
//! A line's spent amount is persisted for display but never trusted:
//! it is recomputed from the project's expenses whenever it is read or
//! the project changes.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::money::{ensure_positive, from_cents, to_cents, Cents};
use core_kernel::BudgetLineId;

use crate::error::ProjectError;
use crate::project::Project;

/// An allocation of project income to a purpose
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetLine {
    pub id: BudgetLineId,
    pub name: String,
    pub allocated_amount: Decimal,
    #[serde(default)]
    pub spent_amount: Decimal,
}

/// Usage of one budget line, derived from expenses
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetLineUsage {
    pub id: BudgetLineId,
    pub name: String,
    pub allocated: Decimal,
    pub spent: Decimal,
    /// Negative once the line is overspent
    pub remaining: Decimal,
    pub percent_used: Decimal,
}

fn spent_on(project: &Project, line_id: BudgetLineId) -> Cents {
    project
        .transactions
        .iter()
        .filter(|tx| tx.is_expense() && tx.budget_line_id == Some(line_id))
        .map(|tx| tx.cents())
        .sum()
}

/// Income received that has not yet been allocated to a budget line
pub fn available_to_allocate(project: &Project) -> Cents {
    let allocated: Cents = project
        .budget_lines
        .iter()
        .map(|line| to_cents(line.allocated_amount))
        .sum();
    project.total_income() - allocated
}

/// Recomputes the usage of every budget line from the project's expenses
pub fn budget_line_usage(project: &Project) -> Vec<BudgetLineUsage> {
    project
        .budget_lines
        .iter()
        .map(|line| {
            let allocated = to_cents(line.allocated_amount);
            let spent = spent_on(project, line.id);
            let percent_used = if allocated.is_positive() {
                (from_cents(spent) / from_cents(allocated) * dec!(100))
                    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            } else {
                Decimal::ZERO
            };
            BudgetLineUsage {
                id: line.id,
                name: line.name.clone(),
                allocated: from_cents(allocated),
                spent: from_cents(spent),
                remaining: from_cents(allocated - spent),
                percent_used,
            }
        })
        .collect()
}

impl Project {
    /// Allocates received income to a new budget line
    ///
    /// A line can only be funded from income actually received and not
    /// already allocated to another line.
    pub fn add_budget_line(
        &mut self,
        name: impl Into<String>,
        allocated_amount: Decimal,
    ) -> Result<BudgetLine, ProjectError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ProjectError::InvalidProject(
                "budget line name must not be empty".to_string(),
            ));
        }
        let requested = ensure_positive(allocated_amount, "allocatedAmount")?;
        let available = available_to_allocate(self);
        if requested > available {
            debug!(
                project_id = %self.id,
                requested = %from_cents(requested),
                available = %from_cents(available.clamp_non_negative()),
                "Budget line exceeds unallocated income"
            );
            return Err(ProjectError::OverAllocation {
                available: from_cents(available.clamp_non_negative()),
                requested: from_cents(requested),
            });
        }

        let line = BudgetLine {
            id: BudgetLineId::new_v7(),
            name,
            allocated_amount: from_cents(requested),
            spent_amount: Decimal::ZERO,
        };
        self.budget_lines.push(line.clone());
        Ok(line)
    }

    /// Rewrites each line's persisted spent amount from the expenses
    pub fn refresh_spent(&mut self) {
        let spent: Vec<Cents> = self
            .budget_lines
            .iter()
            .map(|line| spent_on(self, line.id))
            .collect();
        for (line, cents) in self.budget_lines.iter_mut().zip(spent) {
            line.spent_amount = from_cents(cents);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{FundingSource, ProjectTransaction};
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, d).unwrap()
    }

    fn funded(amount: Decimal) -> Project {
        let mut project = Project::new("Garden", dec!(10000));
        project
            .add_transaction(ProjectTransaction::income(amount, FundingSource::External, date(1), ""))
            .unwrap();
        project
    }

    #[test]
    fn test_cannot_allocate_without_income() {
        let mut project = Project::new("Garden", dec!(10000));
        let result = project.add_budget_line("Plants", dec!(1));

        assert!(matches!(
            result,
            Err(ProjectError::OverAllocation { available, .. }) if available == Decimal::ZERO
        ));
    }

    #[test]
    fn test_allocation_limited_by_existing_lines() {
        let mut project = funded(dec!(1000));
        project.add_budget_line("Plants", dec!(600)).unwrap();

        assert_eq!(available_to_allocate(&project), Cents::new(40_000));
        assert!(project.add_budget_line("Tools", dec!(400)).is_ok());
        assert!(project.add_budget_line("Extra", dec!(0.01)).is_err());
    }

    #[test]
    fn test_usage_is_recomputed_from_expenses() {
        let mut project = funded(dec!(1000));
        let line = project.add_budget_line("Plants", dec!(400)).unwrap();
        project
            .add_transaction(ProjectTransaction::expense(dec!(100), date(2), "roses").with_budget_line(line.id))
            .unwrap();
        project
            .add_transaction(ProjectTransaction::expense(dec!(50), date(3), "soil"))
            .unwrap();

        project.budget_lines[0].spent_amount = dec!(9999);
        let usage = budget_line_usage(&project);

        assert_eq!(usage[0].spent, dec!(100));
        assert_eq!(usage[0].remaining, dec!(300));
        assert_eq!(usage[0].percent_used, dec!(25));
    }

    #[test]
    fn test_add_transaction_refreshes_persisted_spent() {
        let mut project = funded(dec!(1000));
        let line = project.add_budget_line("Plants", dec!(400)).unwrap();
        project
            .add_transaction(ProjectTransaction::expense(dec!(120), date(2), "").with_budget_line(line.id))
            .unwrap();

        assert_eq!(project.budget_lines[0].spent_amount, dec!(120));
    }
}
