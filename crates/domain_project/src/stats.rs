//! Project statistics

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;

use core_kernel::money::{from_cents, to_cents, Cents};

use crate::project::Project;

/// Budget and liquidity figures of a project
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    /// Target budget minus expenses; negative once over budget
    pub budget_remaining: Decimal,
    pub percent_consumed: Decimal,
    pub percent_funded: Decimal,
    /// Project-local liquidity: income minus expenses
    pub current_balance: Decimal,
    pub milestones_completed: usize,
    pub milestones_total: usize,
    pub tasks_completed: usize,
    pub tasks_total: usize,
    pub task_progress: Decimal,
}

fn percent_of(part: Cents, whole: Cents) -> Decimal {
    if !whole.is_positive() {
        return Decimal::ZERO;
    }
    (from_cents(part) / from_cents(whole) * dec!(100))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Computes the statistics of a project
pub fn project_stats(project: &Project) -> ProjectStats {
    let income = project.total_income();
    let expenses = project.total_expenses();
    let target = to_cents(project.target_budget);

    let milestones_completed = project.milestones.iter().filter(|m| m.completed).count();
    let tasks_completed = project.tasks.iter().filter(|t| t.completed).count();
    let task_progress = if project.tasks.is_empty() {
        Decimal::ZERO
    } else {
        (Decimal::from(tasks_completed as u64) / Decimal::from(project.tasks.len() as u64)
            * dec!(100))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    };

    ProjectStats {
        total_income: from_cents(income),
        total_expenses: from_cents(expenses),
        budget_remaining: from_cents(target - expenses),
        percent_consumed: percent_of(expenses, target),
        percent_funded: percent_of(income, target),
        current_balance: from_cents(income - expenses),
        milestones_completed,
        milestones_total: project.milestones.len(),
        tasks_completed,
        tasks_total: project.tasks.len(),
        task_progress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{FundingSource, Milestone, ProjectTransaction, Task};
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, d).unwrap()
    }

    #[test]
    fn test_empty_project() {
        let stats = project_stats(&Project::new("Idea", Decimal::ZERO));
        assert_eq!(stats.percent_consumed, Decimal::ZERO);
        assert_eq!(stats.current_balance, Decimal::ZERO);
        assert_eq!(stats.task_progress, Decimal::ZERO);
    }

    #[test]
    fn test_stats() {
        let mut project = Project::new("Bathroom", dec!(4000));
        project
            .add_transaction(ProjectTransaction::income(dec!(3000), FundingSource::Internal, date(1), ""))
            .unwrap();
        project
            .add_transaction(ProjectTransaction::expense(dec!(1000), date(2), ""))
            .unwrap();
        let mut done = Milestone::new("Demolition");
        done.completed = true;
        project.milestones = vec![done, Milestone::new("Tiling")];
        let mut task = Task::new("Buy tiles");
        task.completed = true;
        project.tasks = vec![task, Task::new("Hire plumber"), Task::new("Paint")];

        let stats = project_stats(&project);

        assert_eq!(stats.budget_remaining, dec!(3000));
        assert_eq!(stats.percent_consumed, dec!(25));
        assert_eq!(stats.percent_funded, dec!(75));
        assert_eq!(stats.current_balance, dec!(2000));
        assert_eq!(stats.milestones_completed, 1);
        assert_eq!(stats.task_progress, dec!(33.33));
    }
}
