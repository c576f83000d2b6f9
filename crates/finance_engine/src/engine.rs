//! The engine facade
//!
//! Every read captures a fresh [`FinanceSnapshot`] and computes from it,
//! so results always reflect the latest pushed projections. Writes live
//! in [`crate::services`].

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use core_kernel::money::{from_cents, Cents};
use core_kernel::temporal::end_of_month;
use core_kernel::{Clock, CreditId, GoalId, ProjectId, SystemClock};
use domain_credit::{
    amortization_schedule, calculate_quota, credit_status, solve_interest_rate, AmortizationRow,
    Credit, CreditSummary,
};
use domain_project::{budget_line_usage, project_stats, BudgetLineUsage, Project, ProjectStats};
use domain_savings::{
    is_paid_this_month, monthly_quota, months_remaining, total_savings_at_date, Goal,
    GoalProgress,
};

use crate::balance::{balance_at_date, BalanceBreakdown};
use crate::collections::Collections;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::ledger::{build_ledger, LedgerEntry, LedgerFilter};
use crate::snapshot::FinanceSnapshot;

/// Financial computation engine for one user's collections
#[derive(Clone)]
pub struct FinanceEngine {
    pub(crate) collections: Collections,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) config: EngineConfig,
}

impl FinanceEngine {
    /// Creates an engine reading the real-time clock
    pub fn new(collections: Collections, config: EngineConfig) -> Self {
        Self {
            collections,
            clock: Arc::new(SystemClock),
            config,
        }
    }

    /// Replaces the clock
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn collections(&self) -> &Collections {
        &self.collections
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The user's local calendar day
    pub fn today(&self) -> NaiveDate {
        self.config.timezone.today(self.clock.as_ref())
    }

    /// Copies the current projection of every collection
    pub fn snapshot(&self) -> FinanceSnapshot {
        FinanceSnapshot::capture(&self.collections)
    }

    pub fn is_loading(&self) -> bool {
        self.collections.is_loading()
    }

    // ------------------------------------------------------------------
    // Balance
    // ------------------------------------------------------------------

    /// Available balance at the end of `date`
    pub fn balance_at_date(&self, date: NaiveDate) -> Decimal {
        from_cents(balance_at_date(&self.snapshot(), date))
    }

    /// Every term of the balance equation at the end of `date`
    pub fn balance_breakdown(&self, date: NaiveDate) -> BalanceBreakdown {
        BalanceBreakdown::compute(&self.snapshot(), date)
    }

    /// Reporting balance of the month containing `period`, evaluated at its last day
    pub fn available_balance(&self, period: NaiveDate) -> Decimal {
        self.balance_at_date(end_of_month(period))
    }

    /// Spendable balance right now
    pub fn current_balance(&self) -> Decimal {
        from_cents(self.current_balance_cents())
    }

    pub(crate) fn current_balance_cents(&self) -> Cents {
        balance_at_date(&self.snapshot(), self.today())
    }

    /// Fails with `InsufficientFunds` unless `needed` fits in the current balance
    pub(crate) fn ensure_affordable(&self, needed: Cents) -> Result<(), EngineError> {
        let available = self.current_balance_cents();
        if needed > available {
            tracing::warn!(%available, %needed, "Rejected: insufficient funds");
            return Err(EngineError::insufficient_funds(available, needed));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Goals
    // ------------------------------------------------------------------

    pub(crate) fn find_goal(&self, id: GoalId) -> Result<Goal, EngineError> {
        self.collections
            .goals
            .get(id)
            .ok_or_else(|| EngineError::not_found("Goal", id))
    }

    /// Total saved across goals at the end of the month containing `date`
    pub fn total_savings_at_date(&self, date: NaiveDate) -> Decimal {
        from_cents(total_savings_at_date(&self.collections.goals.snapshot(), date))
    }

    pub fn monthly_quota(&self, id: GoalId) -> Result<Decimal, EngineError> {
        let goal = self.find_goal(id)?;
        Ok(from_cents(monthly_quota(&goal, self.today())))
    }

    pub fn months_remaining(&self, id: GoalId) -> Result<u32, EngineError> {
        let goal = self.find_goal(id)?;
        Ok(months_remaining(&goal, self.today()))
    }

    pub fn is_goal_paid_this_month(&self, id: GoalId) -> Result<bool, EngineError> {
        let goal = self.find_goal(id)?;
        Ok(is_paid_this_month(
            &goal,
            self.today(),
            self.config.quota_tolerance_cents(),
        ))
    }

    pub fn goal_progress(&self, id: GoalId) -> Result<GoalProgress, EngineError> {
        let goal = self.find_goal(id)?;
        Ok(GoalProgress::compute(
            &goal,
            self.today(),
            self.config.quota_tolerance_cents(),
        ))
    }

    // ------------------------------------------------------------------
    // Credits
    // ------------------------------------------------------------------

    pub(crate) fn find_credit(&self, id: CreditId) -> Result<Credit, EngineError> {
        self.collections
            .credits
            .get(id)
            .ok_or_else(|| EngineError::not_found("Credit", id))
    }

    pub fn credit_status(&self, id: CreditId) -> Result<CreditSummary, EngineError> {
        Ok(credit_status(&self.find_credit(id)?))
    }

    pub fn credit_schedule(&self, id: CreditId) -> Result<Vec<AmortizationRow>, EngineError> {
        let credit = self.find_credit(id)?;
        Ok(amortization_schedule(
            credit.principal,
            credit.interest_rate,
            credit.term,
        ))
    }

    /// True when the next installment of the credit is past due
    pub fn is_credit_overdue(&self, id: CreditId) -> Result<bool, EngineError> {
        Ok(self.find_credit(id)?.is_overdue(self.today()))
    }

    /// Monthly quota for a prospective credit
    pub fn calculate_quota(&self, principal: Decimal, annual_rate_pct: Decimal, term: u32) -> Decimal {
        calculate_quota(principal, annual_rate_pct, term)
    }

    /// Annual rate implied by a quota, using the configured solver
    pub fn solve_interest_rate(&self, principal: Decimal, quota: Decimal, term: u32) -> Decimal {
        solve_interest_rate(principal, quota, term, &self.config.solver)
    }

    // ------------------------------------------------------------------
    // Projects
    // ------------------------------------------------------------------

    pub(crate) fn find_project(&self, id: ProjectId) -> Result<Project, EngineError> {
        self.collections
            .projects
            .get(id)
            .ok_or_else(|| EngineError::not_found("Project", id))
    }

    pub fn project_stats(&self, id: ProjectId) -> Result<ProjectStats, EngineError> {
        Ok(project_stats(&self.find_project(id)?))
    }

    pub fn budget_line_usage(&self, id: ProjectId) -> Result<Vec<BudgetLineUsage>, EngineError> {
        Ok(budget_line_usage(&self.find_project(id)?))
    }

    // ------------------------------------------------------------------
    // Ledger
    // ------------------------------------------------------------------

    /// Every money movement, newest first
    pub fn ledger(&self) -> Vec<LedgerEntry> {
        build_ledger(&self.snapshot())
    }

    pub fn filtered_ledger(&self, filter: &LedgerFilter) -> Vec<LedgerEntry> {
        filter.apply(self.ledger())
    }
}
