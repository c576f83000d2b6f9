//! Goal and fund writes
//!
//! Deposits earmark money, so they must fit in the current balance.
//! Withdrawals release money and are limited to what the record holds.

use rust_decimal::Decimal;
use tracing::{info, warn};

use core_kernel::money::{ensure_positive, from_cents, to_cents, Cents};
use core_kernel::{FundId, GoalId};
use domain_savings::{Fund, FundTransaction, Goal, GoalHistoryItem, SavingsError};

use crate::engine::FinanceEngine;
use crate::error::EngineError;

impl FinanceEngine {
    /// Stores a new goal with an empty history
    pub async fn create_goal(&self, mut goal: Goal) -> Result<GoalId, EngineError> {
        goal.validate()?;
        goal.current_amount = Decimal::ZERO;
        goal.history.clear();
        goal.last_contribution_date = None;
        let id = self.collections.goals.add(goal).await?;
        info!(goal_id = %id, "Goal created");
        Ok(id)
    }

    /// Deletes a goal, releasing whatever it had earmarked
    pub async fn delete_goal(&self, id: GoalId) -> Result<(), EngineError> {
        self.find_goal(id)?;
        self.collections.goals.remove(id).await?;
        info!(goal_id = %id, "Goal deleted");
        Ok(())
    }

    /// Moves money from the wallet into a goal
    pub async fn contribute_to_goal(
        &self,
        id: GoalId,
        amount: Decimal,
        note: impl Into<String>,
    ) -> Result<GoalHistoryItem, EngineError> {
        let mut goal = self.find_goal(id)?;
        let cents = ensure_positive(amount, "amount")?;
        self.ensure_affordable(cents)?;

        let item = goal.contribute(amount, self.today(), note)?;
        self.collections.goals.update(id, goal).await?;
        info!(goal_id = %id, amount = %item.amount, "Goal contribution recorded");
        Ok(item)
    }

    /// Moves money from a goal back to the wallet
    pub async fn withdraw_from_goal(
        &self,
        id: GoalId,
        amount: Decimal,
        note: impl Into<String>,
    ) -> Result<GoalHistoryItem, EngineError> {
        let mut goal = self.find_goal(id)?;
        ensure_withdrawable(goal.current_total(), amount)?;
        let item = goal.withdraw(amount, self.today(), note)?;
        self.collections.goals.update(id, goal).await?;
        info!(goal_id = %id, amount = %item.amount, "Goal withdrawal recorded");
        Ok(item)
    }

    /// Stores a new fund with an empty history
    pub async fn create_fund(&self, mut fund: Fund) -> Result<FundId, EngineError> {
        fund.validate()?;
        fund.current_amount = Decimal::ZERO;
        fund.history.clear();
        let id = self.collections.funds.add(fund).await?;
        info!(fund_id = %id, "Fund created");
        Ok(id)
    }

    /// Deletes a fund, releasing whatever it held
    pub async fn delete_fund(&self, id: FundId) -> Result<(), EngineError> {
        self.find_fund(id)?;
        self.collections.funds.remove(id).await?;
        info!(fund_id = %id, "Fund deleted");
        Ok(())
    }

    /// Moves money from the wallet into a fund
    pub async fn deposit_to_fund(
        &self,
        id: FundId,
        amount: Decimal,
        note: impl Into<String>,
    ) -> Result<FundTransaction, EngineError> {
        let mut fund = self.find_fund(id)?;
        let cents = ensure_positive(amount, "amount")?;
        self.ensure_affordable(cents)?;

        let entry = fund.deposit(amount, self.today(), note)?;
        self.collections.funds.update(id, fund).await?;
        info!(fund_id = %id, amount = %entry.amount, "Fund deposit recorded");
        Ok(entry)
    }

    /// Moves money from a fund back to the wallet
    pub async fn withdraw_from_fund(
        &self,
        id: FundId,
        amount: Decimal,
        note: impl Into<String>,
    ) -> Result<FundTransaction, EngineError> {
        let mut fund = self.find_fund(id)?;
        ensure_withdrawable(fund.current_total(), amount)?;
        let entry = fund.withdraw(amount, self.today(), note)?;
        self.collections.funds.update(id, fund).await?;
        info!(fund_id = %id, amount = %entry.amount, "Fund withdrawal recorded");
        Ok(entry)
    }

    /// Runs a fund's monthly auto-save if it is due today
    ///
    /// # Errors
    ///
    /// - `AutoSaveNotDue` when disabled, before the run day, or already run this month
    /// - `InsufficientFunds` when the configured amount does not fit in the balance
    pub async fn run_auto_save(&self, id: FundId) -> Result<FundTransaction, EngineError> {
        let mut fund = self.find_fund(id)?;
        let today = self.today();
        let amount = fund
            .due_auto_save(today)
            .ok_or_else(|| SavingsError::AutoSaveNotDue(id.to_string()))?;
        self.ensure_affordable(to_cents(amount))?;

        let entry = fund.apply_auto_save(today)?;
        self.collections.funds.update(id, fund).await?;
        info!(fund_id = %id, amount = %entry.amount, "Auto-save deposit recorded");
        Ok(entry)
    }

    pub(crate) fn find_fund(&self, id: FundId) -> Result<Fund, EngineError> {
        self.collections
            .funds
            .get(id)
            .ok_or_else(|| EngineError::not_found("Fund", id))
    }
}

/// Rejects a withdrawal larger than the cached total before anything is written
fn ensure_withdrawable(held: Cents, amount: Decimal) -> Result<(), EngineError> {
    let requested = ensure_positive(amount, "amount")?;
    if requested > held {
        warn!(%held, %requested, "Rejected: withdrawal exceeds the amount saved");
        return Err(SavingsError::ExceedsSaved {
            held: from_cents(held),
            requested: from_cents(requested),
        }
        .into());
    }
    Ok(())
}
