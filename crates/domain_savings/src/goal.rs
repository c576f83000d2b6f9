//! Savings goals
//!
//! A goal is a target amount with an optional deadline. Contributions and
//! withdrawals append to `history` and adjust the cached
//! `current_amount`; the history is the source of truth for any
//! historical figure.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::money::{ensure_positive, from_cents, to_cents, Cents};
use core_kernel::{GoalEntryId, GoalId, Record};

use crate::error::SavingsError;
use crate::history::{replay, HistoryEntry};

/// Kind of goal history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalEntryType {
    Deposit,
    Withdrawal,
}

/// One contribution to or withdrawal from a goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalHistoryItem {
    pub id: GoalEntryId,
    pub date: NaiveDate,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub entry_type: GoalEntryType,
    #[serde(default)]
    pub note: String,
}

impl HistoryEntry for GoalHistoryItem {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn signed_cents(&self) -> Cents {
        match self.entry_type {
            GoalEntryType::Deposit => to_cents(self.amount),
            GoalEntryType::Withdrawal => -to_cents(self.amount),
        }
    }
}

/// A savings goal as persisted in the `goals` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: GoalId,
    pub name: String,
    pub target_amount: Decimal,
    /// Cached running total of `history`
    pub current_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub history: Vec<GoalHistoryItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_contribution_date: Option<NaiveDate>,
}

impl Goal {
    /// Creates a new, empty goal
    ///
    /// # Arguments
    ///
    /// * `name` - Display name
    /// * `target_amount` - Amount to reach, in major units
    /// * `start_date` - Day the goal was created
    pub fn new(name: impl Into<String>, target_amount: Decimal, start_date: NaiveDate) -> Self {
        Self {
            id: GoalId::new_v7(),
            name: name.into(),
            target_amount,
            current_amount: Decimal::ZERO,
            deadline: None,
            start_date,
            icon: String::new(),
            history: Vec::new(),
            last_contribution_date: None,
        }
    }

    /// Sets the deadline
    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the icon
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn validate(&self) -> Result<(), SavingsError> {
        if self.name.trim().is_empty() {
            return Err(SavingsError::InvalidGoal("name must not be empty".to_string()));
        }
        ensure_positive(self.target_amount, "targetAmount")?;
        if let Some(deadline) = self.deadline {
            if deadline < self.start_date {
                return Err(SavingsError::InvalidGoal(format!(
                    "deadline {} is before start date {}",
                    deadline, self.start_date
                )));
            }
        }
        Ok(())
    }

    /// Cached total, as shown on the goal card
    pub fn current_total(&self) -> Cents {
        to_cents(self.current_amount)
    }

    /// Total saved as of `date`, replayed from history and floored at zero
    pub fn total_as_of(&self, date: NaiveDate) -> Cents {
        replay(&self.history, Some(date))
    }

    /// Total saved over the whole history, floored at zero
    pub fn replayed_total(&self) -> Cents {
        replay(&self.history, None)
    }

    pub fn target(&self) -> Cents {
        to_cents(self.target_amount)
    }

    /// Amount still missing; negative once the target is exceeded
    pub fn remaining(&self) -> Cents {
        self.target() - self.current_total()
    }

    pub fn is_completed(&self) -> bool {
        !self.remaining().is_positive()
    }

    /// Appends a deposit and raises the cached total
    pub fn contribute(
        &mut self,
        amount: Decimal,
        date: NaiveDate,
        note: impl Into<String>,
    ) -> Result<GoalHistoryItem, SavingsError> {
        let cents = ensure_positive(amount, "amount")?;
        let item = self.push(GoalEntryType::Deposit, cents, date, note.into());
        self.current_amount = from_cents(self.current_total() + cents);
        self.last_contribution_date = Some(date);
        Ok(item)
    }

    /// Appends a withdrawal and lowers the cached total, flooring it at zero
    ///
    /// The history keeps the full requested amount even when it exceeds
    /// what was saved.
    pub fn withdraw(
        &mut self,
        amount: Decimal,
        date: NaiveDate,
        note: impl Into<String>,
    ) -> Result<GoalHistoryItem, SavingsError> {
        let cents = ensure_positive(amount, "amount")?;
        let item = self.push(GoalEntryType::Withdrawal, cents, date, note.into());
        self.current_amount = from_cents((self.current_total() - cents).clamp_non_negative());
        Ok(item)
    }

    fn push(
        &mut self,
        entry_type: GoalEntryType,
        amount: Cents,
        date: NaiveDate,
        note: String,
    ) -> GoalHistoryItem {
        let item = GoalHistoryItem {
            id: GoalEntryId::new_v7(),
            date,
            amount: from_cents(amount),
            entry_type,
            note,
        };
        self.history.push(item.clone());
        item
    }
}

impl Record for Goal {
    type Id = GoalId;
    const COLLECTION: &'static str = "goals";

    fn id(&self) -> GoalId {
        self.id
    }
}
