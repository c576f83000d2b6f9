//! Dynamic monthly quota for goals
//!
//! Every figure here is a pure function of the goal and "today". Nothing
//! is cached: a missed month simply raises the next quota and an extra
//! contribution lowers it.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;

use core_kernel::money::{from_cents, Cents};
use core_kernel::temporal::{end_of_month, months_between, same_month};

use crate::goal::Goal;
use crate::history::HistoryEntry;

/// Whole calendar months from today to the deadline, never negative
///
/// A goal without a deadline has no months remaining.
pub fn months_remaining(goal: &Goal, today: NaiveDate) -> u32 {
    goal.deadline
        .map(|deadline| months_between(today, deadline).max(0) as u32)
        .unwrap_or(0)
}

/// Contribution required this month to stay on track
///
/// Zero when the goal has no deadline or is already reached. Otherwise
/// the remaining amount is spread evenly over the months left, counting
/// at least one month so an overdue goal asks for everything at once.
pub fn monthly_quota(goal: &Goal, today: NaiveDate) -> Cents {
    if goal.deadline.is_none() {
        return Cents::ZERO;
    }
    let remaining = goal.remaining();
    if !remaining.is_positive() {
        return Cents::ZERO;
    }
    let months = months_remaining(goal, today).max(1);
    Cents::from_amount(from_cents(remaining) / Decimal::from(months))
}

/// Net contributions dated in today's calendar month
pub fn contributions_in_month(goal: &Goal, today: NaiveDate) -> Cents {
    goal.history
        .iter()
        .filter(|item| same_month(item.date, today))
        .map(HistoryEntry::signed_cents)
        .sum()
}

/// True when this month's net contributions cover the quota within `tolerance`
pub fn is_paid_this_month(goal: &Goal, today: NaiveDate, tolerance: Cents) -> bool {
    contributions_in_month(goal, today) >= monthly_quota(goal, today) - tolerance
}

/// Total saved across goals at the end of the month containing `date`
pub fn total_savings_at_date(goals: &[Goal], date: NaiveDate) -> Cents {
    let cutoff = end_of_month(date);
    goals.iter().map(|goal| goal.total_as_of(cutoff)).sum()
}

/// Where a goal stands relative to its plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GoalStatus {
    Completed,
    OnTrack,
    Behind,
    NoDeadline,
}

/// Progress summary of a goal as of a day
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub saved: Decimal,
    pub target: Decimal,
    pub remaining: Decimal,
    /// Saved over target, in percent
    pub percent: Decimal,
    pub monthly_quota: Decimal,
    pub months_remaining: u32,
    pub paid_this_month: bool,
    pub status: GoalStatus,
}

impl GoalProgress {
    /// Computes the progress summary
    ///
    /// # Arguments
    ///
    /// * `goal` - The goal to summarize
    /// * `today` - The user's local calendar day
    /// * `tolerance` - Slack allowed when deciding whether this month is paid
    pub fn compute(goal: &Goal, today: NaiveDate, tolerance: Cents) -> Self {
        let saved = goal.current_total();
        let target = goal.target();
        let paid_this_month = is_paid_this_month(goal, today, tolerance);

        let status = if goal.is_completed() {
            GoalStatus::Completed
        } else {
            match goal.deadline {
                None => GoalStatus::NoDeadline,
                Some(deadline) if deadline < today => GoalStatus::Behind,
                Some(_) if paid_this_month => GoalStatus::OnTrack,
                Some(_) => GoalStatus::Behind,
            }
        };

        let percent = if target.is_zero() {
            Decimal::ZERO
        } else {
            (from_cents(saved) / from_cents(target) * dec!(100))
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        };

        Self {
            saved: from_cents(saved),
            target: from_cents(target),
            remaining: from_cents(goal.remaining().clamp_non_negative()),
            percent,
            monthly_quota: from_cents(monthly_quota(goal, today)),
            months_remaining: months_remaining(goal, today),
            paid_this_month,
            status,
        }
    }
}
