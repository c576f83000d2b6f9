//! Earmarked funds
//!
//! A fund is an open-ended envelope (emergency fund, vacation pot) with
//! the same cache/history duality as a goal, plus an optional monthly
//! auto-save.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::money::{ensure_positive, from_cents, to_cents, Cents};
use core_kernel::temporal::{end_of_month, same_month};
use core_kernel::{FundEntryId, FundId, Record};

use crate::error::SavingsError;
use crate::history::{replay, HistoryEntry};

/// Kind of fund history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FundEntryType {
    Deposit,
    Withdraw,
}

/// One movement into or out of a fund
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundTransaction {
    pub id: FundEntryId,
    pub date: NaiveDate,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub entry_type: FundEntryType,
    #[serde(default)]
    pub note: String,
}

impl HistoryEntry for FundTransaction {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn signed_cents(&self) -> Cents {
        match self.entry_type {
            FundEntryType::Deposit => to_cents(self.amount),
            FundEntryType::Withdraw => -to_cents(self.amount),
        }
    }
}

/// Monthly automatic deposit settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoSaveConfig {
    pub enabled: bool,
    pub amount: Decimal,
    /// Day of month the deposit runs on; clamped to the month's last day
    pub day_of_month: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run: Option<NaiveDate>,
}

impl AutoSaveConfig {
    /// Creates an enabled monthly auto-save
    pub fn monthly(amount: Decimal, day_of_month: u32) -> Self {
        Self {
            enabled: true,
            amount,
            day_of_month,
            last_run: None,
        }
    }

    pub fn validate(&self) -> Result<(), SavingsError> {
        if !(1..=31).contains(&self.day_of_month) {
            return Err(SavingsError::InvalidAutoSave(format!(
                "day of month must be between 1 and 31, got {}",
                self.day_of_month
            )));
        }
        ensure_positive(self.amount, "autoSaveConfig.amount")?;
        Ok(())
    }

    /// Day the deposit runs on in the month containing `date`
    pub fn run_day(&self, date: NaiveDate) -> u32 {
        self.day_of_month.min(end_of_month(date).day())
    }

    /// True when enabled, the run day has arrived and this month has not run yet
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.enabled
            && today.day() >= self.run_day(today)
            && self
                .last_run
                .map_or(true, |last| !same_month(last, today) && last < today)
    }
}

/// A fund as persisted in the `funds` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fund {
    pub id: FundId,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    /// Cached running total of `history`
    pub current_amount: Decimal,
    #[serde(default)]
    pub history: Vec<FundTransaction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_save_config: Option<AutoSaveConfig>,
}

impl Fund {
    /// Creates a new, empty fund
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: FundId::new_v7(),
            name: name.into(),
            icon: String::new(),
            color: String::new(),
            current_amount: Decimal::ZERO,
            history: Vec::new(),
            auto_save_config: None,
        }
    }

    /// Sets the icon and color
    pub fn with_style(mut self, icon: impl Into<String>, color: impl Into<String>) -> Self {
        self.icon = icon.into();
        self.color = color.into();
        self
    }

    /// Sets the auto-save configuration
    pub fn with_auto_save(mut self, config: AutoSaveConfig) -> Self {
        self.auto_save_config = Some(config);
        self
    }

    pub fn validate(&self) -> Result<(), SavingsError> {
        if self.name.trim().is_empty() {
            return Err(SavingsError::InvalidFund("name must not be empty".to_string()));
        }
        if let Some(config) = &self.auto_save_config {
            config.validate()?;
        }
        Ok(())
    }

    /// Cached total, as shown on the fund card
    pub fn current_total(&self) -> Cents {
        to_cents(self.current_amount)
    }

    /// Total held as of `date`, replayed from history and floored at zero
    pub fn total_as_of(&self, date: NaiveDate) -> Cents {
        replay(&self.history, Some(date))
    }

    /// Total over the whole history, floored at zero
    pub fn replayed_total(&self) -> Cents {
        replay(&self.history, None)
    }

    /// Moves money into the fund
    pub fn deposit(
        &mut self,
        amount: Decimal,
        date: NaiveDate,
        note: impl Into<String>,
    ) -> Result<FundTransaction, SavingsError> {
        let cents = ensure_positive(amount, "amount")?;
        let entry = self.push(FundEntryType::Deposit, cents, date, note.into());
        self.current_amount = from_cents(self.current_total() + cents);
        Ok(entry)
    }

    /// Moves money out of the fund, flooring the cached total at zero
    pub fn withdraw(
        &mut self,
        amount: Decimal,
        date: NaiveDate,
        note: impl Into<String>,
    ) -> Result<FundTransaction, SavingsError> {
        let cents = ensure_positive(amount, "amount")?;
        let entry = self.push(FundEntryType::Withdraw, cents, date, note.into());
        self.current_amount = from_cents((self.current_total() - cents).clamp_non_negative());
        Ok(entry)
    }

    /// Amount the auto-save would deposit today, if it is due
    pub fn due_auto_save(&self, today: NaiveDate) -> Option<Decimal> {
        self.auto_save_config
            .as_ref()
            .filter(|config| config.is_due(today))
            .map(|config| config.amount)
    }

    /// Runs the auto-save deposit and stamps `last_run`
    pub fn apply_auto_save(&mut self, today: NaiveDate) -> Result<FundTransaction, SavingsError> {
        let amount = self
            .due_auto_save(today)
            .ok_or_else(|| SavingsError::AutoSaveNotDue(self.id.to_string()))?;
        let entry = self.deposit(amount, today, "Auto-save")?;
        if let Some(config) = self.auto_save_config.as_mut() {
            config.last_run = Some(today);
        }
        debug!(fund_id = %self.id, amount = %entry.amount, %today, "Auto-save deposited");
        Ok(entry)
    }

    fn push(
        &mut self,
        entry_type: FundEntryType,
        amount: Cents,
        date: NaiveDate,
        note: String,
    ) -> FundTransaction {
        let entry = FundTransaction {
            id: FundEntryId::new_v7(),
            date,
            amount: from_cents(amount),
            entry_type,
            note,
        };
        self.history.push(entry.clone());
        entry
    }
}

impl Record for Fund {
    type Id = FundId;
    const COLLECTION: &'static str = "funds";

    fn id(&self) -> FundId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    #[test]
    fn test_deposit_and_withdraw() {
        let mut fund = Fund::new("Emergency");
        fund.deposit(dec!(300), date(1, 5), "").unwrap();
        fund.withdraw(dec!(120.50), date(1, 6), "repair").unwrap();

        assert_eq!(fund.current_amount, dec!(179.50));
        assert_eq!(fund.replayed_total(), fund.current_total());
        assert_eq!(fund.history[1].entry_type, FundEntryType::Withdraw);
    }

    #[test]
    fn test_withdraw_type_serializes_as_withdraw() {
        let mut fund = Fund::new("Vacation");
        fund.withdraw(dec!(5), date(1, 1), "").unwrap();
        let json = serde_json::to_value(&fund.history[0]).unwrap();
        assert_eq!(json["type"], "withdraw");
    }

    #[test]
    fn test_auto_save_is_due_once_per_month() {
        let mut config = AutoSaveConfig::monthly(dec!(50), 15);
        assert!(!config.is_due(date(3, 14)));
        assert!(config.is_due(date(3, 15)));

        config.last_run = Some(date(3, 15));
        assert!(!config.is_due(date(3, 20)));
        assert!(config.is_due(date(4, 15)));
    }

    #[test]
    fn test_auto_save_day_clamps_to_short_month() {
        let config = AutoSaveConfig::monthly(dec!(50), 31);
        assert!(config.is_due(date(2, 28)));
        assert!(!config.is_due(date(2, 27)));
    }

    #[test]
    fn test_disabled_auto_save_is_never_due() {
        let mut config = AutoSaveConfig::monthly(dec!(50), 1);
        config.enabled = false;
        assert!(!config.is_due(date(6, 30)));
    }

    #[test]
    fn test_apply_auto_save_stamps_last_run() {
        let mut fund = Fund::new("Vacation").with_auto_save(AutoSaveConfig::monthly(dec!(75), 1));

        fund.apply_auto_save(date(5, 2)).unwrap();

        assert_eq!(fund.current_amount, dec!(75));
        assert_eq!(fund.auto_save_config.as_ref().unwrap().last_run, Some(date(5, 2)));
        assert!(matches!(
            fund.apply_auto_save(date(5, 3)),
            Err(SavingsError::AutoSaveNotDue(_))
        ));
    }

    #[test]
    fn test_validate_auto_save_day() {
        let fund = Fund::new("Pot").with_auto_save(AutoSaveConfig::monthly(dec!(10), 0));
        assert!(matches!(fund.validate(), Err(SavingsError::InvalidAutoSave(_))));
    }
}
