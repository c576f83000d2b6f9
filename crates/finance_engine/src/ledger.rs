//! Unified ledger
//!
//! Every money movement from the wallet, funds, credits and projects,
//! normalized into one feed sorted by date, newest first. Entries are
//! derived on every call and never stored.
//!
//! Fund movements are recorded from the wallet's point of view: a
//! deposit into a fund is money leaving the wallet and shows up as an
//! `expense`, a withdrawal from a fund shows up as `income`. Goal
//! histories are not part of the feed.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::money::{from_cents, to_cents, Cents};
use domain_savings::FundEntryType;
use domain_wallet::TransactionType;

use crate::snapshot::FinanceSnapshot;

/// Collection a ledger entry was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerSource {
    Transaction,
    Fund,
    Credit,
    Project,
}

impl fmt::Display for LedgerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LedgerSource::Transaction => "transaction",
            LedgerSource::Fund => "fund",
            LedgerSource::Credit => "credit",
            LedgerSource::Project => "project",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for LedgerSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "transaction" => Ok(LedgerSource::Transaction),
            "fund" => Ok(LedgerSource::Fund),
            "credit" => Ok(LedgerSource::Credit),
            "project" => Ok(LedgerSource::Project),
            other => Err(format!("unknown ledger source '{}'", other)),
        }
    }
}

/// A display-ready money movement
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    /// Unique across all sources
    pub id: String,
    /// Id of the record the entry was derived from
    pub original_id: String,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub entry_type: TransactionType,
    pub source: LedgerSource,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fund_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
}

impl LedgerEntry {
    pub fn signed_cents(&self) -> Cents {
        match self.entry_type {
            TransactionType::Income => to_cents(self.amount),
            TransactionType::Expense => -to_cents(self.amount),
        }
    }

    fn mentions(&self, needle: &str) -> bool {
        let haystacks = [
            Some(self.description.as_str()),
            Some(self.category.as_str()),
            self.fund_name.as_deref(),
            self.credit_name.as_deref(),
            self.project_name.as_deref(),
        ];
        haystacks
            .into_iter()
            .flatten()
            .any(|text| text.to_lowercase().contains(needle))
    }
}

/// Merges every collection into one feed, newest first
///
/// Entries sharing a date keep their source order: wallet transactions,
/// then fund movements, credit payments and project transactions.
pub fn build_ledger(snapshot: &FinanceSnapshot) -> Vec<LedgerEntry> {
    let transactions = snapshot.transactions.iter().map(|tx| LedgerEntry {
        id: tx.id.to_string(),
        original_id: tx.id.to_string(),
        date: tx.date,
        description: tx.description.clone(),
        amount: tx.amount,
        entry_type: tx.transaction_type,
        source: LedgerSource::Transaction,
        category: tx.category.clone(),
        fund_name: None,
        credit_name: None,
        project_name: None,
    });

    let funds = snapshot.funds.iter().flat_map(|fund| {
        fund.history.iter().map(move |item| {
            let (entry_type, description) = match item.entry_type {
                FundEntryType::Deposit => {
                    (TransactionType::Expense, format!("Deposit to {}", fund.name))
                }
                FundEntryType::Withdraw => {
                    (TransactionType::Income, format!("Withdrawal from {}", fund.name))
                }
            };
            LedgerEntry {
                id: format!("fund-{}", item.id),
                original_id: item.id.to_string(),
                date: item.date,
                description,
                amount: item.amount,
                entry_type,
                source: LedgerSource::Fund,
                category: "Funds".to_string(),
                fund_name: Some(fund.name.clone()),
                credit_name: None,
                project_name: None,
            }
        })
    });

    let credits = snapshot.credits.iter().flat_map(|credit| {
        credit.payments.iter().map(move |payment| LedgerEntry {
            id: format!("credit-{}", payment.id),
            original_id: payment.id.to_string(),
            date: payment.date,
            description: format!("Payment: {}", credit.name),
            amount: payment.amount,
            entry_type: TransactionType::Expense,
            source: LedgerSource::Credit,
            category: "Credits".to_string(),
            fund_name: None,
            credit_name: Some(credit.name.clone()),
            project_name: None,
        })
    });

    let projects = snapshot.projects.iter().flat_map(|project| {
        project.transactions.iter().map(move |tx| LedgerEntry {
            id: format!("project-{}", tx.id),
            original_id: tx.id.to_string(),
            date: tx.date,
            description: format!("[{}] {}", project.name, tx.description),
            amount: tx.amount,
            entry_type: tx.transaction_type,
            source: LedgerSource::Project,
            category: tx.category.clone().unwrap_or_else(|| "Project".to_string()),
            fund_name: None,
            credit_name: None,
            project_name: Some(project.name.clone()),
        })
    });

    let mut entries: Vec<LedgerEntry> = transactions
        .chain(funds)
        .chain(credits)
        .chain(projects)
        .collect();
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries
}

/// Post-filter over a built ledger
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LedgerFilter {
    pub source: Option<LedgerSource>,
    /// Case-insensitive text matched against description, category and names
    pub search: Option<String>,
    /// Inclusive lower date bound
    pub from: Option<NaiveDate>,
    /// Inclusive upper date bound
    pub to: Option<NaiveDate>,
}

impl LedgerFilter {
    pub fn with_source(mut self, source: LedgerSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    pub fn matches(&self, entry: &LedgerEntry) -> bool {
        if self.source.map_or(false, |source| source != entry.source) {
            return false;
        }
        if self.from.map_or(false, |from| entry.date < from) {
            return false;
        }
        if self.to.map_or(false, |to| entry.date > to) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => entry.mentions(&needle.to_lowercase()),
            _ => true,
        }
    }

    /// Keeps the matching entries, preserving order
    pub fn apply(&self, entries: Vec<LedgerEntry>) -> Vec<LedgerEntry> {
        entries.into_iter().filter(|entry| self.matches(entry)).collect()
    }
}

/// Entries sharing one date
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerDay {
    pub date: NaiveDate,
    /// Income minus expense for the day
    pub net: Decimal,
    pub entries: Vec<LedgerEntry>,
}

/// Groups a date-sorted feed into consecutive days, keeping its order
pub fn group_by_date(entries: Vec<LedgerEntry>) -> Vec<LedgerDay> {
    let mut days: Vec<(NaiveDate, Vec<LedgerEntry>)> = Vec::new();
    for entry in entries {
        match days.last_mut() {
            Some((date, bucket)) if *date == entry.date => bucket.push(entry),
            _ => days.push((entry.date, vec![entry])),
        }
    }
    days.into_iter()
        .map(|(date, entries)| LedgerDay {
            date,
            net: from_cents(entries.iter().map(LedgerEntry::signed_cents).sum()),
            entries,
        })
        .collect()
}

/// Totals over a feed, for report headers
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
    pub count: usize,
}

impl LedgerSummary {
    pub fn from_entries(entries: &[LedgerEntry]) -> Self {
        let (income, expense) = entries.iter().fold(
            (Cents::ZERO, Cents::ZERO),
            |(income, expense), entry| match entry.entry_type {
                TransactionType::Income => (income + to_cents(entry.amount), expense),
                TransactionType::Expense => (income, expense + to_cents(entry.amount)),
            },
        );
        Self {
            income: from_cents(income),
            expense: from_cents(expense),
            net: from_cents(income - expense),
            count: entries.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_credit::Credit;
    use domain_project::{FundingSource, Project, ProjectTransaction};
    use domain_savings::Fund;
    use domain_wallet::Transaction;
    use rust_decimal_macros::dec;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    fn sample() -> FinanceSnapshot {
        let mut fund = Fund::new("Emergency");
        fund.deposit(dec!(200), date(3, 5), "").unwrap();
        fund.withdraw(dec!(50), date(3, 20), "").unwrap();

        let mut credit = Credit::new("Phone", dec!(600), dec!(0), 6, date(1, 1));
        credit.record_payment(dec!(100), date(3, 10), "", Cents::new(100)).unwrap();

        let mut project = Project::new("Kitchen", dec!(3000));
        project
            .add_transaction(
                ProjectTransaction::income(dec!(500), FundingSource::External, date(3, 12), "grant"),
            )
            .unwrap();

        FinanceSnapshot {
            transactions: vec![
                Transaction::income(dec!(1500), "Salary", date(3, 1)).with_description("March pay"),
                Transaction::expense(dec!(40), "Food", date(3, 10)).with_description("Groceries"),
            ],
            funds: vec![fund],
            credits: vec![credit],
            projects: vec![project],
            ..Default::default()
        }
    }

    #[test]
    fn test_ledger_is_complete_and_sorted() {
        let ledger = build_ledger(&sample());

        assert_eq!(ledger.len(), 6);
        assert!(ledger.windows(2).all(|pair| pair[0].date >= pair[1].date));
    }

    #[test]
    fn test_fund_entries_use_wallet_perspective() {
        let ledger = build_ledger(&sample());
        let fund_entries: Vec<&LedgerEntry> =
            ledger.iter().filter(|e| e.source == LedgerSource::Fund).collect();

        assert_eq!(fund_entries[0].entry_type, TransactionType::Income);
        assert_eq!(fund_entries[0].description, "Withdrawal from Emergency");
        assert_eq!(fund_entries[1].entry_type, TransactionType::Expense);
        assert_eq!(fund_entries[1].description, "Deposit to Emergency");
    }

    #[test]
    fn test_same_day_entries_keep_source_order() {
        let ledger = build_ledger(&sample());
        let march_tenth: Vec<LedgerSource> = ledger
            .iter()
            .filter(|e| e.date == date(3, 10))
            .map(|e| e.source)
            .collect();

        assert_eq!(march_tenth, vec![LedgerSource::Transaction, LedgerSource::Credit]);
    }

    #[test]
    fn test_project_entries_are_qualified() {
        let ledger = build_ledger(&sample());
        let project = ledger.iter().find(|e| e.source == LedgerSource::Project).unwrap();

        assert_eq!(project.description, "[Kitchen] grant");
        assert_eq!(project.category, "Project");
        assert_eq!(project.project_name.as_deref(), Some("Kitchen"));
    }

    #[test]
    fn test_filter_by_source_and_text() {
        let ledger = build_ledger(&sample());

        let credits = LedgerFilter::default().with_source(LedgerSource::Credit).apply(ledger.clone());
        assert_eq!(credits.len(), 1);

        let groceries = LedgerFilter::default().with_search("GROCER").apply(ledger.clone());
        assert_eq!(groceries.len(), 1);

        let by_fund_name = LedgerFilter::default().with_search("emergency").apply(ledger.clone());
        assert_eq!(by_fund_name.len(), 2);

        let window = LedgerFilter::default().between(date(3, 10), date(3, 12)).apply(ledger);
        assert_eq!(window.len(), 3);
    }

    #[test]
    fn test_group_by_date_keeps_descending_order() {
        let days = group_by_date(build_ledger(&sample()));
        let dates: Vec<NaiveDate> = days.iter().map(|day| day.date).collect();

        assert_eq!(
            dates,
            vec![date(3, 20), date(3, 12), date(3, 10), date(3, 5), date(3, 1)]
        );
        assert_eq!(days[2].net, dec!(-140));
    }

    #[test]
    fn test_summary() {
        let summary = LedgerSummary::from_entries(&build_ledger(&sample()));

        assert_eq!(summary.count, 6);
        assert_eq!(summary.income, dec!(2050));
        assert_eq!(summary.expense, dec!(340));
        assert_eq!(summary.net, dec!(1710));
    }

    #[test]
    fn test_source_parsing() {
        assert_eq!("Fund".parse::<LedgerSource>(), Ok(LedgerSource::Fund));
        assert!("goal".parse::<LedgerSource>().is_err());
    }
}
