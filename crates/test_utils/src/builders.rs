//! Test Data Builders
//!
//! Builder patterns for constructing finance records with sensible
//! defaults. Tests specify only the fields they care about; history-backed
//! records are built through their domain methods so cached totals always
//! agree with the history.

use chrono::NaiveDate;
use core_kernel::BudgetLineId;
use domain_credit::Credit;
use domain_project::{FundingSource, Project, ProjectStatus, ProjectTransaction};
use domain_savings::{AutoSaveConfig, Fund, Goal};
use domain_wallet::{Transaction, TransactionType};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::{AmountFixtures, DateFixtures};

/// Builder for wallet transactions
pub struct TransactionBuilder {
    amount: Decimal,
    transaction_type: TransactionType,
    category: String,
    description: String,
    date: NaiveDate,
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        Self::income()
    }
}

impl TransactionBuilder {
    /// Starts a salary income dated today
    pub fn income() -> Self {
        Self {
            amount: AmountFixtures::salary(),
            transaction_type: TransactionType::Income,
            category: "Salary".to_string(),
            description: String::new(),
            date: DateFixtures::today(),
        }
    }

    /// Starts a rent expense dated today
    pub fn expense() -> Self {
        Self {
            amount: AmountFixtures::rent(),
            transaction_type: TransactionType::Expense,
            category: "Housing".to_string(),
            description: String::new(),
            date: DateFixtures::today(),
        }
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn build(self) -> Transaction {
        Transaction::new(self.transaction_type, self.amount, self.category, self.date)
            .with_description(self.description)
    }
}

/// Builder for savings goals
pub struct GoalBuilder {
    name: String,
    target: Decimal,
    start_date: NaiveDate,
    deadline: Option<NaiveDate>,
    deposits: Vec<(Decimal, NaiveDate)>,
    withdrawals: Vec<(Decimal, NaiveDate)>,
}

impl Default for GoalBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GoalBuilder {
    /// Creates a builder for an open-ended goal starting at the year start
    pub fn new() -> Self {
        Self {
            name: "Emergency".to_string(),
            target: AmountFixtures::goal_target(),
            start_date: DateFixtures::year_start(),
            deadline: None,
            deposits: Vec::new(),
            withdrawals: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_target(mut self, target: Decimal) -> Self {
        self.target = target;
        self
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn starting(mut self, date: NaiveDate) -> Self {
        self.start_date = date;
        self
    }

    /// Adds a deposit to the history
    pub fn with_deposit(mut self, amount: Decimal, date: NaiveDate) -> Self {
        self.deposits.push((amount, date));
        self
    }

    /// Adds a withdrawal to the history
    pub fn with_withdrawal(mut self, amount: Decimal, date: NaiveDate) -> Self {
        self.withdrawals.push((amount, date));
        self
    }

    pub fn build(self) -> Goal {
        let mut goal = Goal::new(self.name, self.target, self.start_date);
        if let Some(deadline) = self.deadline {
            goal = goal.with_deadline(deadline);
        }
        for (amount, date) in self.deposits {
            goal.contribute(amount, date, "").expect("valid fixture deposit");
        }
        for (amount, date) in self.withdrawals {
            goal.withdraw(amount, date, "").expect("valid fixture withdrawal");
        }
        goal
    }
}

/// Builder for funds
pub struct FundBuilder {
    name: String,
    deposits: Vec<(Decimal, NaiveDate)>,
    withdrawals: Vec<(Decimal, NaiveDate)>,
    auto_save: Option<AutoSaveConfig>,
}

impl Default for FundBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FundBuilder {
    pub fn new() -> Self {
        Self {
            name: "Vacation".to_string(),
            deposits: Vec::new(),
            withdrawals: Vec::new(),
            auto_save: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_deposit(mut self, amount: Decimal, date: NaiveDate) -> Self {
        self.deposits.push((amount, date));
        self
    }

    pub fn with_withdrawal(mut self, amount: Decimal, date: NaiveDate) -> Self {
        self.withdrawals.push((amount, date));
        self
    }

    /// Enables a monthly auto-save
    pub fn with_auto_save(mut self, amount: Decimal, day_of_month: u32) -> Self {
        self.auto_save = Some(AutoSaveConfig::monthly(amount, day_of_month));
        self
    }

    /// Enables a monthly auto-save that already ran on `last_run`
    pub fn with_auto_save_ran(mut self, amount: Decimal, day_of_month: u32, last_run: NaiveDate) -> Self {
        let mut config = AutoSaveConfig::monthly(amount, day_of_month);
        config.last_run = Some(last_run);
        self.auto_save = Some(config);
        self
    }

    pub fn build(self) -> Fund {
        let mut fund = Fund::new(self.name);
        if let Some(config) = self.auto_save {
            fund = fund.with_auto_save(config);
        }
        for (amount, date) in self.deposits {
            fund.deposit(amount, date, "").expect("valid fixture deposit");
        }
        for (amount, date) in self.withdrawals {
            fund.withdraw(amount, date, "").expect("valid fixture withdrawal");
        }
        fund
    }
}

/// Builder for credits
pub struct CreditBuilder {
    name: String,
    principal: Decimal,
    interest_rate: Decimal,
    term: u32,
    start_date: NaiveDate,
    payments: Vec<(Decimal, NaiveDate)>,
}

impl Default for CreditBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CreditBuilder {
    /// A 12-month credit of 10,000 at 12% starting on the year start
    pub fn new() -> Self {
        Self {
            name: "Car loan".to_string(),
            principal: AmountFixtures::principal(),
            interest_rate: AmountFixtures::annual_rate(),
            term: 12,
            start_date: DateFixtures::year_start(),
            payments: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_principal(mut self, principal: Decimal) -> Self {
        self.principal = principal;
        self
    }

    pub fn with_rate(mut self, interest_rate: Decimal) -> Self {
        self.interest_rate = interest_rate;
        self
    }

    pub fn with_term(mut self, term: u32) -> Self {
        self.term = term;
        self
    }

    pub fn starting(mut self, date: NaiveDate) -> Self {
        self.start_date = date;
        self
    }

    pub fn with_payment(mut self, amount: Decimal, date: NaiveDate) -> Self {
        self.payments.push((amount, date));
        self
    }

    pub fn build(self) -> Credit {
        let mut credit = Credit::new(
            self.name,
            self.principal,
            self.interest_rate,
            self.term,
            self.start_date,
        );
        let tolerance = core_kernel::to_cents(dec!(1.00));
        for (amount, date) in self.payments {
            credit
                .record_payment(amount, date, "", tolerance)
                .expect("valid fixture payment");
        }
        credit
    }
}

/// Builder for projects
pub struct ProjectBuilder {
    name: String,
    target: Decimal,
    status: ProjectStatus,
    transactions: Vec<ProjectTransaction>,
    budget_lines: Vec<(String, Decimal)>,
}

impl Default for ProjectBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectBuilder {
    pub fn new() -> Self {
        Self {
            name: "Workshop".to_string(),
            target: AmountFixtures::project_budget(),
            status: ProjectStatus::Active,
            transactions: Vec::new(),
            budget_lines: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_target(mut self, target: Decimal) -> Self {
        self.target = target;
        self
    }

    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    /// Adds an income with the given funding source
    pub fn with_income(mut self, amount: Decimal, source: FundingSource, date: NaiveDate) -> Self {
        self.transactions
            .push(ProjectTransaction::income(amount, source, date, "Funding"));
        self
    }

    /// Adds an unassigned expense
    pub fn with_expense(mut self, amount: Decimal, date: NaiveDate) -> Self {
        self.transactions
            .push(ProjectTransaction::expense(amount, date, "Supplies"));
        self
    }

    /// Allocates a budget line once all transactions are in
    pub fn with_budget_line(mut self, name: impl Into<String>, amount: Decimal) -> Self {
        self.budget_lines.push((name.into(), amount));
        self
    }

    pub fn build(self) -> Project {
        let mut project = Project::new(self.name, self.target).with_status(self.status);
        for tx in self.transactions {
            project.add_transaction(tx).expect("valid fixture transaction");
        }
        for (name, amount) in self.budget_lines {
            project
                .add_budget_line(name, amount)
                .expect("valid fixture budget line");
        }
        project
    }

    /// Builds the project and returns the id of its first budget line
    pub fn build_with_line(self) -> (Project, Option<BudgetLineId>) {
        let project = self.build();
        let line = project.budget_lines.first().map(|line| line.id);
        (project, line)
    }
}
