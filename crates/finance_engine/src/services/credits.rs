//! Credit writes

use rust_decimal::Decimal;
use tracing::{info, warn};

use core_kernel::money::ensure_positive;
use core_kernel::CreditId;
use domain_credit::{Credit, CreditError, CreditStatus, Payment};

use crate::engine::FinanceEngine;
use crate::error::EngineError;

impl FinanceEngine {
    /// Stores a new active credit without payments
    pub async fn create_credit(&self, mut credit: Credit) -> Result<CreditId, EngineError> {
        credit.validate()?;
        credit.status = CreditStatus::Active;
        credit.payments.clear();
        let id = self.collections.credits.add(credit).await?;
        info!(credit_id = %id, "Credit created");
        Ok(id)
    }

    /// Deletes a credit and its payments
    pub async fn delete_credit(&self, id: CreditId) -> Result<(), EngineError> {
        self.find_credit(id)?;
        self.collections.credits.remove(id).await?;
        info!(credit_id = %id, "Credit deleted");
        Ok(())
    }

    /// Records a payment dated today, settling the credit when fully paid
    ///
    /// # Errors
    ///
    /// - `AlreadyPaid` if the credit is settled
    /// - `InsufficientFunds` if the amount exceeds the current balance
    pub async fn add_payment(
        &self,
        id: CreditId,
        amount: Decimal,
        note: impl Into<String>,
    ) -> Result<Payment, EngineError> {
        let mut credit = self.find_credit(id)?;
        if credit.is_paid() {
            warn!(credit_id = %id, "Rejected payment on a paid credit");
            return Err(CreditError::AlreadyPaid(id.to_string()).into());
        }
        let cents = ensure_positive(amount, "amount")?;
        self.ensure_affordable(cents)?;

        let payment = credit.record_payment(
            amount,
            self.today(),
            note,
            self.config.settlement_tolerance_cents(),
        )?;
        let settled = credit.is_paid();
        self.collections.credits.update(id, credit).await?;

        info!(credit_id = %id, amount = %payment.amount, settled, "Credit payment recorded");
        Ok(payment)
    }
}
