//! Wallet transaction writes

use tracing::{info, warn};

use core_kernel::TransactionId;
use domain_wallet::{rename_category, Transaction};

use crate::engine::FinanceEngine;
use crate::error::EngineError;

impl FinanceEngine {
    /// Validates and stores a new transaction
    pub async fn add_transaction(&self, transaction: Transaction) -> Result<TransactionId, EngineError> {
        if let Err(error) = transaction.validate() {
            warn!(error = %error, "Rejected transaction");
            return Err(error.into());
        }
        let id = self.collections.transactions.add(transaction).await?;
        info!(transaction_id = %id, "Transaction recorded");
        Ok(id)
    }

    /// Deletes a transaction
    pub async fn remove_transaction(&self, id: TransactionId) -> Result<(), EngineError> {
        if self.collections.transactions.get(id).is_none() {
            return Err(EngineError::not_found("Transaction", id));
        }
        self.collections.transactions.remove(id).await?;
        info!(transaction_id = %id, "Transaction removed");
        Ok(())
    }

    /// Renames a category on every transaction using it
    ///
    /// Returns the number of transactions rewritten. Records are written
    /// one by one; a store failure stops the rename part-way and is
    /// returned as is.
    pub async fn rename_category(&self, from: &str, to: &str) -> Result<usize, EngineError> {
        let changed = rename_category(&self.collections.transactions.snapshot(), from, to)?;
        let count = changed.len();
        for transaction in changed {
            self.collections
                .transactions
                .update(transaction.id, transaction)
                .await?;
        }
        info!(from, to, count, "Category renamed");
        Ok(count)
    }
}
