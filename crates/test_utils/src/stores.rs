//! Collection adapters for failure injection
//!
//! [`FailingCollection`] wraps an [`InMemoryCollection`] and turns chosen
//! writes into errors, so tests can drive the saga's compensation paths
//! without a real document store.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use core_kernel::ports::{CollectionPort, DomainPort, PortError, Record};
use core_kernel::{InMemoryCollection, UserId};

/// A write operation on a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteOp {
    Add,
    Update,
    Remove,
}

#[derive(Debug, Clone, Copy)]
struct FailurePlan {
    /// Calls let through before failures start
    allow: usize,
    seen: usize,
}

/// An in-memory collection whose writes fail on demand
pub struct FailingCollection<T: Record> {
    inner: InMemoryCollection<T>,
    plans: Mutex<HashMap<WriteOp, FailurePlan>>,
}

impl<T: Record> FailingCollection<T> {
    /// Wraps an empty collection owned by `owner`
    pub fn new(owner: UserId) -> Self {
        Self::wrapping(InMemoryCollection::new(owner))
    }

    /// Wraps an existing in-memory collection
    pub fn wrapping(inner: InMemoryCollection<T>) -> Self {
        Self {
            inner,
            plans: Mutex::new(HashMap::new()),
        }
    }

    /// Makes every call of `op` fail
    pub fn failing(self, op: WriteOp) -> Self {
        self.failing_after(op, 0)
    }

    /// Lets `allow` calls of `op` through, then fails the rest
    pub fn failing_after(self, op: WriteOp, allow: usize) -> Self {
        self.plans
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(op, FailurePlan { allow, seen: 0 });
        self
    }

    fn check(&self, op: WriteOp) -> Result<(), PortError> {
        let mut plans = self.plans.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(plan) = plans.get_mut(&op) {
            plan.seen += 1;
            if plan.seen > plan.allow {
                return Err(PortError::connection(format!(
                    "injected {:?} failure on {}",
                    op,
                    T::COLLECTION
                )));
            }
        }
        Ok(())
    }
}

impl<T: Record> DomainPort for FailingCollection<T> {}

#[async_trait]
impl<T: Record> CollectionPort<T> for FailingCollection<T> {
    fn snapshot(&self) -> Vec<T> {
        self.inner.snapshot()
    }

    fn is_loading(&self) -> bool {
        self.inner.is_loading()
    }

    fn apply_snapshot(&self, items: Vec<T>) {
        self.inner.apply_snapshot(items)
    }

    async fn add(&self, item: T) -> Result<T::Id, PortError> {
        self.check(WriteOp::Add)?;
        self.inner.add(item).await
    }

    async fn update(&self, id: T::Id, item: T) -> Result<(), PortError> {
        self.check(WriteOp::Update)?;
        self.inner.update(id, item).await
    }

    async fn remove(&self, id: T::Id) -> Result<(), PortError> {
        self.check(WriteOp::Remove)?;
        self.inner.remove(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::TransactionBuilder;
    use domain_wallet::Transaction;

    #[tokio::test]
    async fn test_failing_after_lets_calls_through() {
        let store: FailingCollection<Transaction> =
            FailingCollection::new(UserId::new()).failing_after(WriteOp::Add, 1);

        assert!(store.add(TransactionBuilder::income().build()).await.is_ok());
        let err = store.add(TransactionBuilder::income().build()).await.unwrap_err();
        assert!(err.is_transient());
        assert_eq!(store.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn test_unplanned_ops_pass() {
        let store: FailingCollection<Transaction> =
            FailingCollection::new(UserId::new()).failing(WriteOp::Remove);
        let tx = TransactionBuilder::expense().build();
        let id = store.add(tx).await.unwrap();

        assert!(store.remove(id).await.is_err());
        assert_eq!(store.snapshot().len(), 1);
    }
}
