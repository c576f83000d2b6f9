//! In-memory collection adapter
//!
//! Holds the live projection of one user's collection. Confirmed writes
//! are echoed into the projection immediately, which mirrors what the
//! document store's snapshot subscription would deliver a moment later.
//! A collection without an owner (nobody signed in) is always empty and
//! rejects every write.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use tracing::debug;

use crate::identifiers::UserId;
use crate::ports::{CollectionPort, DomainPort, PortError, Record};

#[derive(Debug)]
struct CollectionState<T> {
    items: Vec<T>,
    loading: bool,
}

/// An insertion-ordered, user-scoped collection of records
#[derive(Debug)]
pub struct InMemoryCollection<T: Record> {
    owner: Option<UserId>,
    state: RwLock<CollectionState<T>>,
}

impl<T: Record> InMemoryCollection<T> {
    /// Creates an empty, loaded collection owned by `owner`
    pub fn new(owner: UserId) -> Self {
        Self::with_items(owner, Vec::new())
    }

    /// Creates a collection pre-populated with records
    pub fn with_items(owner: UserId, items: Vec<T>) -> Self {
        Self {
            owner: Some(owner),
            state: RwLock::new(CollectionState {
                items,
                loading: false,
            }),
        }
    }

    /// Creates a collection still waiting for its first snapshot
    pub fn pending(owner: UserId) -> Self {
        Self {
            owner: Some(owner),
            state: RwLock::new(CollectionState {
                items: Vec::new(),
                loading: true,
            }),
        }
    }

    /// Creates the collection seen when nobody is signed in
    pub fn signed_out() -> Self {
        Self {
            owner: None,
            state: RwLock::new(CollectionState {
                items: Vec::new(),
                loading: false,
            }),
        }
    }

    pub fn owner(&self) -> Option<UserId> {
        self.owner
    }

    /// Document-store path of this collection
    pub fn path(&self) -> String {
        match self.owner {
            Some(owner) => format!("users/{}/{}", owner.as_uuid(), T::COLLECTION),
            None => format!("anonymous/{}", T::COLLECTION),
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, CollectionState<T>> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, CollectionState<T>> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn ensure_owner(&self) -> Result<UserId, PortError> {
        self.owner.ok_or_else(|| {
            PortError::unauthorized(format!("no signed-in user for {}", T::COLLECTION))
        })
    }

    fn insert(&self, item: T) -> Result<T::Id, PortError> {
        self.ensure_owner()?;
        let id = item.id();
        let mut state = self.write_state();
        if state.items.iter().any(|existing| existing.id() == id) {
            return Err(PortError::Conflict {
                message: format!("{} already contains {}", T::COLLECTION, id),
            });
        }
        state.items.push(item);
        Ok(id)
    }

    fn replace(&self, id: T::Id, item: T) -> Result<(), PortError> {
        self.ensure_owner()?;
        if item.id() != id {
            return Err(PortError::validation_field(
                format!("record id {} does not match {}", item.id(), id),
                "id",
            ));
        }
        let mut state = self.write_state();
        let slot = state
            .items
            .iter_mut()
            .find(|existing| existing.id() == id)
            .ok_or_else(|| PortError::not_found(T::COLLECTION, id))?;
        *slot = item;
        Ok(())
    }

    fn delete(&self, id: T::Id) -> Result<(), PortError> {
        self.ensure_owner()?;
        let mut state = self.write_state();
        let position = state
            .items
            .iter()
            .position(|existing| existing.id() == id)
            .ok_or_else(|| PortError::not_found(T::COLLECTION, id))?;
        state.items.remove(position);
        Ok(())
    }
}

impl<T: Record> DomainPort for InMemoryCollection<T> {}

#[async_trait]
impl<T: Record> CollectionPort<T> for InMemoryCollection<T> {
    fn snapshot(&self) -> Vec<T> {
        if self.owner.is_none() {
            return Vec::new();
        }
        self.read_state().items.clone()
    }

    fn is_loading(&self) -> bool {
        self.read_state().loading
    }

    fn apply_snapshot(&self, items: Vec<T>) {
        if self.owner.is_none() {
            return;
        }
        let mut state = self.write_state();
        debug!(collection = T::COLLECTION, count = items.len(), "Snapshot applied");
        state.items = items;
        state.loading = false;
    }

    async fn add(&self, item: T) -> Result<T::Id, PortError> {
        let id = self.insert(item)?;
        debug!(path = %self.path(), %id, "Record added");
        Ok(id)
    }

    async fn update(&self, id: T::Id, item: T) -> Result<(), PortError> {
        self.replace(id, item)?;
        debug!(path = %self.path(), %id, "Record updated");
        Ok(())
    }

    async fn remove(&self, id: T::Id) -> Result<(), PortError> {
        self.delete(id)?;
        debug!(path = %self.path(), %id, "Record removed");
        Ok(())
    }
}
