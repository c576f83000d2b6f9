//! Record-store ports
//!
//! Every finance collection (transactions, goals, funds, credits, projects)
//! is reached through a [`CollectionPort`]. The port exposes two faces:
//!
//! - a synchronous, read-only **snapshot** of the in-memory projection,
//!   which the balance engine and the ledger aggregator read on every call;
//! - asynchronous **writes** (`add`, `update`, `remove`) that go to the
//!   backing document store and may fail with a [`PortError`].
//!
//! ```text
//!   document store ──(full snapshot push)──► apply_snapshot ──► snapshot()
//!         ▲                                                         │
//!         └──────────── add / update / remove ◄── services          ▼
//!                                                            engine reads
//! ```
//!
//! A failed write never touches the projection: the projection only moves
//! when the store confirms, either through a pushed snapshot or through the
//! adapter's own echo of the confirmed write.

use std::fmt;
use std::hash::Hash;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for port operations
///
/// Provides a unified error type that all collection adapters must use,
/// ensuring consistent error handling across backing stores.
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested record was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    /// A validation error occurred
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// The operation conflicts with existing data
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Connection to the underlying store failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The operation timed out
    #[error("Timeout after {duration_ms}ms: {operation}")]
    Timeout { operation: String, duration_ms: u64 },

    /// The caller may not read or write this collection
    #[error("Permission denied: {message}")]
    Unauthorized { message: String },

    /// The backing store is unavailable
    #[error("Service unavailable: {service}")]
    ServiceUnavailable { service: String },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Creates a Validation error with field information
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Creates a permission-denied error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        PortError::Unauthorized {
            message: message.into(),
        }
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error indicates a transient failure that may succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PortError::Connection { .. }
                | PortError::Timeout { .. }
                | PortError::ServiceUnavailable { .. }
        )
    }

    /// Returns true if this error indicates the record was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

/// Marker trait for all domain ports
///
/// All port traits should extend this marker to ensure they are
/// thread-safe and can be used in async contexts.
pub trait DomainPort: Send + Sync + 'static {}

/// A persisted finance record addressable by a typed id
pub trait Record: Clone + Send + Sync + 'static {
    type Id: Copy + Eq + Hash + fmt::Display + Send + Sync + 'static;

    /// Name of the collection in the document store
    const COLLECTION: &'static str;

    fn id(&self) -> Self::Id;
}

/// Port for one collection of records
///
/// Reads are served from the in-memory projection and never fail; writes
/// go to the backing store and surface its errors unchanged.
#[async_trait]
pub trait CollectionPort<T: Record>: DomainPort {
    /// Current projection, in insertion order
    fn snapshot(&self) -> Vec<T>;

    /// True until the first snapshot has been delivered
    fn is_loading(&self) -> bool;

    /// Replaces the projection with a full snapshot pushed by the store
    fn apply_snapshot(&self, items: Vec<T>);

    /// Looks a record up in the current projection
    fn get(&self, id: T::Id) -> Option<T> {
        self.snapshot().into_iter().find(|item| item.id() == id)
    }

    /// Persists a new record and returns its id
    async fn add(&self, item: T) -> Result<T::Id, PortError>;

    /// Replaces the stored record with the given id
    async fn update(&self, id: T::Id, item: T) -> Result<(), PortError>;

    /// Deletes the record with the given id
    async fn remove(&self, id: T::Id) -> Result<(), PortError>;
}
