//! Load-everything/save-everything persistence for the patient collection.
//!
//! The whole mapping is read at the start of a request and rewritten at the
//! end of a write. There is no locking and no transaction: two concurrent
//! writers race between `load` and `save`, and the last `save` wins.

use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Patient;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// The full collection, keyed by patient id.
pub type PatientMap = BTreeMap<String, Patient>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read patient store: {0}")]
    Read(#[source] std::io::Error),
    #[error("failed to write patient store: {0}")]
    Write(#[source] std::io::Error),
    #[error("malformed patient store: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Storage backend for the patient collection. Handlers only ever see this
/// trait, so the file backend can be swapped for an in-memory (or, later,
/// transactional) one without touching them.
#[async_trait]
pub trait PatientStore: Send + Sync {
    /// Reads the entire collection.
    async fn load(&self) -> Result<PatientMap, StorageError>;

    /// Replaces the entire persisted collection with `patients`.
    async fn save(&self, patients: &PatientMap) -> Result<(), StorageError>;
}
