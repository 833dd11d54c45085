use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{PatientMap, PatientStore, StorageError};

/// In-memory backend with the same whole-collection semantics as the file
/// store. Handy for tests and for running without a data file.
#[derive(Default)]
pub struct MemoryStore {
    patients: RwLock<PatientMap>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_patients(patients: PatientMap) -> Self {
        Self {
            patients: RwLock::new(patients),
        }
    }
}

#[async_trait]
impl PatientStore for MemoryStore {
    async fn load(&self) -> Result<PatientMap, StorageError> {
        Ok(self.patients.read().await.clone())
    }

    async fn save(&self, patients: &PatientMap) -> Result<(), StorageError> {
        *self.patients.write().await = patients.clone();
        Ok(())
    }
}
