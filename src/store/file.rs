use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use super::{PatientMap, PatientStore, StorageError};

/// JSON file backend: one object keyed by patient id, pretty-printed.
/// The file is the sole source of truth; nothing is cached between calls.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PatientStore for FileStore {
    async fn load(&self) -> Result<PatientMap, StorageError> {
        let bytes = fs::read(&self.path).await.map_err(StorageError::Read)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn save(&self, patients: &PatientMap) -> Result<(), StorageError> {
        let json = serde_json::to_vec_pretty(patients)?;
        fs::write(&self.path, json).await.map_err(StorageError::Write)
    }
}
