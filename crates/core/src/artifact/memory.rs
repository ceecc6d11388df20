use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use super::{check_name, ArtifactError, ArtifactStore};

/// Artifacts kept in memory, keyed by name.
#[derive(Debug, Default)]
pub struct MemoryArtifactStore {
    artifacts: RwLock<HashMap<String, Vec<u8>>>,
    read_only: AtomicBool,
}

impl MemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.artifacts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self
            .artifacts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Make every subsequent write fail.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }
}

#[async_trait]
impl ArtifactStore for MemoryArtifactStore {
    async fn put(&self, name: &str, bytes: Vec<u8>) -> Result<(), ArtifactError> {
        check_name(name)?;
        if self.read_only.load(Ordering::SeqCst) {
            return Err(ArtifactError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "artifact store is read-only",
            )));
        }
        self.artifacts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), bytes);
        Ok(())
    }
}
