//! Storage for produced spreadsheets and the names/URLs they are reached by.

mod local;
mod memory;
mod name;

use async_trait::async_trait;
use thiserror::Error;

pub use local::LocalArtifactStore;
pub use memory::MemoryArtifactStore;
pub use name::{artifact_file_name, download_url, sanitize_filename, DOWNLOADS_PATH};

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("invalid artifact name: {0}")]
    InvalidName(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Blob storage whose contents are served under [`DOWNLOADS_PATH`].
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Store `bytes` under `name`, replacing any previous artifact with that
    /// name. The artifact must not be reachable until the write completes.
    async fn put(&self, name: &str, bytes: Vec<u8>) -> Result<(), ArtifactError>;
}

pub(crate) fn check_name(name: &str) -> Result<(), ArtifactError> {
    if name.is_empty() || name.starts_with('.') || name.contains(['/', '\\']) {
        return Err(ArtifactError::InvalidName(name.to_string()));
    }
    Ok(())
}
