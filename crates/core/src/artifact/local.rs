use std::path::{Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use super::{check_name, ArtifactError, ArtifactStore};

/// Artifacts written as files into a served directory.
#[derive(Debug, Clone)]
pub struct LocalArtifactStore {
    root: PathBuf,
}

impl LocalArtifactStore {
    /// Open the store, creating `root` if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, ArtifactError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn put(&self, name: &str, bytes: Vec<u8>) -> Result<(), ArtifactError> {
        check_name(name)?;
        let target = self.root.join(name);
        // Hidden temp file in the same directory so the rename stays atomic.
        let staging = self.root.join(format!(".{name}.{}.tmp", Uuid::new_v4()));

        tokio::fs::write(&staging, &bytes).await?;
        if let Err(err) = tokio::fs::rename(&staging, &target).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(err.into());
        }

        tracing::debug!(path = %target.display(), size = bytes.len(), "artifact written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalArtifactStore::open(dir.path().join("exports")).await.unwrap();

        store.put("a.xlsx", b"first".to_vec()).await.unwrap();
        store.put("a.xlsx", b"second".to_vec()).await.unwrap();

        let content = tokio::fs::read(store.root().join("a.xlsx")).await.unwrap();
        assert_eq!(content, b"second");

        let mut entries = tokio::fs::read_dir(store.root()).await.unwrap();
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        assert_eq!(names, vec!["a.xlsx"]);
    }

    #[tokio::test]
    async fn rejects_path_like_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalArtifactStore::open(dir.path()).await.unwrap();

        for name in ["", "../x.xlsx", "sub/x.xlsx", ".hidden"] {
            let err = store.put(name, Vec::new()).await.unwrap_err();
            assert!(matches!(err, ArtifactError::InvalidName(_)));
        }
    }
}
