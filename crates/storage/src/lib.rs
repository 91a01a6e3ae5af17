//! File storage behind a trait so handlers never touch the filesystem
//! directly.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("invalid path: {0}")]
    InvalidPath(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A stored file's identity. `path` is the store-relative key that goes
/// into the ledger; it is opaque to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Original (sanitized) filename, for display.
    pub name: String,
    /// Store-relative key.
    pub path: String,
}

/// Blob storage operations used by upload handlers.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Store `bytes` under `prefix`, returning the stored identity. The
    /// final key gets a random component so repeated uploads of the same
    /// filename never collide.
    async fn put(&self, prefix: &str, filename: &str, bytes: &[u8])
        -> Result<StoredFile, StorageError>;

    /// Read a stored file back.
    async fn get(&self, path: &str) -> Result<Vec<u8>, StorageError>;

    /// Remove a stored file. Removing a missing file is not an error.
    async fn delete(&self, path: &str) -> Result<(), StorageError>;
}

/// Stores files under a root directory on local disk.
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a store-relative key, rejecting traversal components.
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let rel = Path::new(path);
        if rel.is_absolute()
            || rel
                .components()
                .any(|c| !matches!(c, std::path::Component::Normal(_)))
        {
            return Err(StorageError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(rel))
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn put(
        &self,
        prefix: &str,
        filename: &str,
        bytes: &[u8],
    ) -> Result<StoredFile, StorageError> {
        let name = sanitize_filename(filename);
        let key = format!("{prefix}/{}_{name}", uuid::Uuid::new_v4());
        let full = self.resolve(&key)?;
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&full, bytes).await?;
        tracing::debug!(key = %key, size = bytes.len(), "stored file");
        Ok(StoredFile { name, path: key })
    }

    async fn get(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let full = self.resolve(path)?;
        match tokio::fs::read(&full).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        let full = self.resolve(path)?;
        match tokio::fs::remove_file(&full).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Strip directory components and characters that are unsafe in a
/// filename. Empty results become `file`.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_matches('.');
    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Cheap PDF sniff used to enforce PDF-only uploads.
pub fn is_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(b"%PDF-")
}
