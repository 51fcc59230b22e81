//! Virtual filesystem
//!
//! Provides the `FilesystemAdapter` trait the loader packs and unpacks archives
//! through, plus an in-memory implementation and its snapshot codec.

mod memory;
pub mod snapshot;

pub use memory::MemoryFs;
pub use snapshot::SnapshotError;

use crate::archive::ArchiveBlob;
use anyhow::Result;
use async_trait::async_trait;

/// Materializes the virtual filesystem from and to archive blobs
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FilesystemAdapter: Send + Sync {
    /// Replace the whole filesystem with the contents of an archive
    async fn load_archive(&self, archive: ArchiveBlob) -> Result<()>;

    /// Serialize the current filesystem into an archive
    async fn save_archive(&self) -> Result<ArchiveBlob>;
}

/// Virtual filesystem errors
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    #[error("Invalid path: {0:?}")]
    InvalidPath(String),

    #[error("File not found: {0}")]
    NotFound(String),
}

/// Normalize a virtual path to its `a/b/c` form
///
/// Leading slashes and `.` components are dropped. Empty paths and `..`
/// components are rejected.
pub fn normalize_path(path: &str) -> Result<String, FsError> {
    let mut parts = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => continue,
            ".." => return Err(FsError::InvalidPath(path.to_string())),
            part => parts.push(part),
        }
    }

    if parts.is_empty() {
        return Err(FsError::InvalidPath(path.to_string()));
    }

    Ok(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/src/main.rs").unwrap(), "src/main.rs");
        assert_eq!(normalize_path("./a//b/./c").unwrap(), "a/b/c");
        assert_eq!(normalize_path("readme").unwrap(), "readme");
    }

    #[test]
    fn test_normalize_path_rejects() {
        assert!(matches!(normalize_path(""), Err(FsError::InvalidPath(_))));
        assert!(matches!(normalize_path("/./"), Err(FsError::InvalidPath(_))));
        assert!(matches!(
            normalize_path("a/../../etc/passwd"),
            Err(FsError::InvalidPath(_))
        ));
    }
}
