//! In-memory virtual filesystem

use super::{FilesystemAdapter, FsError, normalize_path, snapshot};
use crate::archive::ArchiveBlob;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Thread-safe in-memory filesystem
///
/// Files are keyed by normalized `/`-separated paths. Directories are implicit.
/// Clones share the same contents.
#[derive(Clone, Default)]
pub struct MemoryFs {
    files: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or overwrite a file
    pub async fn write_file(
        &self,
        path: &str,
        contents: impl Into<Vec<u8>>,
    ) -> Result<(), FsError> {
        let path = normalize_path(path)?;
        self.files.write().await.insert(path, contents.into());
        Ok(())
    }

    /// Read a file's contents
    pub async fn read_file(&self, path: &str) -> Result<Vec<u8>, FsError> {
        let path = normalize_path(path)?;
        self.files
            .read()
            .await
            .get(&path)
            .cloned()
            .ok_or(FsError::NotFound(path))
    }

    /// Remove a file, returning its contents
    pub async fn remove_file(&self, path: &str) -> Result<Vec<u8>, FsError> {
        let path = normalize_path(path)?;
        self.files
            .write()
            .await
            .remove(&path)
            .ok_or(FsError::NotFound(path))
    }

    /// All file paths in sorted order
    pub async fn paths(&self) -> Vec<String> {
        self.files.read().await.keys().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.files.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.files.read().await.is_empty()
    }

    pub async fn clear(&self) {
        self.files.write().await.clear();
    }

    /// Copy every regular file under a host directory into the filesystem
    ///
    /// Symlinks and other special files are skipped. Returns the number of
    /// files imported.
    pub async fn import_dir(&self, dir: &Path) -> Result<usize> {
        tracing::debug!("Importing host directory: {:?}", dir);

        let mut imported = Vec::new();
        let mut pending = vec![dir.to_path_buf()];

        while let Some(current) = pending.pop() {
            let mut entries = tokio::fs::read_dir(&current)
                .await
                .with_context(|| format!("Failed to read directory: {:?}", current))?;

            while let Some(entry) = entries
                .next_entry()
                .await
                .with_context(|| format!("Failed to read directory entry in: {:?}", current))?
            {
                let file_type = entry.file_type().await?;
                let path = entry.path();

                if file_type.is_dir() {
                    pending.push(path);
                } else if file_type.is_file() {
                    let key = virtual_path(dir, &path)?;
                    let contents = tokio::fs::read(&path)
                        .await
                        .with_context(|| format!("Failed to read file: {:?}", path))?;
                    imported.push((key, contents));
                } else {
                    tracing::debug!("Skipping non-regular file: {:?}", path);
                }
            }
        }

        let count = imported.len();
        self.files.write().await.extend(imported);

        tracing::debug!("Imported {} file(s) from {:?}", count, dir);

        Ok(count)
    }

    /// Write every file out under a host directory
    ///
    /// Parent directories are created as needed; existing host files are
    /// overwritten. Returns the number of files exported.
    pub async fn export_dir(&self, dir: &Path) -> Result<usize> {
        tracing::debug!("Exporting to host directory: {:?}", dir);

        let files = self.files.read().await.clone();
        for (path, contents) in &files {
            let target = host_path(dir, path);

            if let Some(parent) = target.parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }

            tokio::fs::write(&target, contents)
                .await
                .with_context(|| format!("Failed to write file: {:?}", target))?;
        }

        tracing::debug!("Exported {} file(s) to {:?}", files.len(), dir);

        Ok(files.len())
    }
}

/// Map a host path under `root` to a virtual path
fn virtual_path(root: &Path, path: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(root)
        .with_context(|| format!("{:?} is not inside {:?}", path, root))?;

    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(
                part.to_str()
                    .with_context(|| format!("Non UTF-8 file name: {:?}", path))?,
            ),
            _ => anyhow::bail!("Unexpected path component in: {:?}", path),
        }
    }

    Ok(normalize_path(&parts.join("/"))?)
}

#[async_trait]
impl FilesystemAdapter for MemoryFs {
    async fn load_archive(&self, archive: ArchiveBlob) -> Result<()> {
        tracing::debug!("Unpacking {:?}", archive);

        // Decode before taking the lock so a bad archive leaves contents intact.
        let files = snapshot::decode(archive.as_bytes())?;
        let count = files.len();
        *self.files.write().await = files;

        tracing::debug!("Filesystem replaced with {} file(s)", count);

        Ok(())
    }

    async fn save_archive(&self) -> Result<ArchiveBlob> {
        let files = self.files.read().await;
        let bytes = snapshot::encode(&files)?;

        tracing::debug!("Packed {} file(s) into {} bytes", files.len(), bytes.len());

        Ok(ArchiveBlob::new(bytes))
    }
}

impl std::fmt::Debug for MemoryFs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryFs").finish_non_exhaustive()
    }
}

/// Map a virtual path to a host path under `root`
fn host_path(root: &Path, virtual_path: &str) -> PathBuf {
    virtual_path.split('/').fold(root.to_path_buf(), |acc, p| acc.join(p))
}
