//! Archive blob type
//!
//! An opaque packed filesystem snapshot. Produced by a filesystem adapter or an
//! API client and handed between them as-is; the loader never looks inside.

use std::fmt;

/// Opaque binary payload representing a packed filesystem snapshot
#[derive(Clone, PartialEq, Eq, Default)]
pub struct ArchiveBlob(Vec<u8>);

impl ArchiveBlob {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for ArchiveBlob {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for ArchiveBlob {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl AsRef<[u8]> for ArchiveBlob {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// Archives can be large; only the size is useful in logs.
impl fmt::Debug for ArchiveBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArchiveBlob({} bytes)", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_shows_size_only() {
        let blob = ArchiveBlob::from(&b"secret contents"[..]);
        assert_eq!(format!("{:?}", blob), "ArchiveBlob(15 bytes)");
    }

    #[test]
    fn test_bytes_preserved() {
        let blob = ArchiveBlob::new(vec![0, 1, 2, 255]);
        assert_eq!(blob.len(), 4);
        assert_eq!(blob.as_bytes(), &[0, 1, 2, 255]);
        assert_eq!(blob.into_bytes(), vec![0, 1, 2, 255]);
    }
}
