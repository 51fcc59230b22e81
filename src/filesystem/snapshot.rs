//! Snapshot codec for the in-memory filesystem
//!
//! Format: a JSON envelope listing every file with base64 content, gzip
//! compressed.
//!
//! ```text
//! gzip( { "version": 1, "createdAt": "...", "files": [ { "path", "content" } ] } )
//! ```

use super::normalize_path;
use base64::Engine;
use chrono::{DateTime, Utc};
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{Read, Write};

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Gzip magic bytes (0x1f, 0x8b) followed by the deflate method (0x08)
const GZIP_MAGIC: [u8; 3] = [0x1f, 0x8b, 0x08];

/// Snapshot decoding/encoding errors
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("archive is not gzip compressed")]
    NotCompressed,

    #[error("failed to compress or decompress archive: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed snapshot manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),

    #[error("invalid path in snapshot: {0:?}")]
    InvalidPath(String),

    #[error("duplicate path in snapshot: {0}")]
    DuplicatePath(String),

    #[error("invalid content for {path}: {source}")]
    InvalidContent {
        path: String,
        source: base64::DecodeError,
    },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    version: u32,
    created_at: DateTime<Utc>,
    files: Vec<Entry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Entry {
    path: String,
    content: String,
}

/// Encode filesystem contents into a compressed snapshot
pub fn encode(files: &BTreeMap<String, Vec<u8>>) -> Result<Vec<u8>, SnapshotError> {
    let engine = base64::engine::general_purpose::STANDARD;
    let envelope = Envelope {
        version: SNAPSHOT_VERSION,
        created_at: Utc::now(),
        files: files
            .iter()
            .map(|(path, content)| Entry {
                path: path.clone(),
                content: engine.encode(content),
            })
            .collect(),
    };

    let json = serde_json::to_vec(&envelope)?;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&json)?;
    let compressed = encoder.finish()?;

    tracing::debug!(
        "Encoded snapshot: {} file(s), {} bytes compressed",
        envelope.files.len(),
        compressed.len()
    );

    Ok(compressed)
}

/// Decode a compressed snapshot into filesystem contents
pub fn decode(bytes: &[u8]) -> Result<BTreeMap<String, Vec<u8>>, SnapshotError> {
    if !bytes.starts_with(&GZIP_MAGIC) {
        return Err(SnapshotError::NotCompressed);
    }

    let mut decoder = GzDecoder::new(bytes);
    let mut json = Vec::new();
    decoder.read_to_end(&mut json)?;

    let envelope: Envelope = serde_json::from_slice(&json)?;
    if envelope.version != SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion(envelope.version));
    }

    let engine = base64::engine::general_purpose::STANDARD;
    let mut files = BTreeMap::new();
    for entry in envelope.files {
        let path = normalize_path(&entry.path)
            .map_err(|_| SnapshotError::InvalidPath(entry.path.clone()))?;

        let content = engine
            .decode(&entry.content)
            .map_err(|source| SnapshotError::InvalidContent {
                path: path.clone(),
                source,
            })?;

        if files.insert(path.clone(), content).is_some() {
            return Err(SnapshotError::DuplicatePath(path));
        }
    }

    tracing::debug!(
        "Decoded snapshot from {}: {} file(s)",
        envelope.created_at,
        files.len()
    );

    Ok(files)
}
