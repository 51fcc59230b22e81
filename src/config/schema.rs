//! Settings schema definitions
//!
//! Defines the structure of the settings file using serde for serialization.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root settings structure
///
/// Unknown keys are ignored when reading, so older files that still carry
/// removed keys keep loading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Directory the file API client persists to
    /// (defaults to `<data dir>/store`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_dir: Option<PathBuf>,
}

impl Settings {
    /// Effective store directory
    pub fn store_dir(&self) -> PathBuf {
        self.store_dir
            .clone()
            .unwrap_or_else(super::paths::default_store_dir)
    }
}
