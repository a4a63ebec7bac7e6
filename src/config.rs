// FILE: src/config.rs
//! Exclusion config decoding and load options.
//!
//! The on-disk format is a flat JSON object of glob pattern -> reason:
//!
//! ```json
//! {
//!   "testdata/testdata.go": "Tracked in issue #42"
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::canonical;
use crate::error::{ExclusionError, Result};

/// Raw entries as decoded, before any pattern validation.
pub type RawExclusions = BTreeMap<String, String>;

/// Decode config bytes. Anything but a string -> string object is rejected.
pub fn decode(data: &[u8]) -> Result<RawExclusions> {
    Ok(serde_json::from_slice(data)?)
}

/// Options controlling how a config is turned into an `ExclusionSet`.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Directory relative patterns are resolved against.
    /// `None` means the process working directory at load time.
    pub base_dir: Option<PathBuf>,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn resolve_base_dir(&self) -> Result<PathBuf> {
        canonical::resolve_base_dir(self.base_dir.as_deref()).map_err(ExclusionError::PathResolution)
    }
}

/// Read a config file into memory.
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| ExclusionError::Io {
        path: path.to_path_buf(),
        source,
    })
}
