// FILE: src/exclusion_set.rs
//! ExclusionSet: canonical glob pattern -> reason, plus the membership query.
//!
//! A set is fully built by one load and never mutated afterwards, so shared
//! references can be queried from any number of threads.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use globset::GlobMatcher;
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::config::{self, LoadOptions, RawExclusions};
use crate::core::canonical;
use crate::core::matcher::{self, MatchOutcome};
use crate::error::{ExclusionError, Result};

/// One configured exclusion in canonical form.
#[derive(Debug, Clone)]
pub struct Exclusion {
    pattern: String,
    reason: String,
    compiled: GlobMatcher,
}

impl Exclusion {
    /// Canonical absolute pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    fn evaluate(&self, path: &Path) -> MatchOutcome {
        matcher::evaluate(&self.compiled, path)
    }
}

/// Set of exclusions keyed by canonical pattern.
///
/// Iteration and match evaluation run in sorted pattern order.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    entries: BTreeMap<String, Exclusion>,
}

impl ExclusionSet {
    /// Set that excludes nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load from config bytes, resolving relative patterns against the
    /// process working directory.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        Self::from_slice_with(data, &LoadOptions::default())
    }

    pub fn from_slice_with(data: &[u8], options: &LoadOptions) -> Result<Self> {
        let raw = config::decode(data)?;
        Self::from_entries(raw, options)
    }

    /// Load from a config file, resolving relative patterns against the
    /// process working directory.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_from_file_with(path, &LoadOptions::default())
    }

    pub fn load_from_file_with(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self> {
        let path = path.as_ref();
        let data = config::read_file(path)?;
        tracing::debug!("[ExclusionSet] Loading exclusions from {}", path.display());
        Self::from_slice_with(&data, options)
    }

    /// Build from decoded (pattern, reason) pairs.
    ///
    /// Each pattern is syntax-checked, made absolute and inserted in turn;
    /// the first failure aborts the whole load. Patterns that canonicalize
    /// to the same key keep the later reason.
    pub fn from_entries<I, P, R>(entries: I, options: &LoadOptions) -> Result<Self>
    where
        I: IntoIterator<Item = (P, R)>,
        P: AsRef<str>,
        R: Into<String>,
    {
        let mut base_dir: Option<PathBuf> = None;
        let mut set = BTreeMap::new();

        for (raw_pattern, reason) in entries {
            let raw_pattern = raw_pattern.as_ref();
            matcher::compile(raw_pattern).map_err(|source| ExclusionError::InvalidPattern {
                pattern: raw_pattern.to_string(),
                source,
            })?;

            // Only relative patterns need the base directory.
            let pattern = if raw_pattern.starts_with('/') {
                canonical::clean(raw_pattern)
            } else {
                let base = match base_dir.take() {
                    Some(base) => base,
                    None => options.resolve_base_dir()?,
                };
                let resolved = canonical::absolutize(raw_pattern, &base)
                    .map_err(ExclusionError::PathResolution)?;
                base_dir = Some(base);
                resolved
            };

            let compiled = matcher::compile(&pattern).map_err(|source| {
                ExclusionError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                }
            })?;

            let exclusion = Exclusion {
                pattern: pattern.clone(),
                reason: reason.into(),
                compiled,
            };
            if let Some(previous) = set.insert(pattern, exclusion) {
                tracing::debug!(
                    "[ExclusionSet] Pattern {} resolved to an existing entry; replacing reason {:?}",
                    raw_pattern,
                    previous.reason
                );
            }
        }

        tracing::info!("[ExclusionSet] Loaded {} exclusion pattern(s)", set.len());
        Ok(Self { entries: set })
    }

    /// Whether any pattern matches `path`.
    ///
    /// A pattern the matcher cannot evaluate against `path` counts as not
    /// matching; the failure is logged and the remaining patterns are still
    /// tried. Use [`ExclusionSet::check`] to surface such failures.
    pub fn excluded(&self, path: impl AsRef<Path>) -> bool {
        self.matching(path).is_some()
    }

    /// First entry matching `path`, with the same failure policy as `excluded`.
    pub fn matching(&self, path: impl AsRef<Path>) -> Option<&Exclusion> {
        let path = path.as_ref();
        self.entries.values().find(|entry| match entry.evaluate(path) {
            MatchOutcome::Matched => true,
            MatchOutcome::NoMatch => false,
            MatchOutcome::Error(err) => {
                tracing::warn!("[ExclusionSet] Treating pattern as non-matching: {}", err);
                false
            }
        })
    }

    /// Strict lookup: `Ok(None)` when nothing matches, `Err` as soon as a
    /// pattern cannot be evaluated against `path`.
    pub fn check(&self, path: impl AsRef<Path>) -> Result<Option<&Exclusion>> {
        let path = path.as_ref();
        for entry in self.entries.values() {
            match entry.evaluate(path) {
                MatchOutcome::Matched => return Ok(Some(entry)),
                MatchOutcome::NoMatch => {}
                MatchOutcome::Error(err) => return Err(err.into()),
            }
        }
        Ok(None)
    }

    /// Reason recorded for a canonical pattern.
    pub fn reason(&self, pattern: &str) -> Option<&str> {
        self.entries.get(pattern).map(Exclusion::reason)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Exclusion> {
        self.entries.values()
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ExclusionSet {
    type Item = &'a Exclusion;
    type IntoIter = std::collections::btree_map::Values<'a, String, Exclusion>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

/// Serializes as the canonical `{ pattern: reason }` object.
impl Serialize for ExclusionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (pattern, entry) in &self.entries {
            map.serialize_entry(pattern, &entry.reason)?;
        }
        map.end()
    }
}

/// Decodes a `{ pattern: reason }` object, so a set can be embedded in a
/// larger config. Relative patterns resolve against the working directory.
impl<'de> Deserialize<'de> for ExclusionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = RawExclusions::deserialize(deserializer)?;
        Self::from_entries(raw, &LoadOptions::default()).map_err(de::Error::custom)
    }
}
