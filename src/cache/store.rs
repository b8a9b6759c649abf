//! Cache store - Read/write dataset artifacts under the cache root
//!
//! Reads never fail: a missing, unreadable, malformed or tampered artifact is
//! reported as a [`Lookup::Miss`] and left on disk untouched. Writes go
//! through a temporary file in the cache root that is renamed over the
//! destination, so readers never observe a partially written artifact.

use serde::Serialize;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::cache::entry::CacheEntry;
use crate::cache::error::{CacheError, CacheResult};
use crate::cache::key::{artifact_path, CacheKey};

/// Why a lookup did not produce a usable entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum MissReason {
    /// Caching was turned off by the caller
    Disabled,
    /// No artifact at the expected path
    Missing,
    /// The artifact exists but could not be read
    Unreadable { error: String },
    /// The artifact is not a structurally valid entry
    Malformed { error: String },
    /// The stored digest does not match the data
    IntegrityMismatch { expected: String, actual: String },
}

impl MissReason {
    /// Short status label used in CLI output
    pub fn label(&self) -> &'static str {
        match self {
            MissReason::Disabled => "disabled",
            MissReason::Missing => "missing",
            MissReason::Unreadable { .. } => "unreadable",
            MissReason::Malformed { .. } => "malformed",
            MissReason::IntegrityMismatch { .. } => "mismatch",
        }
    }
}

/// Outcome of looking up an artifact
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Hit(CacheEntry),
    Miss(MissReason),
}

impl Lookup {
    pub fn into_entry(self) -> Option<CacheEntry> {
        match self {
            Lookup::Hit(entry) => Some(entry),
            Lookup::Miss(_) => None,
        }
    }

    /// Verification status label: `valid` for a hit, the miss reason otherwise
    pub fn status(&self) -> &'static str {
        match self {
            Lookup::Hit(_) => "valid",
            Lookup::Miss(reason) => reason.label(),
        }
    }
}

/// Load and verify the artifact stored under `key`
pub fn inspect(key: &CacheKey, cache_root: &Path) -> Lookup {
    inspect_path(&artifact_path(cache_root, key))
}

/// Load and verify the artifact at an explicit path
pub fn inspect_path(path: &Path) -> Lookup {
    let content = match fs::read(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "artifact not in cache");
            return Lookup::Miss(MissReason::Missing);
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "artifact unreadable");
            return Lookup::Miss(MissReason::Unreadable {
                error: e.to_string(),
            });
        }
    };

    let entry: CacheEntry = match serde_json::from_slice(&content) {
        Ok(entry) => entry,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "artifact malformed");
            return Lookup::Miss(MissReason::Malformed {
                error: e.to_string(),
            });
        }
    };

    if let Err(e) = entry.check_shape() {
        debug!(path = %path.display(), error = %e, "artifact malformed");
        return Lookup::Miss(MissReason::Malformed {
            error: e.to_string(),
        });
    }

    let actual = entry.recompute_digest();
    if actual != entry.integrity_digest {
        debug!(
            path = %path.display(),
            expected = %entry.integrity_digest,
            actual = %actual,
            "artifact digest mismatch"
        );
        return Lookup::Miss(MissReason::IntegrityMismatch {
            expected: entry.integrity_digest,
            actual,
        });
    }

    debug!(path = %path.display(), points = entry.x.len(), "artifact verified");
    Lookup::Hit(entry)
}

/// Load the artifact for `key`, returning `None` unless it is present and verified
#[allow(dead_code)]
pub fn try_load(key: &CacheKey, cache_root: &Path) -> Option<CacheEntry> {
    inspect(key, cache_root).into_entry()
}

/// Persist `x`/`y` under `key`, overwriting any existing artifact
#[allow(dead_code)]
pub fn store(key: &CacheKey, x: &[f64], y: &[f64], cache_root: &Path) -> CacheResult<PathBuf> {
    let entry = CacheEntry::new(x.to_vec(), y.to_vec())?;
    store_entry(key, &entry, cache_root)
}

/// Persist an already built entry under `key`
pub fn store_entry(key: &CacheKey, entry: &CacheEntry, cache_root: &Path) -> CacheResult<PathBuf> {
    entry.check_shape()?;
    let path = artifact_path(cache_root, key);
    let bytes = serde_json::to_vec(entry)?;
    write_atomic(&path, &bytes)?;
    debug!(path = %path.display(), bytes = bytes.len(), "artifact written");
    Ok(path)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> CacheResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| CacheError::storage(dir, e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| CacheError::storage(dir, e))?;
    tmp.write_all(bytes)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| CacheError::storage(path, e))?;
    tmp.persist(path)
        .map_err(|e| CacheError::storage(path, e.error))?;
    Ok(())
}
