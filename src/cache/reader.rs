//! Cache reader - Dataset access with fallback to regeneration
//!
//! Prefers a verified artifact when caching is enabled. Anything else
//! (caching disabled, no artifact, malformed artifact, digest mismatch)
//! regenerates the dataset and persists it under the same key.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::cache::entry::CacheEntry;
use crate::cache::error::CacheResult;
use crate::cache::key::{artifact_path, derive_key, GenerationParameters};
use crate::cache::store::{inspect, store_entry, Lookup, MissReason};

/// Whether a dataset came from the cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CacheOutcome {
    Hit,
    Miss(MissReason),
}

impl CacheOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, CacheOutcome::Hit)
    }
}

/// A dataset returned to the caller
#[derive(Debug, Clone)]
pub struct Dataset {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub outcome: CacheOutcome,
    /// Artifact location for this dataset's key
    pub path: PathBuf,
}

/// Return the dataset for `params`, from cache when possible.
///
/// `generator` is only invoked on a miss, and its output is always written
/// back to the cache before returning.
pub fn get_dataset<G>(
    params: &GenerationParameters,
    use_cache: bool,
    cache_root: &Path,
    generator: G,
) -> CacheResult<Dataset>
where
    G: FnOnce(&GenerationParameters) -> (Vec<f64>, Vec<f64>),
{
    let key = derive_key(params);

    let reason = if use_cache {
        match inspect(&key, cache_root) {
            Lookup::Hit(entry) => {
                info!(key = %key, "loaded dataset from cache");
                let (x, y) = entry.into_series();
                return Ok(Dataset {
                    x,
                    y,
                    outcome: CacheOutcome::Hit,
                    path: artifact_path(cache_root, &key),
                });
            }
            Lookup::Miss(reason) => reason,
        }
    } else {
        MissReason::Disabled
    };

    match &reason {
        MissReason::IntegrityMismatch { expected, actual } => {
            warn!(key = %key, expected = %expected, actual = %actual, "cache integrity check failed");
        }
        MissReason::Malformed { error } | MissReason::Unreadable { error } => {
            warn!(key = %key, error = %error, "cached artifact could not be loaded");
        }
        MissReason::Missing | MissReason::Disabled => {}
    }
    info!(key = %key, reason = reason.label(), "generating dataset");

    let (x, y) = generator(params);
    let entry = CacheEntry::new(x, y)?;
    let path = store_entry(&key, &entry, cache_root)?;
    let (x, y) = entry.into_series();

    Ok(Dataset {
        x,
        y,
        outcome: CacheOutcome::Miss(reason),
        path,
    })
}
