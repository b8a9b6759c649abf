//! Cache key derivation
//!
//! A key is `"{random_seed}-{point_count}"`. Both fields are unsigned, so the
//! `-` separator can never occur inside either number and distinct parameter
//! pairs always map to distinct keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::cache::error::{CacheError, CacheResult};

const SEPARATOR: char = '-';
const ARTIFACT_EXT: &str = "json";

/// Parameters that fully determine a generated dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenerationParameters {
    pub random_seed: u64,
    #[serde(alias = "n_points")]
    pub point_count: usize,
}

impl GenerationParameters {
    pub fn new(random_seed: u64, point_count: usize) -> CacheResult<Self> {
        if point_count == 0 {
            return Err(CacheError::InvalidParameters(
                "point_count must be positive".to_string(),
            ));
        }
        Ok(Self {
            random_seed,
            point_count,
        })
    }
}

/// Stable identifier of a cached artifact
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the artifact stored under this key
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.0, ARTIFACT_EXT)
    }

    /// Recover the parameters encoded in a key string.
    ///
    /// Accepts a bare key (`42-50`) or an artifact file name (`42-50.json`).
    pub fn parse(s: &str) -> Option<GenerationParameters> {
        let stem = s
            .strip_suffix(ARTIFACT_EXT)
            .and_then(|rest| rest.strip_suffix('.'))
            .unwrap_or(s);
        let (seed, count) = stem.split_once(SEPARATOR)?;
        if !is_plain_decimal(seed) || !is_plain_decimal(count) {
            return None;
        }
        let params = GenerationParameters::new(seed.parse().ok()?, count.parse().ok()?).ok()?;
        // Reject non-canonical forms such as leading zeros
        (derive_key(&params).as_str() == stem).then_some(params)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_plain_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Derive the cache key for a parameter set
pub fn derive_key(params: &GenerationParameters) -> CacheKey {
    CacheKey(format!(
        "{}{}{}",
        params.random_seed, SEPARATOR, params.point_count
    ))
}

/// Location of the artifact for `key` under `cache_root`
pub fn artifact_path(cache_root: &Path, key: &CacheKey) -> PathBuf {
    cache_root.join(key.file_name())
}
