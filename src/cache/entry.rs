//! On-disk cache entry

use serde::{Deserialize, Serialize};

use crate::cache::digest::compute_digest;
use crate::cache::error::{CacheError, CacheResult};

/// A generated dataset together with its integrity digest.
///
/// Serialized as `{"x": [...], "y": [...], "sha256_sum": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheEntry {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    #[serde(rename = "sha256_sum")]
    pub integrity_digest: String,
}

impl CacheEntry {
    /// Build an entry for freshly generated data, computing its digest
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> CacheResult<Self> {
        check_shape(&x, &y)?;
        let integrity_digest = compute_digest(&x, &y);
        Ok(Self {
            x,
            y,
            integrity_digest,
        })
    }

    /// Digest recomputed from the current contents
    pub fn recompute_digest(&self) -> String {
        compute_digest(&self.x, &self.y)
    }

    /// Check the structural invariants (equal lengths, finite values)
    pub fn check_shape(&self) -> CacheResult<()> {
        check_shape(&self.x, &self.y)
    }

    pub fn into_series(self) -> (Vec<f64>, Vec<f64>) {
        (self.x, self.y)
    }
}

fn check_shape(x: &[f64], y: &[f64]) -> CacheResult<()> {
    if x.len() != y.len() {
        return Err(CacheError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    for (series, values) in [("x", x), ("y", y)] {
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(CacheError::NonFinite { series, index });
        }
    }
    Ok(())
}
