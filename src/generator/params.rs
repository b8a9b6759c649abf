//! Generation parameters file
//!
//! The file is a JSON object such as `{"random_seed": 42, "n_points": 50}`.
//! `point_count` is accepted in place of `n_points`. Negative seeds are
//! folded to their absolute value.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::cache::key::GenerationParameters;

#[derive(Debug, Deserialize)]
struct ParamsFile {
    random_seed: i64,
    #[serde(alias = "n_points")]
    point_count: usize,
}

/// Parse generation parameters from JSON text
pub fn parse_params(content: &str) -> Result<GenerationParameters> {
    let raw: ParamsFile =
        serde_json::from_str(content).context("Invalid generation parameters")?;
    Ok(GenerationParameters::new(
        raw.random_seed.unsigned_abs(),
        raw.point_count,
    )?)
}

/// Load generation parameters from a params file
pub fn load_params(path: &Path) -> Result<GenerationParameters> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read params file: {:?}", path))?;
    parse_params(&content).with_context(|| format!("Failed to parse params file: {:?}", path))
}
