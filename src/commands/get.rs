//! Get - Load a dataset from cache or generate it

use anyhow::{Context, Result};
use serde_json::json;
use std::path::Path;

use crate::cache::key::{derive_key, GenerationParameters};
use crate::cache::reader::{get_dataset, CacheOutcome, Dataset};
use crate::core::model::{Meta, ResultItem, ResultSet};
use crate::core::paths::normalize_path;
use crate::core::render::{RenderConfig, Renderer};
use crate::generator::polynomial::generate_polynomial;

/// Build the result item describing a dataset
pub fn dataset_item(params: &GenerationParameters, dataset: &Dataset) -> ResultItem {
    let key = derive_key(params);
    let status = match &dataset.outcome {
        CacheOutcome::Hit => "hit",
        CacheOutcome::Miss(_) => "miss",
    };

    ResultItem::dataset(key.as_str(), normalize_path(&dataset.path))
        .with_status(status)
        .with_meta(Meta {
            points: Some(dataset.x.len()),
            hit: Some(dataset.outcome.is_hit()),
            ..Default::default()
        })
        .with_data(json!({
            "params": params,
            "outcome": dataset.outcome,
            "x": dataset.x,
            "y": dataset.y,
        }))
}

/// Run the get command
pub fn run_get(
    cache_root: &Path,
    params: GenerationParameters,
    use_cache: bool,
    config: RenderConfig,
) -> Result<()> {
    let dataset = get_dataset(&params, use_cache, cache_root, generate_polynomial)
        .with_context(|| format!("Failed to cache dataset under {:?}", cache_root))?;

    let result_set: ResultSet = std::iter::once(dataset_item(&params, &dataset)).collect();
    Renderer::with_config(config).print(&result_set);

    Ok(())
}
