//! List - Inventory and verify every artifact in the cache root

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

use crate::cache::key::{derive_key, CacheKey};
use crate::cache::store::inspect_path;
use crate::commands::verify::artifact_item;
use crate::core::model::{ItemError, ResultSet};
use crate::core::paths::{is_artifact_file, is_hidden};
use crate::core::render::{RenderConfig, Renderer};

/// Verify all artifacts directly under the cache root
pub fn list_artifacts(cache_root: &Path) -> Result<ResultSet> {
    let mut result_set = ResultSet::new();

    if !cache_root.is_dir() {
        debug!(cache_root = %cache_root.display(), "cache root does not exist");
        return Ok(result_set);
    }

    for entry in WalkDir::new(cache_root).min_depth(1).max_depth(1) {
        let entry = entry
            .with_context(|| format!("Failed to read cache root: {:?}", cache_root))?;
        let path = entry.path();

        if !entry.file_type().is_file() || is_hidden(path) || !is_artifact_file(path) {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        let mut item = artifact_item(path, &inspect_path(path));
        item = match CacheKey::parse(&name) {
            Some(params) => item.with_key(derive_key(&params).as_str()),
            None => item.with_error(ItemError::new(
                "UNRECOGNIZED_NAME",
                format!("{} is not named <seed>-<points>.json", name),
            )),
        };

        result_set.push(item);
    }

    result_set.sort();
    Ok(result_set)
}

/// Run the list command
pub fn run_list(cache_root: &Path, config: RenderConfig) -> Result<()> {
    let result_set = list_artifacts(cache_root)?;
    Renderer::with_config(config).print(&result_set);
    Ok(())
}
