//! Key - Show where a parameter set is cached

use anyhow::Result;
use std::path::Path;

use crate::cache::key::{artifact_path, derive_key, GenerationParameters};
use crate::core::model::{ResultItem, ResultSet};
use crate::core::paths::normalize_path;
use crate::core::render::{RenderConfig, Renderer};

/// Run the key command
pub fn run_key(cache_root: &Path, params: GenerationParameters, config: RenderConfig) -> Result<()> {
    let key = derive_key(&params);
    let path = artifact_path(cache_root, &key);

    let result_set: ResultSet =
        std::iter::once(ResultItem::key(key.as_str(), normalize_path(&path))).collect();
    Renderer::with_config(config).print(&result_set);

    Ok(())
}
