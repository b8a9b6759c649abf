//! Verify - Integrity check of a single cached artifact

use anyhow::{bail, Result};
use std::path::Path;

use crate::cache::key::{artifact_path, derive_key, GenerationParameters};
use crate::cache::store::{inspect_path, Lookup, MissReason};
use crate::core::model::{ItemError, Meta, ResultItem};
use crate::core::paths::normalize_path;
use crate::core::render::{RenderConfig, Renderer};
use crate::core::util::{get_file_size, get_mtime_ms};

/// Describe the verification result for the artifact at `path`
pub fn artifact_item(path: &Path, lookup: &Lookup) -> ResultItem {
    let mut item = ResultItem::artifact(normalize_path(path), lookup.status());

    let mut meta = Meta::default();
    if let Ok(size) = get_file_size(path) {
        meta.size = Some(size);
    }
    if let Ok(mtime) = get_mtime_ms(path) {
        meta.mtime_ms = Some(mtime);
    }

    match lookup {
        Lookup::Hit(entry) => meta.points = Some(entry.x.len()),
        Lookup::Miss(MissReason::IntegrityMismatch { expected, actual }) => {
            item = item.with_error(ItemError::new(
                "INTEGRITY_MISMATCH",
                format!("stored digest {} does not match computed {}", expected, actual),
            ));
        }
        Lookup::Miss(MissReason::Malformed { error }) => {
            item = item.with_error(ItemError::new("MALFORMED_ARTIFACT", error.clone()));
        }
        Lookup::Miss(MissReason::Unreadable { error }) => {
            item = item.with_error(ItemError::new("UNREADABLE_ARTIFACT", error.clone()));
        }
        Lookup::Miss(MissReason::Missing | MissReason::Disabled) => {}
    }

    item.with_meta(meta)
}

/// Run the verify command; fails unless the artifact is present and valid
pub fn run_verify(
    cache_root: &Path,
    params: GenerationParameters,
    config: RenderConfig,
) -> Result<()> {
    let key = derive_key(&params);
    let path = artifact_path(cache_root, &key);
    let lookup = inspect_path(&path);

    let item = artifact_item(&path, &lookup).with_key(key.as_str());
    Renderer::with_config(config).print(&std::iter::once(item).collect());

    if let Lookup::Miss(reason) = lookup {
        bail!("artifact {} is not valid ({})", key, reason.label());
    }

    Ok(())
}
