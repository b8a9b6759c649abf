//! Doctor - Cache root health checks

use anyhow::Result;
use std::path::Path;
use tracing::warn;

use crate::core::model::{ItemError, ResultItem, ResultSet};
use crate::core::paths::normalize_path;
use crate::core::render::{RenderConfig, Renderer};
use crate::core::util::probe_writable;

/// Status of one health check
#[derive(Debug, Clone)]
pub struct CheckStatus {
    pub name: String,
    pub ok: bool,
    pub status: String,
    pub notes: Option<String>,
}

impl CheckStatus {
    pub fn to_result_item(&self, cache_root: &Path) -> ResultItem {
        let mut item = ResultItem::check(&self.name, &self.status);
        item.path = Some(normalize_path(cache_root));

        if !self.ok {
            item = item.with_error(ItemError::new(
                "CHECK_FAILED",
                self.notes
                    .clone()
                    .unwrap_or_else(|| format!("{} check failed", self.name)),
            ));
        }

        item
    }
}

/// Check that the cache root can hold artifacts
pub fn check_cache_root(cache_root: &Path) -> Vec<CheckStatus> {
    let mut checks = Vec::new();

    if !cache_root.exists() {
        checks.push(CheckStatus {
            name: "cache_root".to_string(),
            ok: true,
            status: "absent".to_string(),
            notes: Some("Will be created on first write".to_string()),
        });
        return checks;
    }

    if !cache_root.is_dir() {
        checks.push(CheckStatus {
            name: "cache_root".to_string(),
            ok: false,
            status: "not_a_directory".to_string(),
            notes: Some("Cache root exists but is not a directory".to_string()),
        });
        return checks;
    }

    checks.push(CheckStatus {
        name: "cache_root".to_string(),
        ok: true,
        status: "present".to_string(),
        notes: None,
    });

    let writable = probe_writable(cache_root);
    checks.push(CheckStatus {
        name: "writable".to_string(),
        ok: writable.is_ok(),
        status: (if writable.is_ok() { "ok" } else { "denied" }).to_string(),
        notes: writable.err().map(|e| e.to_string()),
    });

    checks
}

/// Run the doctor command
pub fn run_doctor(cache_root: &Path, config: RenderConfig) -> Result<()> {
    let checks = check_cache_root(cache_root);

    let result_set: ResultSet = checks
        .iter()
        .map(|check| check.to_result_item(cache_root))
        .collect();
    Renderer::with_config(config).print(&result_set);

    if checks.iter().any(|c| !c.ok) {
        warn!(cache_root = %cache_root.display(), "cache root is not usable");
    }

    Ok(())
}
