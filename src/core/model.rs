//! Unified Result Model
//!
//! All commands map their output to this result model before rendering.

use serde::{Deserialize, Serialize};

/// The kind of result item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Dataset,
    Key,
    Artifact,
    Check,
    Error,
}

/// Metadata for a result item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meta {
    /// Modification time in milliseconds since epoch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mtime_ms: Option<i64>,

    /// File size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Number of points in the dataset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<usize>,

    /// Whether the data was served from cache
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hit: Option<bool>,
}

/// Error information for a result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemError {
    pub code: String,
    pub message: String,
}

impl ItemError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// The unified result item that all commands produce
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultItem {
    /// The kind of this result
    pub kind: Kind,

    /// Artifact path, using '/' as separator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Cache key the item refers to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Short status label (hit, miss, valid, mismatch, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Structured data payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    /// Metadata
    pub meta: Meta,

    /// Errors (if any)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ItemError>,
}

impl ResultItem {
    fn with_kind(kind: Kind) -> Self {
        Self {
            kind,
            path: None,
            key: None,
            status: None,
            data: None,
            meta: Meta::default(),
            errors: Vec::new(),
        }
    }

    /// Create a new dataset result
    pub fn dataset(key: impl Into<String>, path: impl Into<String>) -> Self {
        let mut item = Self::with_kind(Kind::Dataset);
        item.key = Some(key.into());
        item.path = Some(path.into());
        item
    }

    /// Create a new key result
    pub fn key(key: impl Into<String>, path: impl Into<String>) -> Self {
        let mut item = Self::with_kind(Kind::Key);
        item.key = Some(key.into());
        item.path = Some(path.into());
        item
    }

    /// Create a new artifact result
    pub fn artifact(path: impl Into<String>, status: impl Into<String>) -> Self {
        let mut item = Self::with_kind(Kind::Artifact);
        item.path = Some(path.into());
        item.status = Some(status.into());
        item
    }

    /// Create a new check result
    pub fn check(name: impl Into<String>, status: impl Into<String>) -> Self {
        let mut item = Self::with_kind(Kind::Check);
        item.key = Some(name.into());
        item.status = Some(status.into());
        item
    }

    /// Create a new error result
    #[allow(dead_code)]
    pub fn error(error: ItemError) -> Self {
        let mut item = Self::with_kind(Kind::Error);
        item.errors.push(error);
        item
    }

    /// Set metadata
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    /// Set cache key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set status label
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Set structured data payload
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Add an error
    pub fn with_error(mut self, error: ItemError) -> Self {
        self.errors.push(error);
        self
    }
}

/// Result set containing multiple result items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSet {
    pub items: Vec<ResultItem>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: ResultItem) {
        self.items.push(item);
    }

    /// Sort items by path for stable output
    pub fn sort(&mut self) {
        self.items.sort_by(|a, b| match (&a.path, &b.path) {
            (Some(pa), Some(pb)) => pa.cmp(pb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<ResultItem> for ResultSet {
    fn from_iter<T: IntoIterator<Item = ResultItem>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
