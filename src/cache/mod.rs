//! Cache module - Manages dataset artifacts under the cache root
//!
//! Provides:
//! - Cache key derivation from generation parameters
//! - Integrity digests over cached data
//! - Artifact storage with verified reads and atomic writes
//! - Get-or-generate access with fallback to regeneration

pub mod digest;
pub mod entry;
pub mod error;
pub mod key;
pub mod reader;
pub mod store;
