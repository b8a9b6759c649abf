//! Commands module - Handlers behind each CLI subcommand
//!
//! Provides:
//! - get: Get-or-generate a dataset
//! - key: Cache key and artifact path for a parameter set
//! - verify: Integrity check of a single artifact
//! - list: Inventory of the cache root
//! - doctor: Cache root health checks

pub mod doctor;
pub mod get;
pub mod key;
pub mod list;
pub mod verify;
