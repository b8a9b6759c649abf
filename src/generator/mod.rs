//! Generator module - Deterministic synthetic datasets
//!
//! Provides:
//! - The polynomial regression dataset used by `get`
//! - Loading generation parameters from a params file

pub mod params;
pub mod polynomial;
