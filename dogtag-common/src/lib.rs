//! # Dogtag Common Library
//!
//! Shared code for the dogtag lookup service:
//! - Lookup tables (alias cipher, weapon codes, VIP tiers)
//! - Tree extraction over schema-less profile JSON
//! - Profile normalization into a flat summary
//! - Configuration loading
//!
//! Nothing in this crate performs network I/O. Every normalization operation
//! is total: missing data degrades to a fallback value, never an error.

pub mod alias;
pub mod config;
pub mod error;
pub mod profile;
pub mod tables;
pub mod tree;
pub mod vip;
pub mod weapons;

pub use error::{Error, Result};
pub use profile::{normalize, ProfileSummary};
pub use tables::LookupTables;
