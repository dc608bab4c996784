//! # Mystia Common Library
//!
//! Shared code for the Mystia analysis crates:
//! - Error types
//! - Bootstrap configuration (TOML) and setting resolution
//! - Post and scenario model
//! - Corpus-wide feature standardization

pub mod config;
pub mod error;
pub mod models;
pub mod standardize;

pub use error::{Error, Result};
pub use models::{Post, Scenario};
pub use standardize::{FeatureStats, Standardizer};
