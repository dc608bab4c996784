//! Test Helper Utilities
//!
//! Shared utilities for testing mystia-analyze

#![allow(dead_code)]

pub mod log_capture;
pub mod posts;

pub use log_capture::{with_log_capture, LogCapture};
pub use posts::{write_json_array, write_json_lines, PostRecord};
