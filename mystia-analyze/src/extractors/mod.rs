//! Per-post text features
//!
//! Pure functions of cleaned text, each implementing `TextFeature`:
//! 1. **sentiment** - positive minus negative keyword occurrences
//! 2. **mystic** - mystic keyword occurrences
//!
//! Shared keyword lists and the occurrence counter live in **lexicon**.

pub mod lexicon;
pub mod mystic;
pub mod sentiment;

pub use mystic::MysticDensity;
pub use sentiment::{SentimentScorer, SentimentTone};
