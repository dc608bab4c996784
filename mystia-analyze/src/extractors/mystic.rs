//! Mystic keyword density

use super::lexicon::{count_hits, MYSTIC_WORDS};
use crate::types::TextFeature;

/// Occurrences of mystic keywords (星座, 塔罗, 占卜, ...) in a text
#[derive(Debug, Clone, Default)]
pub struct MysticDensity;

impl MysticDensity {
    pub fn new() -> Self {
        Self
    }

    pub fn density(&self, text: &str) -> u64 {
        count_hits(text, &MYSTIC_WORDS) as u64
    }
}

impl TextFeature for MysticDensity {
    fn name(&self) -> &'static str {
        "mystic_density"
    }

    fn score(&self, text: &str) -> i64 {
        self.density(text) as i64
    }
}
