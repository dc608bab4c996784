//! Sentiment Scorer
//!
//! Lexicon sentiment: occurrences of positive keywords minus occurrences of
//! negative keywords. Raw signed count, no normalization.

use super::lexicon::{count_hits, NEGATIVE_WORDS, POSITIVE_WORDS};
use crate::types::TextFeature;
use mystia_common::Post;

/// Tone of a mean sentiment value
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum SentimentTone {
    Positive,
    /// Negative mood, read as anxiety
    Negative,
    Neutral,
}

impl SentimentTone {
    pub fn of(score: f64) -> Self {
        if score > 0.0 {
            SentimentTone::Positive
        } else if score < 0.0 {
            SentimentTone::Negative
        } else {
            SentimentTone::Neutral
        }
    }
}

/// Positive-minus-negative keyword scorer
#[derive(Debug, Clone, Default)]
pub struct SentimentScorer;

impl SentimentScorer {
    pub fn new() -> Self {
        Self
    }

    /// (positive hits, negative hits)
    pub fn hits(&self, text: &str) -> (usize, usize) {
        (count_hits(text, &POSITIVE_WORDS), count_hits(text, &NEGATIVE_WORDS))
    }

    /// Annotate every post with its sentiment score
    pub fn annotate(&self, posts: &mut [Post]) {
        for post in posts.iter_mut() {
            post.sentiment_score = self.score(&post.text);
        }
    }
}

impl TextFeature for SentimentScorer {
    fn name(&self) -> &'static str {
        "sentiment_score"
    }

    fn score(&self, text: &str) -> i64 {
        let (positive, negative) = self.hits(text);
        positive as i64 - negative as i64
    }
}
