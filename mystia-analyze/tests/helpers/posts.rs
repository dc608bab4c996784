//! Post fixture builders

use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// One raw post record as it appears in an input file
#[derive(Debug, Clone)]
pub struct PostRecord {
    pub text: String,
    pub reposts: u64,
    pub comments: u64,
    pub likes: u64,
}

impl PostRecord {
    pub fn new(text: &str, reposts: u64, comments: u64, likes: u64) -> Self {
        Self {
            text: text.to_string(),
            reposts,
            comments,
            likes,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "text": self.text,
            "reposts_count": self.reposts,
            "comments_count": self.comments,
            "attitudes_count": self.likes,
        })
    }
}

/// Write records as a JSON array to `dir/name`
pub fn write_json_array(dir: &Path, name: &str, records: &[PostRecord]) -> PathBuf {
    let path = dir.join(name);
    let array: Vec<Value> = records.iter().map(PostRecord::to_json).collect();
    std::fs::write(&path, serde_json::to_string_pretty(&array).unwrap()).unwrap();
    path
}

/// Write records as JSON Lines to `dir/name`
pub fn write_json_lines(dir: &Path, name: &str, records: &[PostRecord]) -> PathBuf {
    let path = dir.join(name);
    let lines: Vec<String> = records.iter().map(|r| r.to_json().to_string()).collect();
    std::fs::write(&path, lines.join("\n")).unwrap();
    path
}
