//! Post loader
//!
//! Reads raw post records into `Post` values:
//! - JSON array of objects, or JSON Lines (one object per line)
//! - Counter columns normalized to `reposts_count`, `comments_count`,
//!   `attitudes_count` (aliases `reposts`, `comments`, `likes`)
//! - Text cleaned of HTML tags, URLs, mentions and hashtags
//!
//! Missing fields default (empty text, zero counters). Structural problems
//! (unreadable file, malformed JSON, non-object records, empty corpus) are
//! input errors.

use crate::error::{AnalysisError, AnalysisResult};
use crate::types::DataQualityWarning;
use mystia_common::Post;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, info, warn};

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<.*?>").expect("valid HTML tag pattern"));
static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"http\S+").expect("valid URL pattern"));
static MENTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"@.*?\s").expect("valid mention pattern"));
static HASHTAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"#.*?#").expect("valid hashtag pattern"));

/// Canonical counter column followed by its accepted aliases
const REPOSTS_KEYS: [&str; 2] = ["reposts_count", "reposts"];
const COMMENTS_KEYS: [&str; 2] = ["comments_count", "comments"];
const ATTITUDES_KEYS: [&str; 2] = ["attitudes_count", "likes"];

/// Layout of the input file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InputFormat {
    JsonArray,
    JsonLines,
}

/// Posts read from one input file
#[derive(Debug, Clone)]
pub struct LoadedCorpus {
    pub posts: Vec<Post>,
    pub format: InputFormat,
    pub warnings: Vec<DataQualityWarning>,
}

/// Remove HTML tags, URLs, @mentions and #hashtags#, then trim
pub fn clean_text(text: &str) -> String {
    let text = HTML_TAG.replace_all(text, "");
    let text = URL.replace_all(&text, "");
    let text = MENTION.replace_all(&text, "");
    let text = HASHTAG.replace_all(&text, "");
    text.trim().to_string()
}

/// Read and parse a post file
pub fn load_posts(path: &Path) -> AnalysisResult<LoadedCorpus> {
    if !path.exists() {
        return Err(AnalysisError::Input(format!(
            "Input file not found: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        AnalysisError::Input(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let corpus = parse_posts(&content)
        .map_err(|e| match e {
            AnalysisError::Input(msg) => AnalysisError::Input(format!("{}: {}", path.display(), msg)),
            other => other,
        })?;

    info!(
        "Loaded {} posts from {} ({:?})",
        corpus.posts.len(),
        path.display(),
        corpus.format
    );
    Ok(corpus)
}

/// Parse post records from file content
pub fn parse_posts(content: &str) -> AnalysisResult<LoadedCorpus> {
    let content = content.trim_start_matches('\u{feff}').trim();

    let (records, format) = if content.starts_with('[') {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| AnalysisError::Input(format!("Malformed JSON: {}", e)))?;
        match value {
            Value::Array(records) => (records, InputFormat::JsonArray),
            _ => return Err(AnalysisError::Input("Top-level JSON value is not an array".to_string())),
        }
    } else if content.starts_with('{') {
        (parse_json_lines(content)?, InputFormat::JsonLines)
    } else if content.is_empty() {
        return Err(AnalysisError::Input("Input is empty".to_string()));
    } else {
        return Err(AnalysisError::Input(
            "Expected a JSON array or JSON Lines of post objects".to_string(),
        ));
    };

    if records.is_empty() {
        return Err(AnalysisError::Input("Input contains no post records".to_string()));
    }

    let mut coerced = 0usize;
    let posts = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let fields = record.as_object().ok_or_else(|| {
                AnalysisError::Input(format!("Record {} is not a JSON object", index))
            })?;
            Ok(record_to_post(fields, &mut coerced))
        })
        .collect::<AnalysisResult<Vec<_>>>()?;

    let mut warnings = Vec::new();
    if coerced > 0 {
        warn!("{} counter value(s) were not valid counts and were set to 0", coerced);
        warnings.push(DataQualityWarning::CoercedCounters { count: coerced });
    }

    debug!(posts = posts.len(), "Parsed post records");
    Ok(LoadedCorpus {
        posts,
        format,
        warnings,
    })
}

fn parse_json_lines(content: &str) -> AnalysisResult<Vec<Value>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(line_no, line)| {
            serde_json::from_str(line).map_err(|e| {
                AnalysisError::Input(format!("Malformed JSON on line {}: {}", line_no + 1, e))
            })
        })
        .collect()
}

fn record_to_post(fields: &Map<String, Value>, coerced: &mut usize) -> Post {
    // Non-string text is treated as empty
    let raw_text = fields.get("text").and_then(Value::as_str).unwrap_or("");

    let mut post = Post::new(
        clean_text(raw_text),
        counter(fields, &REPOSTS_KEYS, coerced),
        counter(fields, &COMMENTS_KEYS, coerced),
        counter(fields, &ATTITUDES_KEYS, coerced),
    );
    post.user = optional_label(fields.get("user"));
    post.keyword = optional_label(fields.get("keyword"));
    post
}

/// First present key wins, so the canonical column shadows its aliases
fn counter(fields: &Map<String, Value>, keys: &[&str], coerced: &mut usize) -> u64 {
    let Some(value) = keys.iter().find_map(|key| fields.get(*key)) else {
        return 0;
    };
    match parse_counter(value) {
        Some(count) => count,
        None => {
            *coerced += 1;
            0
        }
    }
}

fn parse_counter(value: &Value) -> Option<u64> {
    match value {
        Value::Null => Some(0),
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f.trunc() as u64)
        }),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Some(0);
            }
            s.parse::<u64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f.trunc() as u64)
            })
        }
        _ => None,
    }
}

fn optional_label(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_strips_markup() {
        let raw = "<a href='x'>链接</a>今天 http://t.cn/abc 运势 @小明 好 #塔罗#测试 ";
        assert_eq!(clean_text(raw), "链接今天  运势 好 测试");
    }

    #[test]
    fn test_clean_text_plain_text_unchanged() {
        assert_eq!(clean_text("  考研上岸  "), "考研上岸");
    }

    #[test]
    fn test_parse_json_array_with_defaults() {
        let corpus = parse_posts(
            r#"[
                {"text": "考试 焦虑", "reposts_count": 10, "comments_count": 5, "attitudes_count": 4},
                {"text": "星座"}
            ]"#,
        )
        .unwrap();

        assert_eq!(corpus.format, InputFormat::JsonArray);
        assert_eq!(corpus.posts.len(), 2);
        assert_eq!(corpus.posts[0].reposts_count, 10);
        assert_eq!(corpus.posts[0].comments_count, 5);
        assert_eq!(corpus.posts[0].attitudes_count, 4);
        assert_eq!(corpus.posts[1].reposts_count, 0);
        assert_eq!(corpus.posts[1].attitudes_count, 0);
        assert!(corpus.warnings.is_empty());
    }

    #[test]
    fn test_column_aliases() {
        let corpus = parse_posts(r#"[{"text": "a", "reposts": 3, "comments": "7", "likes": 2.0}]"#).unwrap();
        let post = &corpus.posts[0];
        assert_eq!(post.reposts_count, 3);
        assert_eq!(post.comments_count, 7);
        assert_eq!(post.attitudes_count, 2);
    }

    #[test]
    fn test_canonical_column_shadows_alias() {
        let corpus = parse_posts(r#"[{"text": "a", "reposts_count": 1, "reposts": 99}]"#).unwrap();
        assert_eq!(corpus.posts[0].reposts_count, 1);
    }

    #[test]
    fn test_missing_and_non_string_text() {
        let corpus = parse_posts(r#"[{"reposts_count": 1}, {"text": 42}, {"text": null}]"#).unwrap();
        assert!(corpus.posts.iter().all(|p| p.text.is_empty()));
    }

    #[test]
    fn test_invalid_counters_coerced_with_warning() {
        let corpus = parse_posts(r#"[{"text": "a", "reposts_count": "1万", "comments_count": -3}]"#).unwrap();
        assert_eq!(corpus.posts[0].reposts_count, 0);
        assert_eq!(corpus.posts[0].comments_count, 0);
        assert_eq!(
            corpus.warnings,
            vec![DataQualityWarning::CoercedCounters { count: 2 }]
        );
    }

    #[test]
    fn test_json_lines() {
        let corpus = parse_posts("{\"text\": \"一\"}\n\n{\"text\": \"二\", \"user\": \"u1\"}\n").unwrap();
        assert_eq!(corpus.format, InputFormat::JsonLines);
        assert_eq!(corpus.posts.len(), 2);
        assert_eq!(corpus.posts[1].user.as_deref(), Some("u1"));
    }

    #[test]
    fn test_malformed_input_is_error() {
        assert!(matches!(parse_posts("[{\"text\": "), Err(AnalysisError::Input(_))));
        assert!(matches!(parse_posts("not json"), Err(AnalysisError::Input(_))));
        assert!(matches!(parse_posts(""), Err(AnalysisError::Input(_))));
        assert!(matches!(parse_posts("[]"), Err(AnalysisError::Input(_))));
        assert!(matches!(parse_posts("[1, 2]"), Err(AnalysisError::Input(_))));
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = load_posts(Path::new("/nonexistent/mystia/posts.json"));
        assert!(matches!(result, Err(AnalysisError::Input(_))));
    }
}
