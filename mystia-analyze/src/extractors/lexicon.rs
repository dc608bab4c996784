//! Keyword lexicons and occurrence counting
//!
//! Every keyword score in the pipeline counts occurrences, not presence:
//! "焦虑焦虑" scores two hits for 焦虑. Occurrences are non-overlapping and
//! matching is case-sensitive.

/// Positive sentiment keywords
pub const POSITIVE_WORDS: [&str; 7] = ["顺利", "开心", "希望", "成功", "上岸", "幸运", "期待"];

/// Negative sentiment keywords
pub const NEGATIVE_WORDS: [&str; 8] = ["焦虑", "难受", "崩溃", "害怕", "迷茫", "失败", "压力", "emo"];

/// Mystic content keywords
pub const MYSTIC_WORDS: [&str; 8] = ["星座", "塔罗", "占卜", "显化", "运势", "宇宙", "水逆", "玄学"];

/// Non-overlapping occurrences of `keyword` in `text`
pub fn count_occurrences(text: &str, keyword: &str) -> usize {
    if keyword.is_empty() {
        return 0;
    }
    text.matches(keyword).count()
}

/// Total occurrences of every keyword in the set
pub fn count_hits(text: &str, keywords: &[&str]) -> usize {
    keywords
        .iter()
        .map(|keyword| count_occurrences(text, keyword))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_occurrences_not_presence() {
        assert_eq!(count_occurrences("焦虑焦虑又焦虑", "焦虑"), 3);
        assert_eq!(count_occurrences("开心", "焦虑"), 0);
    }

    #[test]
    fn test_non_overlapping() {
        assert_eq!(count_occurrences("aaa", "aa"), 1);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(count_occurrences("", "星座"), 0);
        assert_eq!(count_occurrences("星座", ""), 0);
        assert_eq!(count_hits("", &MYSTIC_WORDS), 0);
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(count_hits("emo了 EMO", &NEGATIVE_WORDS), 1);
    }
}
