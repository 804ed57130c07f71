use std::collections::HashMap;

use super::normalizer::word_runs;

pub const MAX_KEYWORDS: usize = 10;

/// English stop words removed before ranking. Text in other languages is
/// not filtered.
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
    "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did", "will",
    "would", "could", "should", "may", "might", "must", "can", "this", "that", "these", "those",
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them",
];

fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Up to ten most frequent words longer than two characters, excluding
/// stop words. Equal counts keep first-seen order.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();

    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for word in word_runs(&lowered) {
        if word.chars().count() <= 2 || is_stop_word(word) {
            continue;
        }
        match positions.get(word) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                positions.insert(word, counts.len());
                counts.push((word, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(word, _)| word.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_by_frequency() {
        let keywords = extract_keywords("Rust rust RUST memory safety memory the and is a to");
        assert_eq!(keywords, vec!["rust", "memory", "safety"]);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let keywords = extract_keywords("gamma alpha beta alpha beta gamma delta");
        assert_eq!(keywords, vec!["gamma", "alpha", "beta", "delta"]);
    }

    #[test]
    fn never_returns_more_than_ten() {
        let text = "one two three four five six seven eight nine ten eleven twelve \
                    thirteen fourteen";
        let keywords = extract_keywords(text);
        assert_eq!(keywords.len(), MAX_KEYWORDS);
        assert_eq!(keywords[0], "one");
        assert_eq!(keywords[9], "ten");
    }

    #[test]
    fn drops_short_tokens_and_stop_words() {
        let keywords = extract_keywords("It is an ox; we can do this, they said. Those were days");
        assert_eq!(keywords, vec!["said", "days"]);
        for keyword in &keywords {
            assert!(keyword.chars().count() > 2);
            assert!(!STOP_WORDS.contains(&keyword.as_str()));
        }
    }

    #[test]
    fn non_english_text_is_not_filtered() {
        let keywords = extract_keywords("文本相似度 文本相似度 检测");
        assert_eq!(keywords, vec!["文本相似度"]);
    }

    #[test]
    fn empty_text_has_no_keywords() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("a an the to of").is_empty());
    }
}
