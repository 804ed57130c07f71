use serde::Serialize;

use super::{keywords::extract_keywords, normalizer::split_sentences, sequence::SequenceMatcher};

/// Sentence pairs must score strictly above this to be reported.
pub const SENTENCE_MATCH_THRESHOLD: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentenceMatch {
    pub original: String,
    pub matched: String,
    pub similarity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisDetail {
    pub sentence_matches: Vec<SentenceMatch>,
    pub common_keywords: Vec<String>,
    pub keyword_similarity: f64,
    pub sentence_coverage: f64,
}

/// For every sentence of `text_a`, the best sequence-ratio match among the
/// sentences of `text_b`, kept only above [`SENTENCE_MATCH_THRESHOLD`].
/// Output follows sentence order in `text_a`.
pub fn align_sentences(text_a: &str, text_b: &str) -> Vec<SentenceMatch> {
    let sentences_b: Vec<(&str, Vec<char>)> = split_sentences(text_b)
        .into_iter()
        .map(|sentence| (sentence, sentence.chars().collect()))
        .collect();

    split_sentences(text_a)
        .into_iter()
        .filter_map(|sentence| {
            let chars_a: Vec<char> = sentence.chars().collect();
            let mut best: Option<(&str, f64)> = None;
            for (candidate, chars_b) in &sentences_b {
                let score = SequenceMatcher::new(&chars_a, chars_b).ratio();
                if score > best.map_or(0.0, |(_, s)| s) {
                    best = Some((*candidate, score));
                }
            }

            best.filter(|(_, score)| *score > SENTENCE_MATCH_THRESHOLD)
                .map(|(matched, score)| SentenceMatch {
                    original: sentence.to_string(),
                    matched: matched.to_string(),
                    similarity: score,
                })
        })
        .collect()
}

/// Sentence alignment plus keyword overlap between two documents.
pub fn analyze(text_a: &str, text_b: &str) -> AnalysisDetail {
    let sentence_count = split_sentences(text_a).len();
    let sentence_matches = align_sentences(text_a, text_b);

    let keywords_a = extract_keywords(text_a);
    let keywords_b = extract_keywords(text_b);
    let common_keywords: Vec<String> = keywords_a
        .iter()
        .filter(|keyword| keywords_b.contains(keyword))
        .cloned()
        .collect();

    let keyword_similarity =
        common_keywords.len() as f64 / keywords_a.len().max(keywords_b.len()).max(1) as f64;
    let sentence_coverage = sentence_matches.len() as f64 / sentence_count.max(1) as f64;

    AnalysisDetail {
        sentence_matches,
        common_keywords,
        keyword_similarity,
        sentence_coverage,
    }
}
