//! Text similarity and plagiarism-risk scoring.
//!
//! Every function here is pure: no I/O, no shared state. Pipeline:
//!
//! - `normalizer`: lower-casing, punctuation removal, sentence splitting
//! - `sequence`: gestalt pattern matching ratio
//! - `scorer`: blended sequence/Jaccard score of two documents
//! - `keywords`: frequency-ranked keywords
//! - `alignment`: sentence-level best matches and keyword overlap
//! - `risk`: score to tier and advice
//! - `corpus`: ranking one text against many

pub mod alignment;
pub mod corpus;
pub mod keywords;
pub mod normalizer;
pub mod risk;
pub mod scorer;
pub mod sequence;

pub use alignment::{align_sentences, analyze, AnalysisDetail, SentenceMatch};
pub use corpus::{compare_against_corpus, CorpusCandidate, CorpusComparison, CorpusMatch};
pub use keywords::extract_keywords;
pub use normalizer::{normalize, split_sentences, NormalizedText};
pub use risk::{classify, recommend, RiskLevel};
pub use scorer::similarity;

/// Result of comparing two documents.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityReport {
    pub score: f64,
    pub percentage: f64,
    pub risk_level: RiskLevel,
    pub analysis: AnalysisDetail,
    pub recommendations: Vec<String>,
}

/// Handle to the scoring pipeline. Holds no state; construct one and share
/// it freely across requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityEngine;

impl SimilarityEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, text_a: &str, text_b: &str) -> f64 {
        similarity(text_a, text_b)
    }

    pub fn compare(&self, text_a: &str, text_b: &str) -> SimilarityReport {
        let score = similarity(text_a, text_b);
        SimilarityReport {
            score,
            percentage: risk::to_percentage(score),
            risk_level: classify(score),
            analysis: analyze(text_a, text_b),
            recommendations: recommend(score),
        }
    }

    pub fn compare_corpus<I>(&self, query: &str, candidates: I) -> CorpusComparison
    where
        I: IntoIterator<Item = CorpusCandidate>,
    {
        compare_against_corpus(query, candidates)
    }
}
