use super::{
    risk::{classify, corpus_bucket, to_percentage, RiskLevel},
    scorer::similarity,
};

/// Candidates scoring at or below this are dropped from corpus results.
pub const MIN_CORPUS_SCORE: f64 = 0.1;
/// Number of ranked results returned from a corpus comparison.
pub const MAX_CORPUS_RESULTS: usize = 20;

#[derive(Debug, Clone)]
pub struct CorpusCandidate {
    pub id: i64,
    pub title: String,
    pub authors: String,
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CorpusMatch {
    pub id: i64,
    pub title: String,
    pub authors: String,
    pub score: f64,
    pub percentage: f64,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorpusComparison {
    /// Candidates that survived the minimum-score filter.
    pub total_checked: usize,
    pub high_risk_count: usize,
    pub medium_risk_count: usize,
    pub low_risk_count: usize,
    pub results: Vec<CorpusMatch>,
}

pub fn compare_against_corpus<I>(query: &str, candidates: I) -> CorpusComparison
where
    I: IntoIterator<Item = CorpusCandidate>,
{
    let mut matches: Vec<CorpusMatch> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let text = candidate.text.as_deref().filter(|text| !text.is_empty())?;
            let score = similarity(query, text);
            if score <= MIN_CORPUS_SCORE {
                return None;
            }
            Some(CorpusMatch {
                id: candidate.id,
                title: candidate.title,
                authors: candidate.authors,
                score,
                percentage: to_percentage(score),
                risk_level: classify(score),
            })
        })
        .collect();

    matches.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut comparison = CorpusComparison {
        total_checked: matches.len(),
        ..CorpusComparison::default()
    };
    for item in &matches {
        match corpus_bucket(item.score) {
            RiskLevel::High => comparison.high_risk_count += 1,
            RiskLevel::Medium => comparison.medium_risk_count += 1,
            RiskLevel::Low => comparison.low_risk_count += 1,
        }
    }

    matches.truncate(MAX_CORPUS_RESULTS);
    comparison.results = matches;
    comparison
}
