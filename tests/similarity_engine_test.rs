//! Properties of the scoring pipeline checked over a fixed sample of texts.

use keyan_backend::similarity::{
    align_sentences, analyze, classify, compare_against_corpus, extract_keywords,
    keywords::STOP_WORDS, similarity, CorpusCandidate, RiskLevel, SimilarityEngine,
};

const SAMPLES: &[&str] = &[
    "The quick brown fox",
    "The quick brown fox jumps over the lazy dog.",
    "Hello world",
    "Goodbye moon",
    "Deep learning improves protein folding prediction. Results were validated!",
    "Protein folding prediction is improved by deep learning. Results are validated?",
    "我们提出了一种新的文本相似度检测方法。实验结果表明该方法有效！",
    "本文提出一种文本相似度检测方法。实验表明方法有效。",
    "snake_case identifiers_and numbers 12345",
];

#[test]
fn identity_scores_one() {
    for text in SAMPLES {
        assert_eq!(similarity(text, text), 1.0, "{text:?}");
    }
}

#[test]
fn empty_side_scores_zero() {
    for text in SAMPLES {
        assert_eq!(similarity(text, ""), 0.0);
        assert_eq!(similarity("", text), 0.0);
    }
}

#[test]
fn scores_are_bounded() {
    for a in SAMPLES {
        for b in SAMPLES {
            let score = similarity(a, b);
            assert!((0.0..=1.0).contains(&score), "{a:?} vs {b:?} -> {score}");
        }
    }
}

#[test]
fn classification_boundaries() {
    assert_eq!(classify(0.79), RiskLevel::Medium);
    assert_eq!(classify(0.8), RiskLevel::High);
    assert_eq!(classify(0.49), RiskLevel::Low);
    assert_eq!(classify(0.5), RiskLevel::Medium);
}

#[test]
fn keyword_extraction_limits() {
    for text in SAMPLES {
        let keywords = extract_keywords(text);
        assert!(keywords.len() <= 10);
        for keyword in keywords {
            assert!(keyword.chars().count() > 2, "{keyword:?}");
            assert!(!STOP_WORDS.contains(&keyword.as_str()), "{keyword:?}");
        }
    }
}

#[test]
fn sentence_matches_exceed_threshold_and_coverage_is_bounded() {
    for a in SAMPLES {
        for b in SAMPLES {
            for m in align_sentences(a, b) {
                assert!(m.similarity > 0.8, "{m:?}");
            }
            let detail = analyze(a, b);
            assert!((0.0..=1.0).contains(&detail.sentence_coverage));
            assert!((0.0..=1.0).contains(&detail.keyword_similarity));
        }
    }
}

#[test]
fn corpus_results_are_ranked_and_counted() {
    let query = SAMPLES[4];
    let candidates: Vec<CorpusCandidate> = (0..30)
        .map(|i| CorpusCandidate {
            id: i as i64,
            title: format!("Paper {i}"),
            authors: String::new(),
            text: Some(SAMPLES[i % SAMPLES.len()].to_string()),
        })
        .collect();

    let expected_surviving = candidates
        .iter()
        .filter(|c| similarity(query, c.text.as_deref().unwrap_or_default()) > 0.1)
        .count();

    let comparison = compare_against_corpus(query, candidates);

    assert!(comparison.results.len() <= 20);
    assert!(comparison
        .results
        .windows(2)
        .all(|pair| pair[0].score >= pair[1].score));
    assert_eq!(comparison.total_checked, expected_surviving);
    assert_eq!(
        comparison.high_risk_count + comparison.medium_risk_count + comparison.low_risk_count,
        expected_surviving
    );
}

#[test]
fn engine_reports_match_free_functions() {
    let engine = SimilarityEngine::new();
    let report = engine.compare(SAMPLES[4], SAMPLES[5]);
    assert_eq!(report.score, similarity(SAMPLES[4], SAMPLES[5]));
    assert_eq!(report.risk_level, classify(report.score));
    assert_eq!(report.analysis, analyze(SAMPLES[4], SAMPLES[5]));
}
