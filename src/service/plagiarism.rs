use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    model::{
        AnalysisOut, LiteratureCheckOut, LiteratureCheckPayload, LiteratureMatchOut,
        SimilarityCheckOut, SimilarityCheckPayload, UrlCheckOut, UrlCheckPayload,
    },
    similarity::{risk, CorpusComparison, SimilarityEngine, SimilarityReport},
    store::{LiteratureRecord, LiteratureStore},
    util::page::PageFetcher,
};

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

pub async fn check_similarity(
    engine: &SimilarityEngine,
    payload: SimilarityCheckPayload,
) -> AppResult<SimilarityCheckOut> {
    let (text1, text2) = match (non_empty(payload.text1), non_empty(payload.text2)) {
        (Some(text1), Some(text2)) => (text1, text2),
        _ => return Err(AppError::BadRequest("请输入两段文本进行比较".into())),
    };

    let engine = *engine;
    let report = tokio::task::spawn_blocking(move || engine.compare(&text1, &text2)).await?;

    tracing::info!(
        score = report.score,
        risk = %report.risk_level,
        sentence_matches = report.analysis.sentence_matches.len(),
        "pairwise similarity checked"
    );

    Ok(report_to_out(report))
}

pub async fn check_literature(
    store: &Arc<dyn LiteratureStore>,
    engine: &SimilarityEngine,
    user_id: i64,
    payload: LiteratureCheckPayload,
) -> AppResult<LiteratureCheckOut> {
    let literature_id = payload.literature_id.filter(|id| *id != 0);
    let text = non_empty(payload.text);

    let query = match (literature_id, text) {
        (Some(id), _) => {
            let record = store
                .find_literature(id)
                .await?
                .ok_or_else(|| AppError::NotFound("文献不存在".into()))?;
            record.comparison_text().unwrap_or_default().to_string()
        }
        (None, Some(text)) => text,
        (None, None) => {
            return Err(AppError::BadRequest("请提供文献ID或直接提供文本".into()));
        }
    };

    let candidates: Vec<_> = store
        .list_user_literature(user_id)
        .await?
        .into_iter()
        .map(LiteratureRecord::into_candidate)
        .collect();
    let candidate_count = candidates.len();

    let engine = *engine;
    let comparison =
        tokio::task::spawn_blocking(move || engine.compare_corpus(&query, candidates)).await?;

    tracing::info!(
        user_id,
        literature_id,
        candidates = candidate_count,
        matched = comparison.total_checked,
        high_risk = comparison.high_risk_count,
        "literature corpus checked"
    );

    Ok(comparison_to_out(comparison))
}

pub async fn check_url(
    fetcher: &PageFetcher,
    engine: &SimilarityEngine,
    payload: UrlCheckPayload,
) -> AppResult<UrlCheckOut> {
    let (url, text) = match (non_empty(payload.url), non_empty(payload.text)) {
        (Some(url), Some(text)) => (url, text),
        _ => return Err(AppError::BadRequest("请提供URL和待检查文本".into())),
    };

    let web_text = fetcher.fetch_text(&url).await.map_err(|err| {
        tracing::warn!(url = %url, error = %err, "failed to fetch page for comparison");
        AppError::BadRequest("无法访问指定的URL".into())
    })?;

    let web_content_length = web_text.chars().count();
    let text_length = text.chars().count();

    let engine = *engine;
    let score = tokio::task::spawn_blocking(move || engine.score(&text, &web_text)).await?;

    tracing::info!(url = %url, score, web_content_length, "url similarity checked");

    Ok(UrlCheckOut {
        similarity_score: score,
        similarity_percentage: risk::to_percentage(score),
        risk_level: risk::classify(score),
        web_content_length,
        text_length,
    })
}

fn report_to_out(report: SimilarityReport) -> SimilarityCheckOut {
    let SimilarityReport {
        score,
        percentage,
        risk_level,
        analysis,
        recommendations,
    } = report;

    SimilarityCheckOut {
        similarity_score: score,
        similarity_percentage: percentage,
        risk_level,
        analysis: AnalysisOut {
            sentence_matches: analysis.sentence_matches,
            common_keywords: analysis.common_keywords,
            keyword_similarity: analysis.keyword_similarity,
            sentence_coverage: analysis.sentence_coverage,
        },
        recommendations,
    }
}

fn comparison_to_out(comparison: CorpusComparison) -> LiteratureCheckOut {
    LiteratureCheckOut {
        total_checked: comparison.total_checked,
        high_risk: comparison.high_risk_count,
        medium_risk: comparison.medium_risk_count,
        low_risk: comparison.low_risk_count,
        results: comparison
            .results
            .into_iter()
            .map(|item| LiteratureMatchOut {
                literature_id: item.id,
                title: item.title,
                authors: item.authors,
                similarity: item.score,
                similarity_percentage: item.percentage,
                risk_level: item.risk_level,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{similarity::RiskLevel, store::MemoryLiteratureStore};

    fn record(id: i64, title: &str, abstract_text: &str) -> LiteratureRecord {
        LiteratureRecord {
            id,
            title: title.to_string(),
            authors: "Zhang, S.".to_string(),
            abstract_text: abstract_text.to_string(),
        }
    }

    #[tokio::test]
    async fn pairwise_check_requires_both_texts() {
        let engine = SimilarityEngine::new();
        let missing = SimilarityCheckPayload {
            text1: Some("text".into()),
            text2: None,
        };
        assert!(matches!(
            check_similarity(&engine, missing).await,
            Err(AppError::BadRequest(_))
        ));

        let blank = SimilarityCheckPayload {
            text1: Some(String::new()),
            text2: Some("text".into()),
        };
        assert!(matches!(
            check_similarity(&engine, blank).await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn pairwise_check_shapes_report() {
        let out = check_similarity(
            &SimilarityEngine::new(),
            SimilarityCheckPayload {
                text1: Some("The quick brown fox".into()),
                text2: Some("The quick brown fox".into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(out.similarity_score, 1.0);
        assert_eq!(out.similarity_percentage, 100.0);
        assert_eq!(out.risk_level, RiskLevel::High);
        assert_eq!(out.recommendations.len(), 3);
        assert_eq!(out.analysis.sentence_coverage, 1.0);
    }

    #[tokio::test]
    async fn literature_check_uses_record_text_and_user_collection() {
        let store: Arc<dyn LiteratureStore> = Arc::new(
            MemoryLiteratureStore::new()
                .with_literature(record(1, "Query paper", "The quick brown fox jumps over the lazy dog"))
                .with_literature(record(2, "The quick brown fox", ""))
                .with_literature(record(3, "Unlinked", "The quick brown fox jumps over the lazy dog"))
                .with_link(9, 1)
                .with_link(9, 2),
        );

        let out = check_literature(
            &store,
            &SimilarityEngine::new(),
            9,
            LiteratureCheckPayload {
                literature_id: Some(1),
                text: Some("ignored when an id is given".into()),
            },
        )
        .await
        .unwrap();

        let ids: Vec<i64> = out.results.iter().map(|r| r.literature_id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(out.total_checked, 2);
        assert_eq!(out.high_risk, 1);
        assert_eq!(out.medium_risk, 1);
        assert_eq!(out.low_risk, 0);
    }

    #[tokio::test]
    async fn literature_check_validates_input() {
        let store: Arc<dyn LiteratureStore> = Arc::new(MemoryLiteratureStore::new());
        let engine = SimilarityEngine::new();

        let missing = check_literature(
            &store,
            &engine,
            1,
            LiteratureCheckPayload {
                literature_id: Some(0),
                text: Some(String::new()),
            },
        )
        .await;
        assert!(matches!(missing, Err(AppError::BadRequest(_))));

        let unknown = check_literature(
            &store,
            &engine,
            1,
            LiteratureCheckPayload {
                literature_id: Some(404),
                text: None,
            },
        )
        .await;
        assert!(matches!(unknown, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn literature_check_with_empty_collection() {
        let store: Arc<dyn LiteratureStore> = Arc::new(MemoryLiteratureStore::new());
        let out = check_literature(
            &store,
            &SimilarityEngine::new(),
            1,
            LiteratureCheckPayload {
                literature_id: None,
                text: Some("anything".into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(out.total_checked, 0);
        assert!(out.results.is_empty());
    }
}
