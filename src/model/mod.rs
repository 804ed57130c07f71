use serde::{Deserialize, Serialize};

use crate::similarity::{RiskLevel, SentenceMatch};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SimilarityCheckPayload {
    pub text1: Option<String>,
    pub text2: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LiteratureCheckPayload {
    pub literature_id: Option<i64>,
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UrlCheckPayload {
    pub url: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisOut {
    pub sentence_matches: Vec<SentenceMatch>,
    pub common_keywords: Vec<String>,
    pub keyword_similarity: f64,
    pub sentence_coverage: f64,
}

#[derive(Debug, Serialize)]
pub struct SimilarityCheckOut {
    pub similarity_score: f64,
    pub similarity_percentage: f64,
    pub risk_level: RiskLevel,
    pub analysis: AnalysisOut,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct LiteratureMatchOut {
    pub literature_id: i64,
    pub title: String,
    pub authors: String,
    pub similarity: f64,
    pub similarity_percentage: f64,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Serialize)]
pub struct LiteratureCheckOut {
    pub total_checked: usize,
    pub high_risk: usize,
    pub medium_risk: usize,
    pub low_risk: usize,
    pub results: Vec<LiteratureMatchOut>,
}

#[derive(Debug, Serialize)]
pub struct UrlCheckOut {
    pub similarity_score: f64,
    pub similarity_percentage: f64,
    pub risk_level: RiskLevel,
    pub web_content_length: usize,
    pub text_length: usize,
}
