use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    /// Fixed advice for this tier, most important first.
    pub fn recommendations(self) -> &'static [&'static str] {
        match self {
            RiskLevel::High => &[
                "文本相似度过高，建议重新撰写",
                "检查引用格式是否正确",
                "考虑增加原创性内容",
            ],
            RiskLevel::Medium => &[
                "文本相似度中等，建议适当修改",
                "增加更多原创分析和观点",
                "确保引用内容已正确标注",
            ],
            RiskLevel::Low => &["文本相似度较低，符合原创要求", "继续保持良好的学术规范"],
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const HIGH_RISK_THRESHOLD: f64 = 0.8;
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.5;

/// Tier for a single comparison: high from 0.8, medium from 0.5.
pub fn classify(score: f64) -> RiskLevel {
    if score >= HIGH_RISK_THRESHOLD {
        RiskLevel::High
    } else if score >= MEDIUM_RISK_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

pub fn recommend(score: f64) -> Vec<String> {
    classify(score)
        .recommendations()
        .iter()
        .map(|line| line.to_string())
        .collect()
}

/// Bucket used when tallying corpus results. Looser than [`classify`]:
/// high above 0.7, medium within `[0.4, 0.7]`.
pub fn corpus_bucket(score: f64) -> RiskLevel {
    if score > 0.7 {
        RiskLevel::High
    } else if score >= 0.4 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Score as a percentage with two decimals; exact halves round away from zero.
pub fn to_percentage(score: f64) -> f64 {
    round2(score * 100.0)
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
