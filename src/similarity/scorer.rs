use std::collections::HashSet;

use super::{
    normalizer::{normalize, NormalizedText},
    sequence::SequenceMatcher,
};

/// Token-set overlap of two normalized texts.
pub fn jaccard_similarity(a: &NormalizedText, b: &NormalizedText) -> f64 {
    let set_a: HashSet<&str> = a.tokens().collect();
    let set_b: HashSet<&str> = b.tokens().collect();

    if set_a.is_empty() && set_b.is_empty() {
        return 1.0;
    }
    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

/// Character-level sequence ratio of two normalized texts.
pub fn normalized_ratio(a: &NormalizedText, b: &NormalizedText) -> f64 {
    let a = a.chars();
    let b = b.chars();
    SequenceMatcher::new(&a, &b).ratio()
}

/// Equal-weight blend of sequence ratio and token Jaccard, in `[0, 1]`.
/// Returns 0.0 when either side normalizes to nothing.
pub fn similarity(text_a: &str, text_b: &str) -> f64 {
    let a = normalize(text_a);
    let b = normalize(text_b);

    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let ratio = normalized_ratio(&a, &b);
    let jaccard = jaccard_similarity(&a, &b);

    ((ratio + jaccard) / 2.0).min(1.0)
}
