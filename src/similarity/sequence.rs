//! Gestalt pattern matching ("longest matching block" alignment).
//!
//! Finds the longest contiguous matching block, then recurses into the
//! unmatched regions on either side. The ratio `2·M / T` is the classic
//! diff-style similarity measure, where `M` counts matched elements and
//! `T` is the combined length of both sequences.

use std::collections::HashMap;

/// Second sequences at least this long get popular elements pruned from
/// the match index.
const AUTOJUNK_MIN_LEN: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchBlock {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

pub struct SequenceMatcher<'s, T> {
    a: &'s [T],
    b: &'s [T],
    b2j: HashMap<&'s T, Vec<usize>>,
}

impl<'s, T> SequenceMatcher<'s, T>
where
    T: Eq + std::hash::Hash,
{
    pub fn new(a: &'s [T], b: &'s [T]) -> Self {
        let mut b2j: HashMap<&T, Vec<usize>> = HashMap::new();
        for (j, elt) in b.iter().enumerate() {
            b2j.entry(elt).or_default().push(j);
        }

        let n = b.len();
        if n >= AUTOJUNK_MIN_LEN {
            let ntest = n / 100 + 1;
            b2j.retain(|_, indices| indices.len() <= ntest);
        }

        Self { a, b, b2j }
    }

    /// Longest block with `a[i..i+size] == b[j..j+size]` inside the given
    /// ranges. Earliest in `a` wins, then earliest in `b`.
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> MatchBlock {
        let (a, b) = (self.a, self.b);
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0usize);

        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for (i, elt) in a.iter().enumerate().take(ahi).skip(alo) {
            let mut next_j2len = HashMap::new();
            if let Some(indices) = self.b2j.get(elt) {
                for &j in indices {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let prev = if j == 0 {
                        0
                    } else {
                        j2len.get(&(j - 1)).copied().unwrap_or(0)
                    };
                    let k = prev + 1;
                    next_j2len.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            j2len = next_j2len;
        }

        // Pruned elements never seed a match but may still extend one.
        while best_i > alo && best_j > blo && a[best_i - 1] == b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && a[best_i + best_size] == b[best_j + best_size]
        {
            best_size += 1;
        }

        MatchBlock {
            a: best_i,
            b: best_j,
            size: best_size,
        }
    }

    /// Non-overlapping matching blocks, sorted by position.
    pub fn matching_blocks(&self) -> Vec<MatchBlock> {
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let block = self.find_longest_match(alo, ahi, blo, bhi);
            if block.size == 0 {
                continue;
            }
            if alo < block.a && blo < block.b {
                queue.push((alo, block.a, blo, block.b));
            }
            if block.a + block.size < ahi && block.b + block.size < bhi {
                queue.push((block.a + block.size, ahi, block.b + block.size, bhi));
            }
            blocks.push(block);
        }

        blocks.sort_by_key(|block| (block.a, block.b));
        blocks
    }

    pub fn ratio(&self) -> f64 {
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        let matched: usize = self.matching_blocks().iter().map(|block| block.size).sum();
        2.0 * matched as f64 / total as f64
    }
}

/// Sequence ratio of two strings compared character by character.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    SequenceMatcher::new(&a, &b).ratio()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn identical_strings_have_ratio_one() {
        assert_eq!(sequence_ratio("abcd", "abcd"), 1.0);
    }

    #[test]
    fn empty_pair_has_ratio_one() {
        assert_eq!(sequence_ratio("", ""), 1.0);
    }

    #[test]
    fn one_empty_side_has_ratio_zero() {
        assert_eq!(sequence_ratio("abc", ""), 0.0);
        assert_eq!(sequence_ratio("", "abc"), 0.0);
    }

    #[test]
    fn disjoint_strings_have_ratio_zero() {
        assert_eq!(sequence_ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn classic_abcd_bcde_vector() {
        // matched block "bcd": 2 * 3 / 8
        assert!((sequence_ratio("abcd", "bcde") - 0.75).abs() < 1e-12);
    }

    #[test]
    fn longest_match_prefers_earliest_block() {
        let a = chars(" abcd");
        let b = chars("abcd abcd");
        let matcher = SequenceMatcher::new(&a, &b);
        let block = matcher.find_longest_match(0, 5, 0, 9);
        assert_eq!(block, MatchBlock { a: 0, b: 4, size: 5 });
    }

    #[test]
    fn matching_blocks_cover_both_sides_of_first_match() {
        let a = chars("qabxcd");
        let b = chars("abycdf");
        let matcher = SequenceMatcher::new(&a, &b);
        let blocks = matcher.matching_blocks();
        assert_eq!(
            blocks,
            vec![
                MatchBlock { a: 1, b: 0, size: 2 },
                MatchBlock { a: 4, b: 3, size: 2 },
            ]
        );
        assert!((matcher.ratio() - 8.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn popular_elements_are_pruned_for_long_second_sequence() {
        // 'x' appears 200 times in b, well above 200 / 100 + 1.
        let a = chars("yx");
        let b: Vec<char> = std::iter::repeat('x').take(200).collect();
        assert_eq!(SequenceMatcher::new(&a, &b).ratio(), 0.0);

        let short_b: Vec<char> = std::iter::repeat('x').take(199).collect();
        assert!((SequenceMatcher::new(&a, &short_b).ratio() - 2.0 / 201.0).abs() < 1e-12);
    }

    #[test]
    fn pruned_elements_still_extend_a_match() {
        let mut b: Vec<char> = std::iter::repeat('x').take(199).collect();
        b.push('y');
        let a = chars("xy");
        let block = SequenceMatcher::new(&a, &b).find_longest_match(0, 2, 0, 200);
        assert_eq!(block, MatchBlock { a: 0, b: 198, size: 2 });
    }
}
