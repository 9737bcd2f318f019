//! Rank ordering for scored tasks.
//!
//! Highest score first. Equal scores keep their input order, so the ranking
//! is fully deterministic for a given batch.

use std::cmp::Ordering;

/// Sort key for ranking (lower = ranked earlier).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankKey {
    pub neg_score: f64,
    pub input_index: usize,
}

impl RankKey {
    pub fn new(score: f64, input_index: usize) -> Self {
        Self {
            neg_score: -score,
            input_index,
        }
    }
}

/// Compare f64 values for sorting, treating NaN as equal to everything.
fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

impl Eq for RankKey {}

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_f64(self.neg_score, other.neg_score).then(self.input_index.cmp(&other.input_index))
    }
}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Return positions into `scores` in rank order.
pub fn rank_order(scores: &[f64]) -> Vec<usize> {
    let mut keys: Vec<RankKey> = scores
        .iter()
        .enumerate()
        .map(|(index, &score)| RankKey::new(score, index))
        .collect();
    keys.sort();
    keys.into_iter().map(|k| k.input_index).collect()
}
