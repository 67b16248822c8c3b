use std::cmp::Ordering;
use std::collections::BinaryHeap;

use chrono::NaiveDate;

use super::matcher::MatchingResult;

/// Ranking order: higher score first, then earlier application end date (undated last),
/// then announcement id.
pub fn compare_results(lhs: &MatchingResult, rhs: &MatchingResult) -> Ordering {
    rhs.matching_score
        .total_cmp(&lhs.matching_score)
        .then_with(|| compare_end_dates(lhs.application_end_date, rhs.application_end_date))
        .then_with(|| lhs.announcement_id.cmp(&rhs.announcement_id))
}

fn compare_end_dates(lhs: Option<NaiveDate>, rhs: Option<NaiveDate>) -> Ordering {
    match (lhs, rhs) {
        (Some(lhs), Some(rhs)) => lhs.cmp(&rhs),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn sort_results(results: &mut [MatchingResult]) {
    results.sort_by(compare_results);
}

/// Heap entry ordered so the worst-ranked result sits on top.
struct Ranked(MatchingResult);

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_results(&self.0, &other.0)
    }
}

/// Bounded collector keeping the best `limit` results seen so far.
pub struct TopK {
    limit: Option<usize>,
    heap: BinaryHeap<Ranked>,
}

impl TopK {
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            limit,
            heap: BinaryHeap::new(),
        }
    }

    pub fn push(&mut self, result: MatchingResult) {
        match self.limit {
            Some(0) => {}
            Some(limit) if self.heap.len() >= limit => {
                let candidate = Ranked(result);
                if self.heap.peek().is_some_and(|worst| candidate < *worst) {
                    self.heap.pop();
                    self.heap.push(candidate);
                }
            }
            _ => self.heap.push(Ranked(result)),
        }
    }

    pub fn merge(mut self, other: TopK) -> TopK {
        for Ranked(result) in other.heap {
            self.push(result);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Best first.
    pub fn into_sorted_vec(self) -> Vec<MatchingResult> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Ranked(result)| result)
            .collect()
    }
}
