use super::common::*;
use crate::matching::ranking::{sort_results, TopK};
use crate::matching::{match_one, MatchingResult};

fn result(id: &str, score: f64, end: Option<(i32, u32, u32)>) -> MatchingResult {
    let mut announcement = announcement(id, Vec::new());
    announcement.application_end_date = end.map(|(y, m, d)| date(y, m, d));
    let mut result = match_one(&profile(), &announcement, &income_table(), &config());
    result.matching_score = score;
    result
}

fn ids(results: &[MatchingResult]) -> Vec<&str> {
    results
        .iter()
        .map(|result| result.announcement_id.0.as_str())
        .collect()
}

#[test]
fn sorts_by_score_then_end_date_then_id() {
    let mut results = vec![
        result("c", 50.0, Some((2024, 7, 1))),
        result("b", 50.0, Some((2024, 6, 15))),
        result("a", 50.0, Some((2024, 7, 1))),
        result("d", 80.0, None),
        result("e", 50.0, None),
    ];

    sort_results(&mut results);

    assert_eq!(ids(&results), vec!["d", "b", "a", "c", "e"]);
}

#[test]
fn top_k_keeps_best_results_in_order() {
    let mut top = TopK::new(Some(2));
    for (id, score) in [("a", 10.0), ("b", 90.0), ("c", 50.0), ("d", 70.0)] {
        top.push(result(id, score, Some((2024, 6, 20))));
    }

    assert_eq!(top.len(), 2);
    assert_eq!(ids(&top.into_sorted_vec()), vec!["b", "d"]);
}

#[test]
fn merged_collectors_respect_the_limit() {
    let mut left = TopK::new(Some(3));
    let mut right = TopK::new(Some(3));
    for (id, score) in [("a", 10.0), ("b", 40.0)] {
        left.push(result(id, score, None));
    }
    for (id, score) in [("c", 30.0), ("d", 20.0), ("e", 50.0)] {
        right.push(result(id, score, None));
    }

    let merged = left.merge(right).into_sorted_vec();

    assert_eq!(ids(&merged), vec!["e", "b", "c"]);
}

#[test]
fn zero_limit_collects_nothing() {
    let mut top = TopK::new(Some(0));
    top.push(result("a", 10.0, None));

    assert!(top.is_empty());
}
