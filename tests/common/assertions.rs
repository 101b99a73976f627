//! Assertion helpers for tests.

use pretty_assertions::assert_eq;
use std::collections::BTreeSet;

use dyematch::Match;

/// Assert a closest-match result hit the expected dye
pub fn assert_match_id(result: &Option<Match>, expected: i64) {
    match result {
        Some(m) => assert_eq!(
            m.dye.id, expected,
            "Expected dye {expected}, got {} ({}) at distance {}",
            m.dye.id, m.dye.name, m.distance
        ),
        None => panic!("Expected dye {expected}, got no match"),
    }
}

/// Assert matches are ordered closest first
pub fn assert_sorted_ascending(matches: &[Match]) {
    for pair in matches.windows(2) {
        assert!(
            pair[0].distance <= pair[1].distance,
            "Results out of order: {} ({}) before {} ({})",
            pair[0].dye.name,
            pair[0].distance,
            pair[1].dye.name,
            pair[1].distance
        );
    }
}

/// Ids of a result list as a set
pub fn id_set(matches: &[Match]) -> BTreeSet<i64> {
    matches.iter().map(|m| m.dye.id).collect()
}

/// Assert a result list contains exactly the given ids, in any order
pub fn assert_ids(matches: &[Match], expected: &[i64]) {
    let expected: BTreeSet<i64> = expected.iter().copied().collect();
    assert_eq!(id_set(matches), expected);
}
