use super::*;
use chrono::{Duration, TimeZone};

fn id(n: u64) -> CompetitorId {
    CompetitorId(n)
}

fn competitor(n: u64, name: &str, score: i64) -> Competitor {
    Competitor::new(id(n), name, score)
}

fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap() + Duration::minutes(minutes)
}

fn played(a: u64, b: u64, winner: u64, minutes: i64) -> MatchRecord {
    MatchRecord::new(id(a), id(b), id(winner), at(minutes)).unwrap()
}

fn names(list: &[&Competitor]) -> Vec<String> {
    list.iter().map(|c| c.name.clone()).collect()
}

#[test]
fn test_fresh_neighbours_are_eligible() {
    let pool = vec![competitor(1, "A", 5), competitor(2, "B", 6)];
    let found = eligible_opponents(&pool[1], &pool, &[], Margin::new(1)).unwrap();
    assert_eq!(names(&found), vec!["A"]);
}

#[test]
fn test_excludes_self_and_out_of_margin() {
    let pool = vec![
        competitor(1, "A", 5),
        competitor(2, "B", 7),
        competitor(3, "C", 4),
    ];
    let found = eligible_opponents(&pool[0], &pool, &[], Margin::new(1)).unwrap();
    assert_eq!(names(&found), vec!["C"]);

    let wide = eligible_opponents(&pool[0], &pool, &[], Margin::new(2)).unwrap();
    assert_eq!(names(&wide), vec!["C", "B"]);
}

#[test]
fn test_zero_margin_requires_equal_scores() {
    let pool = vec![competitor(1, "A", 3), competitor(2, "B", 3), competitor(3, "C", 4)];
    let found = eligible_opponents(&pool[0], &pool, &[], Margin::new(0)).unwrap();
    assert_eq!(names(&found), vec!["B"]);
}

#[test]
fn test_orders_by_difference_then_meetings_then_name() {
    let pool = vec![
        competitor(1, "Me", 10),
        competitor(2, "Zed", 10),
        competitor(3, "Amy", 11),
        competitor(4, "Bea", 9),
        competitor(5, "Cal", 10),
    ];
    // Zed met us once, Cal never; Amy and Bea share difference 1 and tie on meetings
    let history = vec![played(1, 2, 1, 0)];
    let found = eligible_opponents(&pool[0], &pool, &history, Margin::new(1)).unwrap();
    assert_eq!(names(&found), vec!["Cal", "Zed", "Amy", "Bea"]);
}

#[test]
fn test_repeat_limit_filters_candidates() {
    let pool = vec![competitor(1, "A", 0), competitor(2, "B", 0), competitor(3, "C", 1)];
    let history = vec![played(1, 2, 1, 0), played(1, 2, 1, 1), played(2, 1, 1, 2)];
    let found = eligible_opponents(&pool[0], &pool, &history, Margin::new(1)).unwrap();
    assert_eq!(names(&found), vec!["C"]);
}

#[test]
fn test_best_opponent() {
    let pool = vec![competitor(1, "A", 0), competitor(2, "B", 1), competitor(3, "C", 0)];
    let best = best_opponent(&pool[0], &pool, &[], Margin::new(1)).unwrap().unwrap();
    assert_eq!(best.name, "C");

    let lonely = vec![competitor(1, "A", 0), competitor(2, "B", 9)];
    assert!(best_opponent(&lonely[0], &lonely, &[], Margin::new(1)).unwrap().is_none());
}

#[test]
fn test_recommendations_carry_metadata() {
    let pool = vec![competitor(1, "A", 2), competitor(2, "B", 2), competitor(3, "C", 3)];
    let history = vec![played(1, 2, 2, 3), played(2, 1, 1, 8)];
    let recs = recommend_opponents(id(1), &pool, &history, Margin::new(1), 5).unwrap();

    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].opponent.name, "B");
    assert_eq!(recs[0].score_difference, 0);
    assert_eq!(recs[0].previous_matches, 2);
    assert_eq!(recs[0].last_played, Some(at(8)));
    assert_eq!(recs[1].opponent.name, "C");
    assert_eq!(recs[1].previous_matches, 0);
    assert_eq!(recs[1].last_played, None);
}

#[test]
fn test_recommendations_respect_limit() {
    let pool: Vec<Competitor> = (1..=6).map(|n| competitor(n, &format!("P{n}"), 0)).collect();
    let recs = recommend_opponents(id(1), &pool, &[], Margin::new(1), 3).unwrap();
    assert_eq!(recs.len(), 3);
}

#[test]
fn test_recommendations_unknown_competitor_fails() {
    let pool = vec![competitor(1, "A", 0)];
    let err = recommend_opponents(id(42), &pool, &[], Margin::new(1), 3).unwrap_err();
    assert_eq!(err, PairingError::CompetitorNotFound(id(42)));
}

#[test]
fn test_queries_for_competitor_outside_pool_fail() {
    let pool = vec![competitor(1, "A", 0), competitor(2, "B", 1)];
    let stranger = competitor(99, "Z", 0);

    assert_eq!(
        best_opponent(&stranger, &pool, &[], Margin::new(1)),
        Err(PairingError::CompetitorNotFound(id(99)))
    );
    assert_eq!(
        eligible_opponents(&stranger, &pool, &[], Margin::new(1)),
        Err(PairingError::CompetitorNotFound(id(99)))
    );
}
