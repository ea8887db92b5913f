use super::*;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn id(n: u64) -> CompetitorId {
    CompetitorId(n)
}

fn competitor(n: u64, score: i64) -> Competitor {
    Competitor::new(id(n), format!("P{n}"), score)
}

fn played(a: u64, b: u64, winner: u64) -> MatchRecord {
    MatchRecord::new(id(a), id(b), id(winner), Utc::now()).unwrap()
}

fn scenario_pool() -> Vec<Competitor> {
    vec![competitor(1, 0), competitor(2, 1), competitor(3, 5)]
}

#[test]
fn test_tiny_pools_produce_nothing() {
    let mut rng = StdRng::seed_from_u64(7);
    assert!(generate_round_with(&[], &[], Margin::default(), &mut rng).is_empty());
    assert!(generate_round_with(&[competitor(1, 0)], &[], Margin::default(), &mut rng).is_empty());
    assert!(generate_round_sorted(&[competitor(1, 0)], &[], Margin::default()).is_empty());
}

#[test]
fn test_scenario_pairs_one_and_two() {
    let pool = scenario_pool();
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let round = generate_round_with(&pool, &[], Margin::new(1), &mut rng);
        assert_eq!(round.len(), 1, "seed {seed}");
        let (a, b) = round[0].ids();
        let mut ids = [a.0, b.0];
        ids.sort();
        assert_eq!(ids, [1, 2]);
        assert_eq!(round[0].score_difference, 1);

        let left = unpaired(&pool, &round);
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].id, id(3));
    }
}

#[test]
fn test_scenario_queries() {
    let pool = scenario_pool();
    assert!(has_any_possible_pairing(&pool, &[], Margin::new(1)));

    let stats = pairing_stats(&pool, &[], Margin::new(1));
    assert_eq!(stats.total_competitors, 3);
    assert_eq!(stats.competitors_with_opponents, 2);
    assert_eq!(stats.possible_pairs, 2);
    assert!((stats.average_score_difference - 1.0).abs() < 1e-9);
}

#[test]
fn test_stats_on_empty_pool() {
    let stats = pairing_stats(&[], &[], Margin::new(1));
    assert_eq!(stats, PairingStats::default());
    assert!(!has_any_possible_pairing(&[], &[], Margin::new(1)));
}

#[test]
fn test_same_seed_same_round() {
    let pool: Vec<Competitor> = (1..=12).map(|n| competitor(n, (n % 4) as i64)).collect();
    let first = generate_round_with(&pool, &[], Margin::new(1), &mut StdRng::seed_from_u64(99));
    let second = generate_round_with(&pool, &[], Margin::new(1), &mut StdRng::seed_from_u64(99));
    assert_eq!(first, second);
}

#[test]
fn test_sorted_round_pairs_strongest_first() {
    let pool = vec![
        competitor(1, 1),
        competitor(2, 8),
        competitor(3, 2),
        competitor(4, 9),
    ];
    let round = generate_round_sorted(&pool, &[], Margin::new(1));
    assert_eq!(round.len(), 2);
    assert_eq!(round[0].ids(), (id(4), id(2)));
    assert_eq!(round[1].ids(), (id(3), id(1)));
    assert_eq!(round, generate_round_sorted(&pool, &[], Margin::new(1)));
}

#[test]
fn test_greedy_can_leave_pairable_competitors_out() {
    // 1-3 and 2-4 would pair everyone, but 1 takes 2 first and 3 has swept 4.
    let pool = vec![
        competitor(1, 2),
        competitor(2, 2),
        competitor(3, 1),
        competitor(4, 1),
    ];
    let history = vec![played(3, 4, 3), played(3, 4, 3), played(4, 3, 3)];
    let round = generate_round_sorted(&pool, &history, Margin::new(1));
    assert_eq!(round.len(), 1);
    assert_eq!(round[0].ids(), (id(1), id(2)));
    assert_eq!(unpaired(&pool, &round).len(), 2);
}

#[test]
fn test_sweep_history_blocks_only_pair() {
    let pool = vec![competitor(1, 0), competitor(2, 0)];
    let history = vec![played(1, 2, 1), played(1, 2, 1), played(2, 1, 1)];
    assert!(generate_round_sorted(&pool, &history, Margin::new(5)).is_empty());
    assert!(!has_any_possible_pairing(&pool, &history, Margin::new(5)));
}

#[test]
fn test_decider_history_allows_pair() {
    let pool = vec![competitor(1, 0), competitor(2, 0)];
    let history = vec![played(1, 2, 1), played(1, 2, 2), played(2, 1, 1)];
    assert_eq!(generate_round_sorted(&pool, &history, Margin::new(0)).len(), 1);
}

#[test]
fn test_stats_double_count_each_pair() {
    let pool = vec![competitor(1, 0), competitor(2, 1), competitor(3, 2)];
    let stats = pairing_stats(&pool, &[], Margin::new(2));
    // (1,2)=1 (1,3)=2 (2,3)=1, each seen from both sides
    assert_eq!(stats.possible_pairs, 6);
    assert_eq!(stats.competitors_with_opponents, 3);
    assert!((stats.average_score_difference - 8.0 / 6.0).abs() < 1e-9);
}

#[test]
fn test_shuffle_changes_who_sits_out() {
    // 2 can play either neighbour; whoever is visited first between 1 and 3 decides.
    let pool = vec![competitor(1, 0), competitor(2, 1), competitor(3, 2)];
    let mut left_out = HashSet::new();
    for seed in 0..64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let round = generate_round_with(&pool, &[], Margin::new(1), &mut rng);
        assert_eq!(round.len(), 1, "seed {seed}");
        assert!(round[0].contains(id(2)), "seed {seed}");
        for c in unpaired(&pool, &round) {
            left_out.insert(c.id);
        }
    }
    assert_eq!(left_out, HashSet::from([id(1), id(3)]));
}

#[test]
fn test_generate_round_uses_thread_rng() {
    let pool = scenario_pool();
    let round = generate_round(&pool, &[], Margin::new(1));
    assert_eq!(round.len(), 1);
    assert!(round[0].contains(id(1)));
    assert!(round[0].contains(id(2)));
    assert!(generate_round(&pool[..1], &[], Margin::new(1)).is_empty());
}

#[test]
fn test_stats_at_score_extremes() {
    let pool = vec![competitor(1, i64::MIN), competitor(2, i64::MAX)];
    let stats = pairing_stats(&pool, &[], Margin::new(u64::MAX));
    assert_eq!(stats.possible_pairs, 2);
    assert_eq!(stats.competitors_with_opponents, 2);
    let expected = u64::MAX as f64;
    assert!((stats.average_score_difference - expected).abs() / expected < 1e-9);
}
