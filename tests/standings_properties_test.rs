use leaderboard::{build, build_at, LeaderboardError, Snapshot, TeamId, TeamRecord};
use chrono::{TimeZone, Utc};

fn names_and_ranks(snapshot: &Snapshot) -> Vec<(String, usize)> {
    snapshot
        .entries
        .iter()
        .map(|e| (e.name.clone(), e.rank))
        .collect()
}

#[test]
fn test_dense_ranking_example() {
    let records = vec![
        TeamRecord::new("a", "A", 50),
        TeamRecord::new("b", "B", 50),
        TeamRecord::new("c", "C", 30),
    ];

    let snapshot = build(&records, None).unwrap();

    assert_eq!(
        names_and_ranks(&snapshot),
        vec![("A".into(), 1), ("B".into(), 1), ("C".into(), 3)]
    );
}

#[test]
fn test_tie_break_by_name() {
    let records = vec![
        TeamRecord::new("1", "Bravo", 50),
        TeamRecord::new("2", "Alpha", 50),
    ];

    let snapshot = build(&records, None).unwrap();

    assert_eq!(
        names_and_ranks(&snapshot),
        vec![("Alpha".into(), 1), ("Bravo".into(), 1)]
    );
}

#[test]
fn test_rank_equals_one_plus_strictly_greater_count() {
    let points = [90, 40, 40, 75, 0, 40, 90, 12, 0, 75];
    let records: Vec<TeamRecord> = points
        .iter()
        .enumerate()
        .map(|(i, p)| TeamRecord::new(format!("id{}", i), format!("Team {}", i), *p))
        .collect();

    let snapshot = build(&records, None).unwrap();

    for entry in &snapshot.entries {
        let greater = snapshot
            .entries
            .iter()
            .filter(|other| other.points > entry.points)
            .count();
        assert_eq!(entry.rank, greater + 1, "team {}", entry.name);
    }
    assert!(snapshot
        .entries
        .windows(2)
        .all(|pair| pair[0].rank <= pair[1].rank));
}

#[test]
fn test_repeated_builds_are_identical() {
    let at = Utc.with_ymd_and_hms(2024, 5, 4, 10, 0, 0).unwrap();
    let records = vec![
        TeamRecord::new("x", "Xray", 3),
        TeamRecord::new("y", "Yankee", 3),
        TeamRecord::new("z", "Zulu", 8),
    ];

    let runs: Vec<Snapshot> = (0..5).map(|_| build_at(&records, None, at).unwrap()).collect();

    assert!(runs.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn test_swapped_points_give_opposite_deltas() {
    let previous = build(
        &[TeamRecord::new("a", "A", 2), TeamRecord::new("b", "B", 1)],
        None,
    )
    .unwrap();

    let current = build(
        &[TeamRecord::new("a", "A", 1), TeamRecord::new("b", "B", 2)],
        Some(&previous),
    )
    .unwrap();

    assert_eq!(current.entry(&TeamId::new("a")).unwrap().rank_delta, -1);
    assert_eq!(current.entry(&TeamId::new("b")).unwrap().rank_delta, 1);
}

#[test]
fn test_team_dropping_out_does_not_affect_others_identity() {
    let previous = build(
        &[
            TeamRecord::new("a", "A", 30),
            TeamRecord::new("b", "B", 20),
            TeamRecord::new("c", "C", 10),
        ],
        None,
    )
    .unwrap();

    let current = build(
        &[TeamRecord::new("b", "B", 20), TeamRecord::new("c", "C", 10)],
        Some(&previous),
    )
    .unwrap();

    let b = current.entry(&TeamId::new("b")).unwrap();
    assert_eq!((b.rank, b.previous_rank, b.rank_delta), (1, Some(2), 1));
    assert!(current.entry(&TeamId::new("a")).is_none());
}

#[test]
fn test_malformed_batches_are_rejected_whole() {
    let negative = build(
        &[TeamRecord::new("a", "A", 1), TeamRecord::new("b", "B", -10)],
        None,
    );
    assert!(matches!(negative, Err(LeaderboardError::InvalidRecord { .. })));

    let duplicate = build(
        &[TeamRecord::new("a", "A", 1), TeamRecord::new("a", "B", 2)],
        None,
    );
    assert!(matches!(
        duplicate,
        Err(LeaderboardError::DuplicateTeamId { .. })
    ));
}
