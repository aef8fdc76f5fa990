use crate::domain::model::{RankedEntry, Snapshot, TeamId, TeamRecord};
use crate::utils::error::{LeaderboardError, Result};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Builds ranked standings stamped with the current time.
pub fn build(records: &[TeamRecord], previous: Option<&Snapshot>) -> Result<Snapshot> {
    build_at(records, previous, Utc::now())
}

/// Pure standings construction.
///
/// Order is points descending, then team name, then team id. Ranks follow
/// standard competition ranking (`1, 1, 3, 4`): a team's rank is one plus the
/// number of teams with strictly more points. Deltas are taken against
/// `previous` by team id; a team missing from `previous` gets no previous rank
/// and a zero delta.
///
/// Any malformed record rejects the whole batch.
pub fn build_at(
    records: &[TeamRecord],
    previous: Option<&Snapshot>,
    created_at: DateTime<Utc>,
) -> Result<Snapshot> {
    let mut ordered = validate(records)?;
    ordered.sort_by(standings_order);

    let previous_ranks: HashMap<&TeamId, usize> = previous
        .map(|snapshot| {
            snapshot
                .entries
                .iter()
                .map(|entry| (&entry.team_id, entry.rank))
                .collect()
        })
        .unwrap_or_default();

    let mut entries = Vec::with_capacity(ordered.len());
    let mut rank = 0usize;
    let mut last_points = None;

    for (index, candidate) in ordered.iter().enumerate() {
        if last_points != Some(candidate.points) {
            rank = index + 1;
            last_points = Some(candidate.points);
        }

        let previous_rank = previous_ranks.get(&candidate.record.id).copied();
        let rank_delta = previous_rank
            .map(|prev| rank_change(prev, rank))
            .unwrap_or(0);

        entries.push(RankedEntry {
            team_id: candidate.record.id.clone(),
            name: candidate.record.name.clone(),
            points: candidate.points,
            rank,
            previous_rank,
            rank_delta,
        });
    }

    let generation = previous.map_or(1, |snapshot| snapshot.generation + 1);

    tracing::debug!(
        "Built standings generation {} with {} teams",
        generation,
        entries.len()
    );

    Ok(Snapshot {
        generation,
        created_at,
        entries,
    })
}

struct Candidate<'a> {
    record: &'a TeamRecord,
    points: u64,
}

fn validate(records: &[TeamRecord]) -> Result<Vec<Candidate<'_>>> {
    let mut seen: HashSet<&TeamId> = HashSet::with_capacity(records.len());
    let mut candidates = Vec::with_capacity(records.len());

    for record in records {
        let points = record
            .points
            .as_points()
            .ok_or_else(|| LeaderboardError::InvalidRecord {
                team_id: record.id.to_string(),
                reason: format!("points must be a non-negative integer, got {}", record.points),
            })?;

        if record.name.trim().is_empty() {
            return Err(LeaderboardError::InvalidRecord {
                team_id: record.id.to_string(),
                reason: "team name is empty".to_string(),
            });
        }

        if !seen.insert(&record.id) {
            return Err(LeaderboardError::DuplicateTeamId {
                team_id: record.id.to_string(),
            });
        }

        candidates.push(Candidate { record, points });
    }

    Ok(candidates)
}

fn standings_order(a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| a.record.name.cmp(&b.record.name))
        .then_with(|| a.record.id.cmp(&b.record.id))
}

// Ranks are bounded by a Vec length, which never exceeds isize::MAX, so the
// conversion is lossless.
fn rank_change(previous: usize, current: usize) -> i64 {
    previous as i64 - current as i64
}
