use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque team identity as issued by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(String);

impl TeamId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TeamId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Point total exactly as the record store reported it.
///
/// Left unvalidated so that negative, fractional or non-numeric totals reach
/// the standings builder and get rejected there with the team they belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointValue(serde_json::Value);

impl PointValue {
    /// The total as a non-negative integer, if it is one.
    pub fn as_points(&self) -> Option<u64> {
        self.0.as_u64()
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.0.as_i64()
    }
}

impl Default for PointValue {
    fn default() -> Self {
        Self(serde_json::Value::from(0))
    }
}

impl From<i64> for PointValue {
    fn from(points: i64) -> Self {
        Self(serde_json::Value::from(points))
    }
}

impl From<serde_json::Value> for PointValue {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

impl fmt::Display for PointValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw team point-total handed to the ranking engine on every refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub id: TeamId,
    pub name: String,
    pub points: PointValue,
}

impl TeamRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, points: i64) -> Self {
        Self::with_points(id, name, PointValue::from(points))
    }

    pub fn with_points(id: impl Into<String>, name: impl Into<String>, points: PointValue) -> Self {
        Self {
            id: TeamId::new(id),
            name: name.into(),
            points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    pub team_id: TeamId,
    pub name: String,
    pub points: u64,
    /// 1-based competition rank; tied teams share it.
    pub rank: usize,
    pub previous_rank: Option<usize>,
    /// `previous_rank - rank`; positive means the team climbed.
    pub rank_delta: i64,
}

impl RankedEntry {
    pub fn is_new_entrant(&self) -> bool {
        self.previous_rank.is_none()
    }
}

/// One refresh cycle's immutable standings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub generation: u64,
    pub created_at: DateTime<Utc>,
    pub entries: Vec<RankedEntry>,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, team_id: &TeamId) -> Option<&RankedEntry> {
        self.entries.iter().find(|entry| &entry.team_id == team_id)
    }

    /// Teams holding rank 1, in display order.
    pub fn leaders(&self) -> impl Iterator<Item = &RankedEntry> {
        self.entries.iter().take_while(|entry| entry.rank == 1)
    }

    pub fn to_wire(&self) -> Vec<WireEntry> {
        self.entries.iter().map(WireEntry::from).collect()
    }
}

/// The only fields a display consumer gets to see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireEntry {
    pub team_id: TeamId,
    pub name: String,
    pub points: u64,
    pub rank: usize,
    pub rank_delta: i64,
}

impl From<&RankedEntry> for WireEntry {
    fn from(entry: &RankedEntry) -> Self {
        Self {
            team_id: entry.team_id.clone(),
            name: entry.name.clone(),
            points: entry.points,
            rank: entry.rank,
            rank_delta: entry.rank_delta,
        }
    }
}
