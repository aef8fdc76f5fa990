use crate::domain::model::{RankedEntry, Snapshot};
use crate::utils::error::{LeaderboardError, Result};

const EMPTY_MESSAGE: &str = "No teams found. Check back later!";

pub fn render_table(snapshot: &Snapshot) -> String {
    let mut out = format!(
        "Last updated: {} (generation {})\n",
        snapshot.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        snapshot.generation
    );

    if snapshot.is_empty() {
        out.push_str(EMPTY_MESSAGE);
        out.push('\n');
        return out;
    }

    let name_width = snapshot
        .entries
        .iter()
        .map(|entry| entry.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Team".len());

    out.push_str(&table_row("Rank", "Move", "Team", "Points", name_width));
    for entry in &snapshot.entries {
        out.push_str(&table_row(
            &entry.rank.to_string(),
            &movement(entry),
            &entry.name,
            &entry.points.to_string(),
            name_width,
        ));
    }

    out
}

fn table_row(rank: &str, movement: &str, name: &str, points: &str, name_width: usize) -> String {
    format!(
        "{:>4}  {:<6}  {:<width$}  {:>8}\n",
        rank,
        movement,
        name,
        points,
        width = name_width
    )
}

/// Wire representation, pretty-printed.
pub fn render_json(snapshot: &Snapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(&snapshot.to_wire())?)
}

/// One-line notice shown above stale standings after a failed refresh.
pub fn render_banner(error: &LeaderboardError) -> String {
    format!(
        "!! Showing last known standings. {}",
        error.user_friendly_message()
    )
}

fn movement(entry: &RankedEntry) -> String {
    match entry.rank_delta {
        0 if entry.is_new_entrant() => "new".to_string(),
        0 => String::new(),
        delta if delta > 0 => format!("▲{}", delta),
        delta => format!("▼{}", delta.unsigned_abs()),
    }
}
