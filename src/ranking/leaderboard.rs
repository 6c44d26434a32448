use tracing::debug;

use crate::{
    models::{LeaderboardRow, Result, Tier, TrainerEntry},
    ranking::classify,
    utils::{names_match, truncate_nickname},
};

/// Reshape a ranked entry into its display row at `position`.
pub fn build_row(entry: &TrainerEntry, position: usize) -> LeaderboardRow {
    LeaderboardRow {
        position,
        nickname: truncate_nickname(&entry.nickname),
        wins: entry.wins.clone(),
        battles: entry.battles.clone(),
        points: entry.points,
        tier: classify(entry.points),
    }
}

/// Same as [`build_row`], straight from a raw sheet row.
pub fn build_row_from_raw(raw: &[String], position: usize) -> Result<LeaderboardRow> {
    TrainerEntry::from_row(raw).map(|entry| build_row(&entry, position))
}

/// Ranked entries sorted by points, highest first.
#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    entries: Vec<TrainerEntry>,
}

impl Leaderboard {
    /// Build from raw sheet rows. Rows whose score does not parse (the
    /// header, blank lines, notes) are left out of the ranking.
    pub fn from_rows(rows: &[Vec<String>]) -> Self {
        let mut entries: Vec<TrainerEntry> = rows
            .iter()
            .filter_map(|row| match TrainerEntry::from_row(row) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!("Skipping ranked row {:?}: {}", row, e);
                    None
                }
            })
            .collect();

        entries.sort_by(|a, b| b.points.cmp(&a.points));

        Self { entries }
    }

    pub fn entries(&self) -> &[TrainerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look a trainer up by nickname, returning its 1-based position.
    pub fn find(&self, nickname: &str) -> Option<(usize, &TrainerEntry)> {
        self.entries
            .iter()
            .enumerate()
            .find(|(_, entry)| names_match(&entry.nickname, nickname))
            .map(|(i, entry)| (i + 1, entry))
    }

    pub fn top(&self, limit: usize) -> Vec<LeaderboardRow> {
        self.entries
            .iter()
            .take(limit)
            .enumerate()
            .map(|(i, entry)| build_row(entry, i + 1))
            .collect()
    }

    /// Rows in one tier, keeping their overall positions.
    pub fn by_tier(&self, tier: Tier, limit: usize) -> Vec<LeaderboardRow> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| classify(entry.points) == tier)
            .take(limit)
            .map(|(i, entry)| build_row(entry, i + 1))
            .collect()
    }
}
