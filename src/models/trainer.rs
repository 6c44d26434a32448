use serde::{Deserialize, Serialize};

use crate::models::{OakError, Result, Tier};

/// A row of the ranked spreadsheet:
/// `[name, nickname, wins, losses, points, battles]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainerEntry {
    pub name: String,
    pub nickname: String,
    pub wins: String,
    pub losses: String,
    pub points: u32,
    pub battles: String,
}

impl TrainerEntry {
    pub const NICKNAME_INDEX: usize = 1;
    pub const SCORE_INDEX: usize = 4;

    /// Parse a raw sheet row. The battles column may be absent because the
    /// sheets API drops trailing empty cells.
    pub fn from_row(row: &[String]) -> Result<Self> {
        if row.len() <= Self::SCORE_INDEX {
            return Err(OakError::MalformedRow(format!(
                "ranked row has {} columns",
                row.len()
            )));
        }

        let points = row[Self::SCORE_INDEX]
            .trim()
            .parse::<u32>()
            .map_err(|_| OakError::FormatError(row[Self::SCORE_INDEX].clone()))?;

        Ok(Self {
            name: row[0].clone(),
            nickname: row[Self::NICKNAME_INDEX].clone(),
            wins: row[2].clone(),
            losses: row[3].clone(),
            points,
            battles: row.get(5).cloned().unwrap_or_default(),
        })
    }
}

/// Display row of the ranked leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaderboardRow {
    pub position: usize,
    pub nickname: String,
    pub wins: String,
    pub battles: String,
    pub points: u32,
    pub tier: Tier,
}

impl LeaderboardRow {
    pub const HEADERS: [&'static str; 6] = ["Pos", "Nick", "Wins", "Bts", "Pts", "Rank"];

    /// Cells in `HEADERS` order.
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.position.to_string(),
            self.nickname.clone(),
            self.wins.clone(),
            self.battles.clone(),
            self.points.to_string(),
            self.tier.to_string(),
        ]
    }
}

/// A row of the player database: `[name, discord, switch friend code, showdown]`.
/// Blank or missing contact cells are `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainerDbEntry {
    pub name: String,
    pub discord: Option<String>,
    pub switch_fc: Option<String>,
    pub showdown: Option<String>,
}

impl TrainerDbEntry {
    /// `None` for rows without a name.
    pub fn from_row(row: &[String]) -> Option<Self> {
        let cell = |index: usize| {
            row.get(index)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        Some(Self {
            name: cell(0)?,
            discord: cell(1),
            switch_fc: cell(2),
            showdown: cell(3),
        })
    }
}
