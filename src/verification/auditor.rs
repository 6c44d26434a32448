use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    models::{AuditEntry, FormSubmission, OakError, TrainerEntry},
    ranking::{classify, is_valid_matchup, Leaderboard},
    verification::{battle::BattleValidator, replay::ReplayFetcher},
};

/// Replays fetched at the same time during an audit.
const CONCURRENT_REPLAYS: usize = 4;

/// Walks the submission form and reports every problem it finds, row by row.
///
/// Row errors never abort the audit; an empty report means the whole batch
/// is valid.
pub struct FormAuditor {
    fetcher: Arc<dyn ReplayFetcher>,
    validator: BattleValidator,
    first_row: usize,
}

impl FormAuditor {
    pub fn new(fetcher: Arc<dyn ReplayFetcher>, validator: BattleValidator, first_row: usize) -> Self {
        Self {
            fetcher,
            validator,
            first_row,
        }
    }

    pub async fn audit(&self, rows: &[Vec<String>], leaderboard: &Leaderboard) -> Vec<AuditEntry> {
        info!("Auditing {} form rows", rows.len());

        let reports: Vec<Vec<AuditEntry>> = stream::iter(rows.iter().enumerate())
            .map(|(index, row)| self.audit_row(self.first_row + index, row, leaderboard))
            .buffered(CONCURRENT_REPLAYS)
            .collect()
            .await;

        let entries: Vec<AuditEntry> = reports.into_iter().flatten().collect();
        info!("Audit finished with {} problems", entries.len());
        entries
    }

    async fn audit_row(&self, line: usize, row: &[String], leaderboard: &Leaderboard) -> Vec<AuditEntry> {
        if row.iter().all(|cell| cell.trim().is_empty()) {
            return Vec::new();
        }

        let submission = match FormSubmission::from_row(row) {
            Ok(submission) => submission,
            Err(e) => {
                debug!("Row {} unreadable: {}", line, e);
                return vec![AuditEntry::new(line, e.to_string())];
            }
        };

        let mut entries = Vec::new();

        let winner = leaderboard.find(&submission.winner).map(|(_, entry)| entry);
        let loser = leaderboard.find(&submission.loser).map(|(_, entry)| entry);

        if let Some(message) = not_found_message(winner, loser) {
            entries.push(AuditEntry::new(line, message));
        }

        if let (Some(winner), Some(loser)) = (winner, loser) {
            let (winner_tier, loser_tier) = (classify(winner.points), classify(loser.points));
            if !is_valid_matchup(winner_tier, loser_tier) {
                let error = OakError::MatchupInvalid {
                    winner: winner_tier.to_string(),
                    loser: loser_tier.to_string(),
                };
                entries.push(AuditEntry::new(line, error.to_string()));
            }
        }

        match self.fetcher.fetch_record(&submission.replay_url).await {
            Ok(record) => {
                if let Err(e) = self.validator.validate(&submission.claim(), &record).into_result() {
                    entries.push(AuditEntry::new(line, e.to_string()));
                }
            }
            Err(e) => {
                warn!("Row {}: could not load replay {}: {}", line, submission.replay_url, e);
                entries.push(AuditEntry::new(line, format!("Could not load replay: {}", e)));
            }
        }

        entries
    }
}

fn not_found_message(winner: Option<&TrainerEntry>, loser: Option<&TrainerEntry>) -> Option<String> {
    let mut message = String::new();
    if winner.is_none() {
        message.push_str("Winner not found; ");
    }
    if loser.is_none() {
        message.push_str("Loser not found; ");
    }
    (!message.is_empty()).then_some(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::BattleRecord,
        verification::{battle::ValidationPolicy, replay::MockReplayFetcher},
    };
    use chrono::NaiveDateTime;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn leaderboard() -> Leaderboard {
        Leaderboard::from_rows(&[
            row(&["Ash Ketchum", "Ash", "10", "2", "520", "12"]),
            row(&["Gary Oak", "Gary", "8", "4", "480", "12"]),
            row(&["Joey", "Joey", "0", "5", "40", "5"]),
            row(&["Lance", "Lance", "30", "0", "1200", "30"]),
        ])
    }

    fn record(winner: &str, loser: &str) -> BattleRecord {
        BattleRecord {
            winner: winner.to_string(),
            loser: loser.to_string(),
            recorded_at: NaiveDateTime::parse_from_str("2020-05-21 10:00", "%Y-%m-%d %H:%M").unwrap(),
            format: "gen8ou".to_string(),
        }
    }

    fn auditor(fetcher: MockReplayFetcher) -> FormAuditor {
        FormAuditor::new(Arc::new(fetcher), BattleValidator::new(ValidationPolicy::default()), 2)
    }

    #[tokio::test]
    async fn test_valid_batch_is_empty() {
        let mut fetcher = MockReplayFetcher::new();
        fetcher
            .expect_fetch_record()
            .times(1)
            .returning(|_| Ok(record("Ash", "Gary")));

        let rows = vec![row(&["21/05/2020 12:00:00", "ash@x", "Ash", "Gary", "https://replay.pokemonshowdown.com/a"])];
        let report = auditor(fetcher).audit(&rows, &leaderboard()).await;
        assert!(report.is_empty(), "{:?}", report);
    }

    #[tokio::test]
    async fn test_row_numbers_start_after_header() {
        let mut fetcher = MockReplayFetcher::new();
        fetcher
            .expect_fetch_record()
            .returning(|_| Ok(record("Ash", "Gary")));

        let rows = vec![
            row(&["21/05/2020 12:00:00", "ash@x", "Ash", "Gary", "https://replay.pokemonshowdown.com/a"]),
            row(&["21/05/2020 12:00:00", "ash@x", "Ash", "Nobody", "https://replay.pokemonshowdown.com/b"]),
        ];
        let report = auditor(fetcher).audit(&rows, &leaderboard()).await;

        assert_eq!(report.len(), 2);
        assert_eq!(report[0], AuditEntry::new(3, "Loser not found; "));
        assert_eq!(report[1].row, 3);
        assert_eq!(report[1].message, "Loser is not valid;");
    }

    #[tokio::test]
    async fn test_invalid_matchup_is_reported() {
        let mut fetcher = MockReplayFetcher::new();
        fetcher
            .expect_fetch_record()
            .returning(|_| Ok(record("Lance", "Joey")));

        let rows = vec![row(&["21/05/2020 12:00:00", "l@x", "lance", "JOEY", "https://replay.pokemonshowdown.com/c"])];
        let report = auditor(fetcher).audit(&rows, &leaderboard()).await;

        assert_eq!(
            report,
            vec![AuditEntry::new(2, "Invalid elos matchup (Grand Master vs Straggler)")]
        );
    }

    #[tokio::test]
    async fn test_replay_failure_keeps_auditing() {
        let mut fetcher = MockReplayFetcher::new();
        fetcher.expect_fetch_record().returning(|url| {
            Err(OakError::InvalidReplaySource {
                url: url.to_string(),
                host: "replay.pokemonshowdown.com".to_string(),
            })
        });

        let rows = vec![
            row(&["21/05/2020 12:00:00", "x", "Ash", "Gary", "https://example.com/1"]),
            row(&["not a date", "x", "Ash", "Gary", "https://example.com/2"]),
            row(&["", "", "", "", ""]),
            row(&["21/05/2020 12:00:00", "x", "Ash"]),
        ];
        let report = auditor(fetcher).audit(&rows, &leaderboard()).await;

        assert_eq!(report.len(), 3);
        assert_eq!(report[0].row, 2);
        assert!(report[0].message.starts_with("Could not load replay: "));
        assert_eq!(report[1].row, 3);
        assert!(report[1].message.starts_with("Invalid format"));
        assert_eq!(report[2].row, 5);
        assert!(report[2].message.starts_with("Malformed row"));
    }
}
