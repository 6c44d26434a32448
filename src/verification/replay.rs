use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    config::ReplaySettings,
    models::{BattleRecord, OakError, Result},
    services::HttpClient,
    utils::names_match,
};

const WIN_MARKER: &str = "|win|";

/// Source of ground-truth battle records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReplayFetcher: Send + Sync {
    async fn fetch_record(&self, url: &str) -> Result<BattleRecord>;
}

/// Metadata document served next to every hosted replay.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayPayload {
    pub log: String,
    pub p1: String,
    pub p2: String,
    pub uploadtime: i64,
    pub format: String,
}

/// Check that `url` points at `host` and return the metadata URL for it.
pub fn replay_metadata_url(url: &str, host: &str) -> Result<String> {
    let invalid = || OakError::InvalidReplaySource {
        url: url.to_string(),
        host: host.to_string(),
    };

    let mut parsed = Url::parse(url.trim()).map_err(|_| invalid())?;
    if parsed.host_str() != Some(host) {
        return Err(invalid());
    }

    // Perspective links such as `?p2` point at the same replay.
    parsed.set_query(None);
    parsed.set_fragment(None);

    let mut path = parsed.path().trim_end_matches('/').to_string();
    if !path.ends_with(".json") {
        path.push_str(".json");
    }
    parsed.set_path(&path);
    Ok(parsed.to_string())
}

/// Name that follows the win marker, up to the end of its line.
pub fn extract_winner(log: &str) -> Option<&str> {
    let start = log.find(WIN_MARKER)? + WIN_MARKER.len();
    let rest = &log[start..];
    let end = rest.find('\n').unwrap_or(rest.len());
    let winner = rest[..end].trim();
    (!winner.is_empty()).then_some(winner)
}

pub fn parse_replay(payload: &ReplayPayload, offset: FixedOffset) -> Result<BattleRecord> {
    let winner = extract_winner(&payload.log)
        .ok_or_else(|| OakError::MalformedReplay("log has no winner line".to_string()))?
        .to_string();

    let loser = if names_match(&payload.p2, &winner) {
        payload.p1.clone()
    } else {
        payload.p2.clone()
    };

    let uploaded = DateTime::<Utc>::from_timestamp(payload.uploadtime, 0).ok_or_else(|| {
        OakError::MalformedReplay(format!("upload time {} out of range", payload.uploadtime))
    })?;

    Ok(BattleRecord {
        winner,
        loser,
        recorded_at: uploaded.with_timezone(&offset).naive_local(),
        format: payload.format.clone(),
    })
}

/// Replay client for the public battle simulator's replay host.
pub struct ShowdownReplayClient {
    http: HttpClient,
    host: String,
    offset: FixedOffset,
}

impl ShowdownReplayClient {
    pub fn new(http: HttpClient, settings: &ReplaySettings) -> Result<Self> {
        let offset = FixedOffset::east_opt(settings.utc_offset_hours * 3600).ok_or_else(|| {
            OakError::ConfigError(format!(
                "Invalid UTC offset: {} hours",
                settings.utc_offset_hours
            ))
        })?;

        Ok(Self {
            http,
            host: settings.host.clone(),
            offset,
        })
    }
}

#[async_trait]
impl ReplayFetcher for ShowdownReplayClient {
    async fn fetch_record(&self, url: &str) -> Result<BattleRecord> {
        let metadata_url = replay_metadata_url(url, &self.host)?;

        let response = self
            .http
            .get(&metadata_url)
            .await
            .map_err(|e| OakError::ReplayFetchError(e.to_string()))?;

        if !response.status().is_success() {
            debug!("{} answered {}", metadata_url, response.status());
            return Err(OakError::ReplayFetchError(format!(
                "{} answered {}",
                metadata_url,
                response.status()
            )));
        }

        let payload: ReplayPayload = response
            .json()
            .await
            .map_err(|e| OakError::MalformedReplay(e.to_string()))?;

        let record = parse_replay(&payload, self.offset)?;
        info!("Loaded replay {}: {} beat {}", url, record.winner, record.loser);
        Ok(record)
    }
}
