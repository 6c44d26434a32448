use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::{
    config::RankedSettings,
    models::{OakError, Result, TrainerDbEntry},
    ranking::Leaderboard,
    services::http::HttpClient,
};

/// Read-only access to spreadsheet ranges.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Rows of the given A1 range; trailing empty cells may be missing.
    async fn fetch_range(&self, spreadsheet_id: &str, range: &str) -> Result<Vec<Vec<String>>>;
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// Google Sheets v4 `values.get` over plain REST.
pub struct GoogleSheetsClient {
    http: HttpClient,
    base_url: String,
    api_key: Option<String>,
    access_token: Option<String>,
}

impl GoogleSheetsClient {
    pub fn new(http: HttpClient, settings: &RankedSettings) -> Self {
        Self {
            http,
            base_url: settings.sheets_api_url.clone(),
            api_key: settings.api_key.clone(),
            access_token: settings.access_token.clone(),
        }
    }

    fn values_url(&self, spreadsheet_id: &str, range: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| OakError::ConfigError(format!("Invalid sheets URL: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| OakError::ConfigError("Sheets URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push(spreadsheet_id)
            .push("values")
            .push(range);

        if let Some(key) = &self.api_key {
            url.query_pairs_mut().append_pair("key", key);
        }

        Ok(url)
    }
}

#[async_trait]
impl SheetSource for GoogleSheetsClient {
    async fn fetch_range(&self, spreadsheet_id: &str, range: &str) -> Result<Vec<Vec<String>>> {
        let url = self.values_url(spreadsheet_id, range)?;
        let response = self
            .http
            .get_authorized(url.as_str(), self.access_token.as_deref())
            .await?;

        if !response.status().is_success() {
            return Err(OakError::SheetError(format!(
                "range {} answered {}",
                range,
                response.status()
            )));
        }

        let body: ValueRange = response.json().await?;
        info!("Fetched {} rows from {}", body.values.len(), range);
        Ok(body.values)
    }
}

/// The league's spreadsheets: the ranked leaderboard and submission form
/// tabs, plus the separate player database.
#[derive(Clone)]
pub struct RankedSheet {
    source: Arc<dyn SheetSource>,
    spreadsheet_id: String,
    rank_range: String,
    form_range: String,
    trainer_db_id: String,
    trainer_db_range: String,
}

impl RankedSheet {
    pub fn new(source: Arc<dyn SheetSource>, settings: &RankedSettings) -> Self {
        Self {
            source,
            spreadsheet_id: settings.spreadsheet_id.clone(),
            rank_range: settings.rank_range.clone(),
            form_range: settings.form_range.clone(),
            trainer_db_id: settings.trainer_db_spreadsheet_id.clone(),
            trainer_db_range: settings.trainer_db_range.clone(),
        }
    }

    pub async fn leaderboard(&self) -> Result<Leaderboard> {
        let rows = self
            .source
            .fetch_range(&self.spreadsheet_id, &self.rank_range)
            .await?;
        Ok(Leaderboard::from_rows(&rows))
    }

    pub async fn form_rows(&self) -> Result<Vec<Vec<String>>> {
        self.source
            .fetch_range(&self.spreadsheet_id, &self.form_range)
            .await
    }

    /// Registered players; rows without a name are skipped.
    pub async fn trainer_db(&self) -> Result<Vec<TrainerDbEntry>> {
        let rows = self
            .source
            .fetch_range(&self.trainer_db_id, &self.trainer_db_range)
            .await?;
        Ok(rows.iter().filter_map(|row| TrainerDbEntry::from_row(row)).collect())
    }
}
