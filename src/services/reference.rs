use reqwest::Url;
use tracing::{debug, warn};

use crate::{
    config::ReferenceSettings,
    models::{Ability, Effectiveness, Item, NamedResourceList, OakError, Pokemon, Result},
    services::http::{resource_url, HttpClient},
};

/// Client for the creature/item/ability reference API. Any status other
/// than 200 reads as "unknown" and comes back as `None`.
#[derive(Clone)]
pub struct ReferenceClient {
    http: HttpClient,
    settings: ReferenceSettings,
}

impl ReferenceClient {
    pub fn new(http: HttpClient, settings: ReferenceSettings) -> Self {
        Self { http, settings }
    }

    pub fn max_dex_number(&self) -> u32 {
        self.settings.max_dex_number
    }

    pub async fn pokemon(&self, name: &str) -> Result<Option<Pokemon>> {
        let url = resource_url(&self.settings.pokemon_url, &name.trim().to_lowercase())?;
        self.http.get_optional_json(url.as_str()).await
    }

    pub async fn pokemon_by_dex(&self, dex_number: u32) -> Result<Option<Pokemon>> {
        self.pokemon(&dex_number.to_string()).await
    }

    /// Names of every pokemon up to `max_dex_number`.
    pub async fn pokemon_names(&self) -> Result<Vec<String>> {
        let url = self.pokemon_index_url()?;
        let list: Option<NamedResourceList> = self.http.get_optional_json(url.as_str()).await?;
        Ok(list
            .unwrap_or_default()
            .results
            .into_iter()
            .map(|resource| resource.name)
            .collect())
    }

    fn pokemon_index_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.settings.pokemon_url).map_err(|e| {
            OakError::ConfigError(format!("Invalid base URL {}: {}", self.settings.pokemon_url, e))
        })?;
        url.query_pairs_mut()
            .append_pair("limit", &self.settings.max_dex_number.to_string());
        Ok(url)
    }

    pub async fn item(&self, name: &str) -> Result<Option<Item>> {
        let url = resource_url(&self.settings.item_url, &name.trim().to_lowercase())?;
        self.http.get_optional_json(url.as_str()).await
    }

    pub async fn ability(&self, name: &str) -> Result<Option<Ability>> {
        let url = resource_url(&self.settings.ability_url, &name.trim().to_lowercase())?;
        self.http.get_optional_json(url.as_str()).await
    }

    /// Type matchups for a national dex number. The endpoint serves the whole
    /// list, so a failed or short download simply yields `None`.
    pub async fn effectiveness(&self, dex_number: u32) -> Option<Effectiveness> {
        let list: Vec<Effectiveness> = match self
            .http
            .get_optional_json(&self.settings.effectiveness_url)
            .await
        {
            Ok(Some(list)) => list,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to load effectiveness data: {}", e);
                return None;
            }
        };

        let index = (dex_number as usize).checked_sub(1)?;
        let entry = list.into_iter().nth(index);
        if entry.is_none() {
            debug!("No effectiveness entry for dex number {}", dex_number);
        }
        entry
    }
}
