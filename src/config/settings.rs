use serde::{Deserialize, Serialize};
use config::{Config, ConfigError, File};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub ranked: RankedSettings,
    pub replay: ReplaySettings,
    pub reference: ReferenceSettings,
    pub backend: BackendSettings,
    pub http: HttpSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub version: String,
    pub log_level: String,
    pub environment: Environment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedSettings {
    pub sheets_api_url: String,
    pub api_key: Option<String>,
    pub access_token: Option<String>,
    pub spreadsheet_id: String,
    pub rank_range: String,
    pub form_range: String,
    /// Spreadsheet line of the first form row (line 1 is the header).
    pub first_form_row: usize,
    pub admin_channel: String,
    pub admin_role: String,
    pub top_size: usize,
    pub audit_chunk_size: usize,
    /// Spreadsheet holding the league's registered players.
    pub trainer_db_spreadsheet_id: String,
    /// Player rows, `[name, discord, switch friend code, showdown]`, no header.
    pub trainer_db_range: String,
    /// Players shown when the database is listed without a name.
    pub trainer_db_sample_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaySettings {
    pub host: String,
    pub utc_offset_hours: i32,
    pub check_date: bool,
    pub date_tolerance_days: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceSettings {
    pub pokemon_url: String,
    pub item_url: String,
    pub ability_url: String,
    pub effectiveness_url: String,
    pub max_dex_number: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSettings {
    pub quotes_url: String,
    pub league_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    pub timeout_seconds: u64,
    pub max_attempts: u32,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: "Oak".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                log_level: "info".to_string(),
                environment: Environment::Development,
            },
            ranked: RankedSettings {
                sheets_api_url: "https://sheets.googleapis.com/v4/spreadsheets".to_string(),
                api_key: None,
                access_token: None,
                spreadsheet_id: "1E2cQBWeQc9JkCKv3BUPClGwulPXXg-4hTYotuUKmoJI".to_string(),
                rank_range: "Rank!A1:F255".to_string(),
                form_range: "Respostas ao formulário 2!A2:E255".to_string(),
                first_form_row: 2,
                admin_channel: "admin".to_string(),
                admin_role: "ADM".to_string(),
                top_size: 20,
                audit_chunk_size: 10,
                trainer_db_spreadsheet_id: "18idH8DSvBhbgK9grKeXmV6DjKJpIsZl4dxneqKZDl3A".to_string(),
                trainer_db_range: "Trainers!A2:D255".to_string(),
                trainer_db_sample_size: 10,
            },
            replay: ReplaySettings {
                host: "replay.pokemonshowdown.com".to_string(),
                utc_offset_hours: -3, // Brasília
                check_date: true,
                date_tolerance_days: 2,
            },
            reference: ReferenceSettings {
                pokemon_url: "https://pokeapi.co/api/v2/pokemon/".to_string(),
                item_url: "https://pokeapi.co/api/v2/item/".to_string(),
                ability_url: "https://pokeapi.co/api/v2/ability/".to_string(),
                effectiveness_url: "http://bit.ly/2ZKJ5UW".to_string(),
                max_dex_number: 898,
            },
            backend: BackendSettings {
                quotes_url: "http://localhost:8000/graphql/".to_string(),
                league_url: "http://localhost:8001/graphql/".to_string(),
            },
            http: HttpSettings {
                timeout_seconds: 15,
                max_attempts: 1,
                user_agent: format!("oak-bot/{}", env!("CARGO_PKG_VERSION")),
            },
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("OAK").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(path.as_ref()))
            .build()?;

        s.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.replay.date_tolerance_days < 0 {
            return Err(format!(
                "Replay date tolerance must be non-negative, got {}",
                self.replay.date_tolerance_days
            ));
        }

        if !(-12..=14).contains(&self.replay.utc_offset_hours) {
            return Err(format!(
                "UTC offset must be between -12 and 14 hours, got {}",
                self.replay.utc_offset_hours
            ));
        }

        if self.replay.host.trim().is_empty() {
            return Err("Replay host must not be empty".to_string());
        }

        if self.http.max_attempts == 0 {
            return Err("HTTP max_attempts must be at least 1".to_string());
        }

        if self.http.timeout_seconds == 0 {
            return Err("HTTP timeout must be at least one second".to_string());
        }

        if self.ranked.top_size == 0
            || self.ranked.audit_chunk_size == 0
            || self.ranked.trainer_db_sample_size == 0
        {
            return Err("Ranked table sizes must be positive".to_string());
        }

        if self.reference.max_dex_number == 0 {
            return Err("max_dex_number must be positive".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let mut settings = Settings::default();
        settings.replay.date_tolerance_days = -1;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let mut settings = Settings::default();
        settings.http.max_attempts = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_offset_out_of_range_rejected() {
        let mut settings = Settings::default();
        settings.replay.utc_offset_hours = 20;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_zero_sizes_rejected() {
        let mut settings = Settings::default();
        settings.ranked.trainer_db_sample_size = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.reference.max_dex_number = 0;
        assert!(settings.validate().is_err());
    }
}
