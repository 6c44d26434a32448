//! Bot commands. Each command is an `Oak` method that gathers data from the
//! external services and turns it into a [`Reply`].

pub mod league;
pub mod ranked;
pub mod reference;
pub mod reply;
pub mod trainer_db;

use std::sync::Arc;

use crate::{
    config::Settings,
    models::{OakError, Result},
    services::{GoogleSheetsClient, HttpClient, LeagueBackend, RankedSheet, ReferenceClient, SheetSource},
    verification::{BattleValidator, FormAuditor, ReplayFetcher, ShowdownReplayClient, ValidationPolicy},
};

pub use reply::{Card, Field, Message, Reply, DEFAULT_COLOR};

/// Who asked, and from where.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub author_id: String,
    pub channel: String,
    pub roles: Vec<String>,
}

impl Invocation {
    pub fn new(author_id: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            author_id: author_id.into(),
            channel: channel.into(),
            roles: Vec::new(),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Chat mention of the author, `<@id>`.
    pub fn mention(&self) -> String {
        format!("<@{}>", self.author_id)
    }
}

/// The bot: configuration plus one client per external service.
pub struct Oak {
    settings: Settings,
    sheet: RankedSheet,
    replays: Arc<dyn ReplayFetcher>,
    reference: ReferenceClient,
    backend: LeagueBackend,
}

impl Oak {
    pub fn new(settings: Settings) -> Result<Self> {
        let http = HttpClient::new(&settings.http)?;
        let sheets: Arc<dyn SheetSource> = Arc::new(GoogleSheetsClient::new(http.clone(), &settings.ranked));
        let replays: Arc<dyn ReplayFetcher> = Arc::new(ShowdownReplayClient::new(http, &settings.replay)?);
        Self::with_sources(settings, sheets, replays)
    }

    /// Build with caller-provided spreadsheet and replay sources. Settings
    /// that fail [`Settings::validate`] are rejected here.
    pub fn with_sources(
        settings: Settings,
        sheets: Arc<dyn SheetSource>,
        replays: Arc<dyn ReplayFetcher>,
    ) -> Result<Self> {
        settings.validate().map_err(OakError::ConfigError)?;
        let http = HttpClient::new(&settings.http)?;

        Ok(Self {
            sheet: RankedSheet::new(sheets, &settings.ranked),
            reference: ReferenceClient::new(http.clone(), settings.reference.clone()),
            backend: LeagueBackend::new(http, &settings.backend),
            replays,
            settings,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn auditor(&self) -> FormAuditor {
        FormAuditor::new(
            Arc::clone(&self.replays),
            BattleValidator::new(ValidationPolicy::from(&self.settings.replay)),
            self.settings.ranked.first_form_row,
        )
    }

    fn is_admin(&self, invocation: &Invocation) -> bool {
        invocation.has_role(&self.settings.ranked.admin_role)
    }
}

pub(crate) fn permission_denied(action: &str) -> Reply {
    Reply::card(
        ":octagonal_sign:",
        Card::default().field(
            "Permission denied",
            format!("You are not allowed to {}!", action),
            false,
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{services::sheets::MockSheetSource, verification::replay::MockReplayFetcher};

    #[test]
    fn test_invocation_roles_and_mention() {
        let invocation = Invocation::new("42", "general").with_role("ADM");
        assert!(invocation.has_role("ADM"));
        assert!(!invocation.has_role("adm"));
        assert_eq!(invocation.mention(), "<@42>");
    }

    #[test]
    fn test_rejects_zero_dex_range() {
        let mut settings = Settings::default();
        settings.reference.max_dex_number = 0;

        let result = Oak::with_sources(
            settings,
            Arc::new(MockSheetSource::new()),
            Arc::new(MockReplayFetcher::new()),
        );
        assert!(matches!(result, Err(OakError::ConfigError(_))));
    }

    #[test]
    fn test_permission_denied_card() {
        let reply = permission_denied("register a league");
        let card = reply.messages[0].card.as_ref().unwrap();
        assert_eq!(card.get("Permission denied"), Some("You are not allowed to register a league!"));
    }
}
