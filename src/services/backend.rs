use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info};

use crate::{
    config::BackendSettings,
    models::{
        Connection, League, Leader, LeaderRole, OakError, RegistrationKind, Result, Trainer,
    },
    services::http::HttpClient,
};

const LEAGUES_QUERY: &str = r#"
query Leagues($id: ID) {
  leagues(id: $id) {
    edges {
      node {
        id
        reference
        startDate
        endDate
        description
        competitors { edges { node { id name joinDate } } }
      }
    }
  }
}"#;

const QUOTES_QUERY: &str = "query Quotes { abpQuotes }";

const CREATE_QUOTE_MUTATION: &str = r#"
mutation CreateQuote($input: CreateAbpQuoteInput!) {
  createAbpQuote(input: $input) { response }
}"#;

const CREATE_TRAINER_MUTATION: &str = r#"
mutation CreateTrainer($input: CreateTrainerInput!) {
  createTrainer(input: $input) {
    trainer {
      id discordId name joinDate battleCounter badgeCounter leaguesCounter
      winPercentage loosePercentage lv exp nextLv
    }
  }
}"#;

const CREATE_LEAGUE_MUTATION: &str = r#"
mutation CreateLeague($input: CreateLeagueInput!) {
  createLeague(input: $input) {
    league { id reference startDate endDate }
  }
}"#;

const CREATE_LEADER_MUTATION: &str = r#"
mutation CreateLeader($input: CreateLeaderInput!) {
  createLeader(input: $input) {
    leader {
      id name role pokemonType joinDate battleCounter winPercentage
      loosePercentage discordId lv nextLv exp
    }
  }
}"#;

const LEAGUE_REGISTRATION_MUTATION: &str = r#"
mutation LeagueRegistration($input: LeagueRegistrationInput!) {
  leagueRegistration(input: $input) { registration }
}"#;

/// A GraphQL operation. User-supplied text only ever travels in `variables`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GraphqlRequest {
    pub query: &'static str,
    pub variables: Value,
}

impl GraphqlRequest {
    pub fn leagues(id: Option<&str>) -> Self {
        Self {
            query: LEAGUES_QUERY,
            variables: json!({ "id": id }),
        }
    }

    pub fn quotes() -> Self {
        Self {
            query: QUOTES_QUERY,
            variables: json!({}),
        }
    }

    pub fn create_quote(quote: &str) -> Self {
        Self {
            query: CREATE_QUOTE_MUTATION,
            variables: json!({ "input": { "quote": quote } }),
        }
    }

    pub fn create_trainer(discord_id: &str) -> Self {
        Self {
            query: CREATE_TRAINER_MUTATION,
            variables: json!({ "input": { "discordId": discord_id } }),
        }
    }

    pub fn create_league(reference: &str) -> Self {
        Self {
            query: CREATE_LEAGUE_MUTATION,
            variables: json!({ "input": { "reference": reference } }),
        }
    }

    pub fn create_leader(discord_id: &str, pokemon_type: &str, role: LeaderRole) -> Self {
        Self {
            query: CREATE_LEADER_MUTATION,
            variables: json!({
                "input": {
                    "discordId": discord_id,
                    "pokemonType": pokemon_type.trim().to_uppercase(),
                    "role": role,
                }
            }),
        }
    }

    pub fn league_registration(discord_id: &str, league: &str, kind: RegistrationKind) -> Self {
        Self {
            query: LEAGUE_REGISTRATION_MUTATION,
            variables: json!({
                "input": {
                    "discordId": discord_id,
                    "league": league,
                    "isTrainer": kind == RegistrationKind::Trainer,
                }
            }),
        }
    }
}

#[derive(Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Deserialize)]
struct GraphqlError {
    message: String,
}

/// Map a backend error message onto the crate's error taxonomy.
pub fn classify_backend_error(message: &str) -> OakError {
    if message.starts_with("UNIQUE") || message.contains("already registered") {
        OakError::AlreadyRegistered(message.to_string())
    } else if message.contains("does not exist") {
        OakError::NotFound(message.to_string())
    } else {
        OakError::BackendError(message.to_string())
    }
}

fn decode_response<T: DeserializeOwned>(body: &str) -> Result<T> {
    let response: GraphqlResponse<T> = serde_json::from_str(body)?;

    if let Some(first) = response.errors.as_ref().and_then(|errors| errors.first()) {
        return Err(classify_backend_error(&first.message));
    }

    response
        .data
        .ok_or_else(|| OakError::BackendError("Empty response from backend".to_string()))
}

/// Minimal GraphQL-over-HTTP client.
#[derive(Clone)]
pub struct GraphqlClient {
    http: HttpClient,
    endpoint: String,
}

impl GraphqlClient {
    pub fn new(http: HttpClient, endpoint: String) -> Self {
        Self { http, endpoint }
    }

    pub async fn execute<T: DeserializeOwned>(&self, request: &GraphqlRequest) -> Result<T> {
        let response = self.http.post_json(&self.endpoint, request).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() && !body.trim_start().starts_with('{') {
            error!("Backend {} answered {}", self.endpoint, status);
            return Err(OakError::BackendError(format!("{} answered {}", self.endpoint, status)));
        }

        decode_response(&body)
    }
}

#[derive(Deserialize)]
struct LeaguesData {
    leagues: Connection<League>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuotesData {
    abp_quotes: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateQuoteData {
    create_abp_quote: ResponsePayload,
}

#[derive(Deserialize)]
struct ResponsePayload {
    response: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTrainerData {
    create_trainer: TrainerPayload,
}

#[derive(Deserialize)]
struct TrainerPayload {
    trainer: Trainer,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateLeagueData {
    create_league: LeaguePayload,
}

#[derive(Deserialize)]
struct LeaguePayload {
    league: League,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateLeaderData {
    create_leader: LeaderPayload,
}

#[derive(Deserialize)]
struct LeaderPayload {
    leader: Leader,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistrationData {
    league_registration: RegistrationPayload,
}

#[derive(Deserialize)]
struct RegistrationPayload {
    registration: String,
}

/// Typed operations against the league backend and the quotes service.
#[derive(Clone)]
pub struct LeagueBackend {
    league: GraphqlClient,
    quotes: GraphqlClient,
}

impl LeagueBackend {
    pub fn new(http: HttpClient, settings: &BackendSettings) -> Self {
        Self {
            league: GraphqlClient::new(http.clone(), settings.league_url.clone()),
            quotes: GraphqlClient::new(http, settings.quotes_url.clone()),
        }
    }

    pub async fn leagues(&self, id: Option<&str>) -> Result<Vec<League>> {
        let data: LeaguesData = self.league.execute(&GraphqlRequest::leagues(id)).await?;
        Ok(data.leagues.into_nodes())
    }

    pub async fn create_trainer(&self, discord_id: &str) -> Result<Trainer> {
        let data: CreateTrainerData = self
            .league
            .execute(&GraphqlRequest::create_trainer(discord_id))
            .await?;
        info!("Registered trainer {}", discord_id);
        Ok(data.create_trainer.trainer)
    }

    pub async fn create_league(&self, reference: &str) -> Result<League> {
        let data: CreateLeagueData = self
            .league
            .execute(&GraphqlRequest::create_league(reference))
            .await?;
        info!("Registered league {}", reference);
        Ok(data.create_league.league)
    }

    pub async fn create_leader(&self, discord_id: &str, pokemon_type: &str, role: LeaderRole) -> Result<Leader> {
        let data: CreateLeaderData = self
            .league
            .execute(&GraphqlRequest::create_leader(discord_id, pokemon_type, role))
            .await?;
        info!("Registered {} leader {}", role.as_str(), discord_id);
        Ok(data.create_leader.leader)
    }

    pub async fn register(&self, discord_id: &str, league: &str, kind: RegistrationKind) -> Result<String> {
        let data: RegistrationData = self
            .league
            .execute(&GraphqlRequest::league_registration(discord_id, league, kind))
            .await?;
        Ok(data.league_registration.registration)
    }

    pub async fn create_quote(&self, quote: &str) -> Result<String> {
        let data: CreateQuoteData = self
            .quotes
            .execute(&GraphqlRequest::create_quote(quote))
            .await?;
        Ok(data.create_abp_quote.response)
    }

    pub async fn quotes(&self) -> Result<Vec<String>> {
        let data: QuotesData = self.quotes.execute(&GraphqlRequest::quotes()).await?;
        Ok(data.abp_quotes)
    }
}
