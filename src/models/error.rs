use thiserror::Error;

#[derive(Error, Debug)]
pub enum OakError {
    #[error("Invalid format: {0}")]
    FormatError(String),

    #[error("Unknown tier: {0}")]
    TierNotFound(String),

    #[error("Battle URL is not a valid replay from {host}: {url}")]
    InvalidReplaySource { url: String, host: String },

    #[error("Error getting replay metadata: {0}")]
    ReplayFetchError(String),

    #[error("Malformed replay: {0}")]
    MalformedReplay(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid elos matchup ({winner} vs {loser})")]
    MatchupInvalid { winner: String, loser: String },

    #[error("{0}")]
    RecordMismatch(String),

    #[error("Malformed row: {0}")]
    MalformedRow(String),

    #[error("Already registered: {0}")]
    AlreadyRegistered(String),

    #[error("Backend error: {0}")]
    BackendError(String),

    #[error("Spreadsheet error: {0}")]
    SheetError(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, OakError>;
