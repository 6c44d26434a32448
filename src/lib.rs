pub mod commands;
pub mod config;
pub mod models;
pub mod ranking;
pub mod services;
pub mod utils;
pub mod verification;

pub use commands::{Invocation, Oak, Reply};
pub use config::Settings;
pub use models::{BattleClaim, BattleRecord, LeaderboardRow, OakError, Result, Tier, ValidationResult};
