pub mod classifier;
pub mod elo;
pub mod leaderboard;

pub use classifier::{classify, classify_str, parse_score, TIER_BANDS};
pub use elo::{is_valid_matchup, tier_from_name, to_level, validate_matchup};
pub use leaderboard::{build_row, build_row_from_raw, Leaderboard};
