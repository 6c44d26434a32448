pub mod auditor;
pub mod battle;
pub mod replay;

pub use auditor::FormAuditor;
pub use battle::{BattleValidator, ValidationPolicy};
pub use replay::{parse_replay, replay_metadata_url, ReplayFetcher, ReplayPayload, ShowdownReplayClient};
