use crate::{
    config::ReplaySettings,
    models::{BattleClaim, BattleRecord, ValidationResult},
    utils::names_match,
};

pub const WINNER_INVALID: &str = "Winner is not valid; ";
pub const LOSER_INVALID: &str = "Loser is not valid; ";
pub const DATE_INVALID: &str = "Date is not valid; ";

/// Which checks the validator applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationPolicy {
    pub check_date: bool,
    /// Largest accepted gap in whole days between claim and record.
    pub date_tolerance_days: i64,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            check_date: true,
            date_tolerance_days: 2,
        }
    }
}

impl From<&ReplaySettings> for ValidationPolicy {
    fn from(settings: &ReplaySettings) -> Self {
        Self {
            check_date: settings.check_date,
            date_tolerance_days: settings.date_tolerance_days,
        }
    }
}

/// Compares a submitted claim with the replay's record.
#[derive(Debug, Clone, Default)]
pub struct BattleValidator {
    policy: ValidationPolicy,
}

impl BattleValidator {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    /// Run every check; each failure appends its own fragment.
    pub fn validate(&self, claim: &BattleClaim, record: &BattleRecord) -> ValidationResult {
        let mut error = String::new();

        if !names_match(claim.winner.trim(), record.winner.trim()) {
            error.push_str(WINNER_INVALID);
        }

        if !names_match(claim.loser.trim(), record.loser.trim()) {
            error.push_str(LOSER_INVALID);
        }

        if self.policy.check_date {
            let drift = (claim.submitted_at - record.recorded_at).num_days().abs();
            if drift > self.policy.date_tolerance_days {
                error.push_str(DATE_INVALID);
            }
        }

        ValidationResult::from_error(error)
    }
}
