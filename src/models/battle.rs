use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::{OakError, Result};

/// Timestamp layout written by the submission form.
pub const FORM_DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// A self-reported battle result awaiting validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BattleClaim {
    pub winner: String,
    pub loser: String,
    pub submitted_at: NaiveDateTime,
}

/// Ground truth for a battle, as extracted from a hosted replay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BattleRecord {
    pub winner: String,
    pub loser: String,
    pub recorded_at: NaiveDateTime,
    pub format: String,
}

/// Outcome of checking a claim against a record.
///
/// Successful iff no check failed; each failed check contributes its own
/// fragment to `error`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationResult {
    success: bool,
    error: String,
}

impl ValidationResult {
    pub fn from_error(error: String) -> Self {
        Self {
            success: error.is_empty(),
            error,
        }
    }

    pub fn ok() -> Self {
        Self::from_error(String::new())
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn into_result(self) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            Err(OakError::RecordMismatch(self.error.trim().to_string()))
        }
    }
}

/// One row of the battle submission form:
/// `[timestamp, submitter, winner, loser, replay url]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormSubmission {
    pub submitted_at: NaiveDateTime,
    pub submitter: String,
    pub winner: String,
    pub loser: String,
    pub replay_url: String,
}

impl FormSubmission {
    pub const COLUMNS: usize = 5;

    pub fn from_row(row: &[String]) -> Result<Self> {
        if row.len() < Self::COLUMNS {
            return Err(OakError::MalformedRow(format!(
                "expected {} columns, got {}",
                Self::COLUMNS,
                row.len()
            )));
        }

        let submitted_at = NaiveDateTime::parse_from_str(row[0].trim(), FORM_DATE_FORMAT)
            .map_err(|e| OakError::FormatError(format!("timestamp '{}': {}", row[0], e)))?;

        Ok(Self {
            submitted_at,
            submitter: row[1].clone(),
            winner: row[2].clone(),
            loser: row[3].clone(),
            replay_url: row[4].trim().to_string(),
        })
    }

    pub fn claim(&self) -> BattleClaim {
        BattleClaim {
            winner: self.winner.clone(),
            loser: self.loser.clone(),
            submitted_at: self.submitted_at,
        }
    }
}

/// A problem found while auditing the form, tied to its spreadsheet line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditEntry {
    pub row: usize,
    pub message: String,
}

impl AuditEntry {
    pub fn new(row: usize, message: impl Into<String>) -> Self {
        Self {
            row,
            message: message.into(),
        }
    }
}
