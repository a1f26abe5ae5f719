//! 行程记录类型定义

use serde::{Deserialize, Serialize};

/// A planned trip, as stored by any backend.
///
/// `date` is epoch milliseconds. `description` is never absent: backends
/// that store it as nullable map `NULL` to an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: i64,
    pub destination: String,
    pub date: i64,
    #[serde(default)]
    pub description: String,
}

impl Trip {
    /// Build a stored record from a backend-assigned id and draft values.
    #[must_use]
    pub fn from_draft(id: i64, draft: &TripDraft) -> Self {
        Self {
            id,
            destination: draft.destination.clone(),
            date: draft.date,
            description: draft.description.clone(),
        }
    }
}

/// Normalized field values for an insert or update.
///
/// Produced by the service after validation; stores only ever receive
/// millisecond dates, never the raw user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripDraft {
    pub destination: String,
    pub date: i64,
    pub description: String,
}

/// Result of an update or delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub enum WriteOutcome {
    /// A record with the requested id existed and was changed.
    Applied,
    /// No record with the requested id exists; nothing changed.
    NoOp,
}

impl WriteOutcome {
    /// `Applied` when at least one row was touched.
    pub fn from_rows_affected(rows: u64) -> Self {
        if rows == 0 {
            Self::NoOp
        } else {
            Self::Applied
        }
    }

    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}
