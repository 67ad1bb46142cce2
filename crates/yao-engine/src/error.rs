//! Error types for the divination engine.

use serde::{Deserialize, Serialize};
use yao_core::CoreError;

/// Errors raised by a [`Calendar`](crate::calendar::Calendar) implementation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// The timestamp falls outside the years the calendar can convert.
    #[error("year {0} is outside the supported range 1900..=2100")]
    OutOfRange(i32),

    /// The calendar could not produce a pillar for the timestamp.
    #[error("calendar conversion failed: {0}")]
    Conversion(String),
}

/// Errors that can occur while casting or analysing a hexagram.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// Casting input was malformed.
    #[error("invalid cast: {0}")]
    InvalidCast(String),

    /// A facade request could not be read.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The calendar capability failed.
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    /// A constant table lookup failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Convenience result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// The structured error object handed to callers of the facade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Taxonomy name, e.g. `InvalidCast`.
    pub kind: String,
    /// Human-readable message.
    pub message: String,
    /// Extra structured context, when there is any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl EngineError {
    /// Taxonomy name of the error.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCast(_) => "InvalidCast",
            Self::InvalidRequest(_) => "InvalidRequest",
            Self::Calendar(_) => "CalendarError",
            Self::Core(CoreError::UnknownStem(_)) => "UnknownStem",
            Self::Core(CoreError::UnknownBranch(_)) => "UnknownBranch",
            Self::Core(CoreError::InvalidPillar { .. }) => "InvalidPillar",
            Self::Core(CoreError::PillarCount(_)) => "PillarCount",
            Self::Core(CoreError::UnknownHexagramPattern(_)) => "UnknownHexagramPattern",
            Self::Core(CoreError::TableCorruption(_)) => "TableCorruption",
        }
    }

    /// Returns true for errors that signal corrupted constant tables.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Core(CoreError::UnknownHexagramPattern(_) | CoreError::TableCorruption(_))
        )
    }

    /// Package the error for a caller.
    pub fn to_report(&self) -> ErrorReport {
        let details = match self {
            Self::Calendar(CalendarError::OutOfRange(year)) => {
                Some(serde_json::json!({ "year": year }))
            }
            Self::Core(CoreError::InvalidPillar { stem, branch }) => {
                Some(serde_json::json!({ "stem": stem, "branch": branch }))
            }
            Self::Core(CoreError::UnknownHexagramPattern(bits)) => {
                Some(serde_json::json!({ "pattern": bits }))
            }
            _ => None,
        };
        ErrorReport {
            kind: self.kind().to_string(),
            message: self.to_string(),
            details,
        }
    }
}
