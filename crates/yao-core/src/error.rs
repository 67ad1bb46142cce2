//! Error types for the constant tables and calendar primitives.

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while parsing sexagenary symbols or consulting the tables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A heavenly stem could not be recognised.
    #[error("unknown stem: \"{0}\"")]
    UnknownStem(String),

    /// An earthly branch could not be recognised.
    #[error("unknown branch: \"{0}\"")]
    UnknownBranch(String),

    /// A stem and branch of different polarity never meet in the sixty cycle.
    #[error("invalid pillar: {stem}{branch} is not a sexagenary pair")]
    InvalidPillar {
        /// The stem that was supplied.
        stem: String,
        /// The branch that was supplied.
        branch: String,
    },

    /// A four-pillar reading had the wrong number of pillars.
    #[error("expected four pillars (year month day hour), got {0}")]
    PillarCount(usize),

    /// Palace classification did not settle on a pure hexagram.
    #[error("unknown hexagram pattern: {0:#08b}")]
    UnknownHexagramPattern(u8),

    /// A table failed its startup self-check.
    #[error("constant table corrupted: {0}")]
    TableCorruption(String),
}
