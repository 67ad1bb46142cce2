//! LiuYao (六爻) divination engine.
//!
//! Casts six lines, builds the hexagram with its palace and Na-Jia, enriches
//! every line against the pillars of the moment and reads the structures,
//! spirit system, covert spirits and timing hints out of the result. The
//! entry point is [`LiuYaoService`].

/// Hexagram synthesis.
pub mod builder;
/// The calendar capability.
pub mod calendar;
/// Casting modes.
pub mod cast;
/// Analysis configuration.
pub mod config;
/// Covert spirit lookup.
pub mod covert;
/// Time-dependent line enrichment.
pub mod enrich;
/// Error types.
pub mod error;
/// The facade.
pub mod service;
/// Useful-god selection.
pub mod spirits;
/// Cross-line structure detection.
pub mod structure;
/// Timing hints.
pub mod timing;

pub use builder::{Hexagram, HexagramSummary, Line};
pub use calendar::{Calendar, FixedCalendar, SolarTermCalendar};
pub use cast::{CastRequest, Coin, CoinThrow, Lines};
pub use config::AnalysisConfig;
pub use covert::CovertSpirit;
pub use enrich::{EnrichedLine, LineStrength, MovingTransform, SpecialStatus, VoidState};
pub use error::{CalendarError, EngineError, EngineResult, ErrorReport};
pub use service::{AnalysisInput, CastInput, FacadeInput, LiuYaoService, Report};
pub use spirits::{QuestionCategory, SpiritSystem};
pub use structure::Structures;
pub use timing::TimingHint;
