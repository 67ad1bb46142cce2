//! Constant tables for LiuYao (六爻) divination.
//!
//! Everything here is pure data plus the lookups over it: the sexagenary
//! symbols, the five elements, the eight trigrams with their Na-Jia, branch
//! interactions, life stages, palace classification and the 64 hexagram
//! names. Nothing is mutable and nothing performs I/O; [`ensure_tables`]
//! runs the one-time consistency check.

/// Five elements, polarity, and the generation/control cycles.
pub mod element;
/// Error types used throughout the crate.
pub mod error;
/// Stems, branches, pillars and void decades.
pub mod ganzhi;
/// Line types produced by casting.
pub mod line;
/// The 8×8 hexagram name matrix.
pub mod names;
/// Palace classification and world/response placement.
pub mod palace;
/// Branch interactions, life stages, six relations and six spirits.
pub mod relations;
/// Startup self-check over the tables.
pub mod tables;
/// The eight trigrams and their Na-Jia.
pub mod trigram;

/// Re-export element types.
pub use element::{Element, ElementRelation, YinYang};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export sexagenary types.
pub use ganzhi::{Branch, Pillar, SexagenaryTime, Stem};
/// Re-export line types.
pub use line::LineType;
/// Re-export the name lookup.
pub use names::hexagram_name;
/// Re-export palace types.
pub use palace::{PalaceInfo, PalacePosition, classify};
/// Re-export line classifications.
pub use relations::{LifeStage, SixRelation, SixSpirit, StageBucket, WangShuai};
/// Re-export the table check.
pub use tables::{ensure_tables, verify_tables};
/// Re-export the trigram type.
pub use trigram::Trigram;
