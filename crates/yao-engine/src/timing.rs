//! Timing hints (应期) read from the useful god's state.

use serde::{Deserialize, Serialize};
use yao_core::SexagenaryTime;

use crate::enrich::{EnrichedLine, SpecialStatus, VoidState};
use crate::spirits::SpiritSystem;
use crate::structure::Structures;

/// What a hint is based on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingBasis {
    /// The useful god is dark-stirred.
    DarkStir,
    /// The useful god is truly void.
    Void,
    /// The useful god moves and transforms.
    Transform,
    /// The hexagram is a six-clash hexagram.
    SixClash,
    /// The useful god is covert but can come out.
    Covert,
}

/// One timing hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingHint {
    /// What produced it.
    pub basis: TimingBasis,
    /// Line the hint is about, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u8>,
    /// The hint.
    pub text: String,
}

/// Derive timing hints. The order carries no meaning.
pub fn advise(
    lines: &[EnrichedLine; 6],
    spirits: &SpiritSystem,
    structures: &Structures,
    time: &SexagenaryTime,
) -> Vec<TimingHint> {
    let mut hints = Vec::new();
    let [a, b] = time.kong();
    for &position in &spirits.yong.positions {
        let Some(line) = lines.get(usize::from(position).saturating_sub(1)) else {
            continue;
        };
        if line.strength.special == SpecialStatus::DarkStir {
            hints.push(TimingHint {
                basis: TimingBasis::DarkStir,
                position: Some(position),
                text: "事近成，应期在日冲之日".to_string(),
            });
        }
        if line.void_state == VoidState::TrueVoid {
            hints.push(TimingHint {
                basis: TimingBasis::Void,
                position: Some(position),
                text: format!("出空之日应期，即逢 {a}{b} 之日"),
            });
        }
        if let Some(transform) = &line.transform {
            hints.push(TimingHint {
                basis: TimingBasis::Transform,
                position: Some(position),
                text: transform.note.clone(),
            });
        }
    }
    if structures.six_clash.is_full {
        hints.push(TimingHint {
            basis: TimingBasis::SixClash,
            position: None,
            text: "主散，应期较急".to_string(),
        });
    }
    if let Some(covert) = spirits.covert.as_ref().filter(|c| c.available) {
        hints.push(TimingHint {
            basis: TimingBasis::Covert,
            position: Some(covert.position),
            text: "伏神得出，应期在冲开飞神或伏神值日之时".to_string(),
        });
    }
    hints
}
