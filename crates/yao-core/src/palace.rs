//! Palace classification (认宫) and world/response placement (安世应).
//!
//! A hexagram is a six-bit pattern: bit 0 is the bottom line, a set bit is
//! yang. The classification walks the same flips that generate a palace from
//! its pure hexagram; the first state whose two trigrams match names the
//! palace and the step count names the generation.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::trigram::Trigram;

/// Generation of a hexagram inside its palace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PalacePosition {
    /// 本宫 (pure, 八纯).
    Pure,
    /// 一世
    FirstWorld,
    /// 二世
    SecondWorld,
    /// 三世
    ThirdWorld,
    /// 四世
    FourthWorld,
    /// 五世
    FifthWorld,
    /// 游魂
    RoamingSoul,
    /// 归魂
    ReturningSoul,
}

impl PalacePosition {
    /// Positions in generation order, 0..=7.
    pub const ALL: [Self; 8] = [
        Self::Pure,
        Self::FirstWorld,
        Self::SecondWorld,
        Self::ThirdWorld,
        Self::FourthWorld,
        Self::FifthWorld,
        Self::RoamingSoul,
        Self::ReturningSoul,
    ];

    /// Ordinal in `0..8`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// World and response line positions (1 = bottom).
    pub fn shi_ying(self) -> (u8, u8) {
        match self {
            Self::Pure => (6, 3),
            Self::FirstWorld => (1, 4),
            Self::SecondWorld => (2, 5),
            Self::ThirdWorld => (3, 6),
            Self::FourthWorld => (4, 1),
            Self::FifthWorld => (5, 2),
            Self::RoamingSoul => (4, 1),
            Self::ReturningSoul => (3, 6),
        }
    }

    /// Chinese name.
    pub fn chinese(self) -> &'static str {
        match self {
            Self::Pure => "本宫",
            Self::FirstWorld => "一世",
            Self::SecondWorld => "二世",
            Self::ThirdWorld => "三世",
            Self::FourthWorld => "四世",
            Self::FifthWorld => "五世",
            Self::RoamingSoul => "游魂",
            Self::ReturningSoul => "归魂",
        }
    }
}

impl std::fmt::Display for PalacePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.chinese())
    }
}

/// Result of palace classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PalaceInfo {
    /// The palace, named by its trigram.
    pub palace: Trigram,
    /// Generation inside the palace.
    pub position: PalacePosition,
}

impl PalaceInfo {
    /// World line position.
    pub fn shi(self) -> u8 {
        self.position.shi_ying().0
    }

    /// Response line position.
    pub fn ying(self) -> u8 {
        self.position.shi_ying().1
    }
}

/// Cumulative flip applied at each step of the walk, as a six-bit mask.
///
/// Lines 1..5 are flipped one by one, line 4 is then restored (游魂) and
/// finally the whole inner trigram is flipped back (归魂).
const WALK: [u8; 8] = [
    0b000000, 0b000001, 0b000011, 0b000111, 0b001111, 0b011111, 0b010111, 0b010000,
];

/// Lower trigram of a six-bit pattern.
pub fn lower_trigram(bits: u8) -> Trigram {
    Trigram::from_bits(bits & 0b111)
}

/// Upper trigram of a six-bit pattern.
pub fn upper_trigram(bits: u8) -> Trigram {
    Trigram::from_bits((bits >> 3) & 0b111)
}

/// Six-bit pattern of a hexagram from its trigrams.
pub fn hexagram_bits(upper: Trigram, lower: Trigram) -> u8 {
    (upper.bits() << 3) | lower.bits()
}

/// Find the palace and generation of a six-bit pattern.
pub fn classify(bits: u8) -> CoreResult<PalaceInfo> {
    let bits = bits & 0b111111;
    WALK.iter()
        .zip(PalacePosition::ALL)
        .map(|(mask, position)| (bits ^ mask, position))
        .find(|(state, _)| lower_trigram(*state) == upper_trigram(*state))
        .map(|(state, position)| PalaceInfo {
            palace: upper_trigram(state),
            position,
        })
        .ok_or(CoreError::UnknownHexagramPattern(bits))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(upper: Trigram, lower: Trigram) -> u8 {
        hexagram_bits(upper, lower)
    }

    #[test]
    fn pure_hexagrams() {
        for t in Trigram::ALL {
            let info = classify(bits(t, t)).unwrap();
            assert_eq!(info.palace, t);
            assert_eq!(info.position, PalacePosition::Pure);
            assert_eq!((info.shi(), info.ying()), (6, 3));
        }
    }

    #[test]
    fn qian_palace_family() {
        use Trigram::*;
        let family = [
            (Qian, Xun, PalacePosition::FirstWorld),   // 姤
            (Qian, Gen, PalacePosition::SecondWorld),  // 遁
            (Qian, Kun, PalacePosition::ThirdWorld),   // 否
            (Xun, Kun, PalacePosition::FourthWorld),   // 观
            (Gen, Kun, PalacePosition::FifthWorld),    // 剥
            (Li, Kun, PalacePosition::RoamingSoul),    // 晋
            (Li, Qian, PalacePosition::ReturningSoul), // 大有
        ];
        for (upper, lower, position) in family {
            let info = classify(bits(upper, lower)).unwrap();
            assert_eq!(info.palace, Qian, "{upper}{lower}");
            assert_eq!(info.position, position, "{upper}{lower}");
        }
    }

    #[test]
    fn other_palaces() {
        use Trigram::*;
        // 既济: 坎宫三世
        let info = classify(bits(Kan, Li)).unwrap();
        assert_eq!((info.palace, info.position), (Kan, PalacePosition::ThirdWorld));
        // 归妹: 兑宫归魂
        let info = classify(bits(Zhen, Dui)).unwrap();
        assert_eq!((info.palace, info.position), (Dui, PalacePosition::ReturningSoul));
        // 明夷: 坎宫游魂
        let info = classify(bits(Kun, Li)).unwrap();
        assert_eq!((info.palace, info.position), (Kan, PalacePosition::RoamingSoul));
    }

    #[test]
    fn classification_is_total_and_balanced() {
        let mut counts = [[0u32; 8]; 8];
        for b in 0u8..64 {
            let info = classify(b).unwrap();
            counts[info.palace as usize][info.position.index()] += 1;
            let (shi, ying) = info.position.shi_ying();
            assert_eq!((i32::from(shi) - i32::from(ying)).rem_euclid(6), 3);
        }
        assert!(counts.iter().flatten().all(|&c| c == 1));
    }
}
