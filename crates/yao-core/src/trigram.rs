//! The eight trigrams and their Na-Jia (纳甲) attributions.
//!
//! Trigrams are numbered in Earlier-Heaven order, 1 乾 to 8 坤, which is the
//! numbering number-casting uses. Each trigram is also a 3-bit pattern with
//! bit 0 as the bottom line and a set bit meaning yang.

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::ganzhi::{Branch, Stem};

/// One of the eight trigrams (八卦).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Trigram {
    /// 乾 ☰
    Qian,
    /// 兑 ☱
    Dui,
    /// 离 ☲
    Li,
    /// 震 ☳
    Zhen,
    /// 巽 ☴
    Xun,
    /// 坎 ☵
    Kan,
    /// 艮 ☶
    Gen,
    /// 坤 ☷
    Kun,
}

/// Na-Jia of one trigram: stem and branches for the inner and outer slot.
struct NaJia {
    inner_stem: Stem,
    outer_stem: Stem,
    inner: [Branch; 3],
    outer: [Branch; 3],
}

use Branch::*;

const NAJIA: [NaJia; 8] = [
    // 乾
    NaJia {
        inner_stem: Stem::Jia,
        outer_stem: Stem::Ren,
        inner: [Zi, Yin, Chen],
        outer: [Wu, Shen, Xu],
    },
    // 兑
    NaJia {
        inner_stem: Stem::Ding,
        outer_stem: Stem::Ding,
        inner: [Si, Mao, Chou],
        outer: [Hai, You, Wei],
    },
    // 离
    NaJia {
        inner_stem: Stem::Ji,
        outer_stem: Stem::Ji,
        inner: [Mao, Chou, Hai],
        outer: [You, Wei, Si],
    },
    // 震
    NaJia {
        inner_stem: Stem::Geng,
        outer_stem: Stem::Geng,
        inner: [Zi, Yin, Chen],
        outer: [Wu, Shen, Xu],
    },
    // 巽
    NaJia {
        inner_stem: Stem::Xin,
        outer_stem: Stem::Xin,
        inner: [Chou, Hai, You],
        outer: [Wei, Si, Mao],
    },
    // 坎
    NaJia {
        inner_stem: Stem::Wu,
        outer_stem: Stem::Wu,
        inner: [Yin, Chen, Wu],
        outer: [Shen, Xu, Zi],
    },
    // 艮
    NaJia {
        inner_stem: Stem::Bing,
        outer_stem: Stem::Bing,
        inner: [Chen, Wu, Shen],
        outer: [Xu, Zi, Yin],
    },
    // 坤
    NaJia {
        inner_stem: Stem::Yi,
        outer_stem: Stem::Gui,
        inner: [Wei, Si, Mao],
        outer: [Chou, Hai, You],
    },
];

impl Trigram {
    /// All trigrams in Earlier-Heaven order.
    pub const ALL: [Self; 8] = [
        Self::Qian,
        Self::Dui,
        Self::Li,
        Self::Zhen,
        Self::Xun,
        Self::Kan,
        Self::Gen,
        Self::Kun,
    ];

    /// Earlier-Heaven number, 1 (乾) to 8 (坤).
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    /// Trigram for a casting number: `((n - 1) mod 8) + 1`. Zero maps to 坤.
    pub fn from_number(n: u32) -> Self {
        Self::ALL[(n.wrapping_sub(1) % 8) as usize]
    }

    /// Line pattern, bit 0 = bottom line, set = yang.
    pub fn bits(self) -> u8 {
        match self {
            Self::Qian => 0b111,
            Self::Dui => 0b011,
            Self::Li => 0b101,
            Self::Zhen => 0b001,
            Self::Xun => 0b110,
            Self::Kan => 0b010,
            Self::Gen => 0b100,
            Self::Kun => 0b000,
        }
    }

    /// Trigram for a 3-bit pattern (higher bits are ignored).
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0b111 => Self::Qian,
            0b011 => Self::Dui,
            0b101 => Self::Li,
            0b001 => Self::Zhen,
            0b110 => Self::Xun,
            0b010 => Self::Kan,
            0b100 => Self::Gen,
            _ => Self::Kun,
        }
    }

    /// Element of the trigram (and of the palace it heads).
    pub fn element(self) -> Element {
        match self {
            Self::Qian | Self::Dui => Element::Metal,
            Self::Li => Element::Fire,
            Self::Zhen | Self::Xun => Element::Wood,
            Self::Kan => Element::Water,
            Self::Gen | Self::Kun => Element::Earth,
        }
    }

    /// Single-character name.
    pub fn chinese(self) -> &'static str {
        match self {
            Self::Qian => "乾",
            Self::Dui => "兑",
            Self::Li => "离",
            Self::Zhen => "震",
            Self::Xun => "巽",
            Self::Kan => "坎",
            Self::Gen => "艮",
            Self::Kun => "坤",
        }
    }

    /// Natural image used in hexagram names (天泽火雷风水山地).
    pub fn image(self) -> &'static str {
        match self {
            Self::Qian => "天",
            Self::Dui => "泽",
            Self::Li => "火",
            Self::Zhen => "雷",
            Self::Xun => "风",
            Self::Kan => "水",
            Self::Gen => "山",
            Self::Kun => "地",
        }
    }

    fn najia(self) -> &'static NaJia {
        &NAJIA[self as usize]
    }

    /// Stem attached to the trigram in the inner (lower) slot.
    pub fn inner_stem(self) -> Stem {
        self.najia().inner_stem
    }

    /// Stem attached to the trigram in the outer (upper) slot.
    pub fn outer_stem(self) -> Stem {
        self.najia().outer_stem
    }

    /// Branches of the three lines when the trigram sits below.
    pub fn inner_branches(self) -> [Branch; 3] {
        self.najia().inner
    }

    /// Branches of the three lines when the trigram sits above.
    pub fn outer_branches(self) -> [Branch; 3] {
        self.najia().outer
    }

    /// Branches of the pure hexagram this trigram heads, positions 1..=6.
    pub fn pure_branches(self) -> [Branch; 6] {
        let [a, b, c] = self.inner_branches();
        let [d, e, f] = self.outer_branches();
        [a, b, c, d, e, f]
    }
}

impl std::fmt::Display for Trigram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.chinese())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_round_trip() {
        for t in Trigram::ALL {
            assert_eq!(Trigram::from_number(t.number()), t);
        }
        assert_eq!(Trigram::from_number(7), Trigram::Gen);
        assert_eq!(Trigram::from_number(8), Trigram::Kun);
        assert_eq!(Trigram::from_number(9), Trigram::Qian);
    }

    #[test]
    fn bits_round_trip_and_are_distinct() {
        let mut seen = [false; 8];
        for t in Trigram::ALL {
            assert_eq!(Trigram::from_bits(t.bits()), t);
            assert!(!seen[t.bits() as usize]);
            seen[t.bits() as usize] = true;
        }
    }

    #[test]
    fn qian_najia() {
        assert_eq!(Trigram::Qian.inner_stem(), Stem::Jia);
        assert_eq!(Trigram::Qian.outer_stem(), Stem::Ren);
        assert_eq!(Trigram::Qian.pure_branches(), [Zi, Yin, Chen, Wu, Shen, Xu]);
    }

    #[test]
    fn yang_trigrams_advance_yin_trigrams_retreat() {
        // Yang trigrams step forward two branches per line, yin ones backward.
        for t in Trigram::ALL {
            let b = t.pure_branches();
            let step = if matches!(t, Trigram::Qian | Trigram::Zhen | Trigram::Kan | Trigram::Gen)
            {
                2
            } else {
                10
            };
            for w in b.windows(2) {
                assert_eq!(w[0].advance(step), w[1], "{t}");
            }
        }
    }
}
