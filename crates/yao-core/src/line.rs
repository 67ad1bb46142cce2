//! Line types produced by casting.

use serde::{Deserialize, Serialize};

use crate::element::YinYang;

/// The four kinds of cast line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineType {
    /// 少阳: static yang (tally 7).
    YoungYang,
    /// 少阴: static yin (tally 8).
    YoungYin,
    /// 老阳: moving yang (tally 9).
    OldYang,
    /// 老阴: moving yin (tally 6).
    OldYin,
}

impl LineType {
    /// Static line of the given polarity.
    pub fn fixed(polarity: YinYang) -> Self {
        match polarity {
            YinYang::Yang => Self::YoungYang,
            YinYang::Yin => Self::YoungYin,
        }
    }

    /// Moving line of the given polarity.
    pub fn moving(polarity: YinYang) -> Self {
        match polarity {
            YinYang::Yang => Self::OldYang,
            YinYang::Yin => Self::OldYin,
        }
    }

    /// Polarity of the line as cast.
    pub fn polarity(self) -> YinYang {
        match self {
            Self::YoungYang | Self::OldYang => YinYang::Yang,
            Self::YoungYin | Self::OldYin => YinYang::Yin,
        }
    }

    /// Returns true for 老阳 and 老阴.
    pub fn is_moving(self) -> bool {
        matches!(self, Self::OldYang | Self::OldYin)
    }

    /// The same polarity, upgraded to moving.
    pub fn to_moving(self) -> Self {
        Self::moving(self.polarity())
    }

    /// What the line becomes in the transformed hexagram.
    ///
    /// Moving lines flip polarity and settle; static lines are unchanged.
    pub fn transformed(self) -> Self {
        if self.is_moving() {
            Self::fixed(self.polarity().flip())
        } else {
            self
        }
    }

    /// Traditional tally: 6 老阴, 7 少阳, 8 少阴, 9 老阳.
    pub fn number(self) -> u8 {
        match self {
            Self::OldYin => 6,
            Self::YoungYang => 7,
            Self::YoungYin => 8,
            Self::OldYang => 9,
        }
    }

    /// Line for a traditional tally, or `None` outside 6..=9.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            6 => Some(Self::OldYin),
            7 => Some(Self::YoungYang),
            8 => Some(Self::YoungYin),
            9 => Some(Self::OldYang),
            _ => None,
        }
    }

    /// Chinese name.
    pub fn chinese(self) -> &'static str {
        match self {
            Self::YoungYang => "少阳",
            Self::YoungYin => "少阴",
            Self::OldYang => "老阳",
            Self::OldYin => "老阴",
        }
    }

    /// Glyph used when drawing a hexagram, with the moving mark.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::YoungYang => "▅▅▅▅▅  ",
            Self::YoungYin => "▅▅ ▅▅  ",
            Self::OldYang => "▅▅▅▅▅ ○",
            Self::OldYin => "▅▅ ▅▅ ×",
        }
    }
}

impl std::fmt::Display for LineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.chinese())
    }
}

/// Six-bit yang mask of a set of lines, bit 0 = position 1.
pub fn yang_bits(lines: &[LineType; 6]) -> u8 {
    lines
        .iter()
        .enumerate()
        .filter(|(_, l)| l.polarity().is_yang())
        .fold(0, |acc, (i, _)| acc | (1 << i))
}

/// Six-bit mask of moving positions, bit 0 = position 1.
pub fn moving_bits(lines: &[LineType; 6]) -> u8 {
    lines
        .iter()
        .enumerate()
        .filter(|(_, l)| l.is_moving())
        .fold(0, |acc, (i, _)| acc | (1 << i))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_round_trip() {
        for n in 6..=9 {
            let line = LineType::from_number(n).unwrap();
            assert_eq!(line.number(), n);
        }
        assert_eq!(LineType::from_number(5), None);
    }

    #[test]
    fn transform_flips_only_moving() {
        assert_eq!(LineType::OldYang.transformed(), LineType::YoungYin);
        assert_eq!(LineType::OldYin.transformed(), LineType::YoungYang);
        assert_eq!(LineType::YoungYin.transformed(), LineType::YoungYin);
    }

    #[test]
    fn upgrade_keeps_polarity() {
        assert_eq!(LineType::YoungYin.to_moving(), LineType::OldYin);
        assert_eq!(LineType::OldYang.to_moving(), LineType::OldYang);
    }

    #[test]
    fn bit_masks() {
        use LineType::*;
        let lines = [YoungYang, OldYin, YoungYin, OldYang, YoungYin, YoungYang];
        assert_eq!(yang_bits(&lines), 0b101001);
        assert_eq!(moving_bits(&lines), 0b001010);
    }
}
