//! Heavenly stems, earthly branches, pillars and the void decade.
//!
//! A [`Pillar`] is one entry of the sixty cycle. Stems and branches only
//! pair when they share polarity, so a pillar is fully identified by its
//! cycle index `0..60` (甲子 = 0, 乙丑 = 1, ..., 癸亥 = 59).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::element::{Element, YinYang};
use crate::error::{CoreError, CoreResult};

/// One of the ten heavenly stems (天干).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stem {
    /// 甲
    Jia,
    /// 乙
    Yi,
    /// 丙
    Bing,
    /// 丁
    Ding,
    /// 戊
    Wu,
    /// 己
    Ji,
    /// 庚
    Geng,
    /// 辛
    Xin,
    /// 壬
    Ren,
    /// 癸
    Gui,
}

const STEM_CHARS: [char; 10] = ['甲', '乙', '丙', '丁', '戊', '己', '庚', '辛', '壬', '癸'];

impl Stem {
    /// All stems in cycle order.
    pub const ALL: [Self; 10] = [
        Self::Jia,
        Self::Yi,
        Self::Bing,
        Self::Ding,
        Self::Wu,
        Self::Ji,
        Self::Geng,
        Self::Xin,
        Self::Ren,
        Self::Gui,
    ];

    /// Cycle index (甲 = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stem at a cycle index, wrapping modulo 10.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 10]
    }

    /// Element carried by the stem: 甲乙木, 丙丁火, 戊己土, 庚辛金, 壬癸水.
    pub fn element(self) -> Element {
        Element::from_index(self.index() / 2)
    }

    /// Polarity: odd-numbered stems (甲丙戊庚壬) are yang.
    pub fn yin_yang(self) -> YinYang {
        if self.index() % 2 == 0 {
            YinYang::Yang
        } else {
            YinYang::Yin
        }
    }

    /// The stem this one combines with (甲己, 乙庚, 丙辛, 丁壬, 戊癸).
    pub fn combination_partner(self) -> Self {
        Self::from_index(self.index() + 5)
    }

    /// Element produced by the five-combination this stem takes part in.
    pub fn combination_element(self) -> Element {
        match self.index() % 5 {
            0 => Element::Earth,
            1 => Element::Metal,
            2 => Element::Water,
            3 => Element::Wood,
            _ => Element::Fire,
        }
    }

    /// The Chinese character.
    pub fn chinese(self) -> char {
        STEM_CHARS[self.index()]
    }

    /// Parse a single Chinese character.
    pub fn from_char(c: char) -> CoreResult<Self> {
        STEM_CHARS
            .iter()
            .position(|&s| s == c)
            .map(Self::from_index)
            .ok_or_else(|| CoreError::UnknownStem(c.to_string()))
    }
}

impl FromStr for Stem {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => Err(CoreError::UnknownStem(trimmed.to_string())),
        }
    }
}

impl std::fmt::Display for Stem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.chinese())
    }
}

/// One of the twelve earthly branches (地支).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Branch {
    /// 子
    Zi,
    /// 丑
    Chou,
    /// 寅
    Yin,
    /// 卯
    Mao,
    /// 辰
    Chen,
    /// 巳
    Si,
    /// 午
    Wu,
    /// 未
    Wei,
    /// 申
    Shen,
    /// 酉
    You,
    /// 戌
    Xu,
    /// 亥
    Hai,
}

const BRANCH_CHARS: [char; 12] = [
    '子', '丑', '寅', '卯', '辰', '巳', '午', '未', '申', '酉', '戌', '亥',
];

const BRANCH_ELEMENTS: [Element; 12] = [
    Element::Water,
    Element::Earth,
    Element::Wood,
    Element::Wood,
    Element::Earth,
    Element::Fire,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Metal,
    Element::Earth,
    Element::Water,
];

impl Branch {
    /// All branches in cycle order.
    pub const ALL: [Self; 12] = [
        Self::Zi,
        Self::Chou,
        Self::Yin,
        Self::Mao,
        Self::Chen,
        Self::Si,
        Self::Wu,
        Self::Wei,
        Self::Shen,
        Self::You,
        Self::Xu,
        Self::Hai,
    ];

    /// Cycle index (子 = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Branch at a cycle index, wrapping modulo 12.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 12]
    }

    /// Element carried by the branch.
    pub fn element(self) -> Element {
        BRANCH_ELEMENTS[self.index()]
    }

    /// Polarity: 子寅辰午申戌 are yang.
    pub fn yin_yang(self) -> YinYang {
        if self.index() % 2 == 0 {
            YinYang::Yang
        } else {
            YinYang::Yin
        }
    }

    /// The branch `steps` places further along the cycle.
    pub fn advance(self, steps: usize) -> Self {
        Self::from_index(self.index() + steps)
    }

    /// Forward distance from `self` to `other`, in `0..12`.
    pub fn distance_to(self, other: Self) -> usize {
        (other.index() + 12 - self.index()) % 12
    }

    /// The Chinese character.
    pub fn chinese(self) -> char {
        BRANCH_CHARS[self.index()]
    }

    /// Parse a single Chinese character.
    pub fn from_char(c: char) -> CoreResult<Self> {
        BRANCH_CHARS
            .iter()
            .position(|&b| b == c)
            .map(Self::from_index)
            .ok_or_else(|| CoreError::UnknownBranch(c.to_string()))
    }
}

impl FromStr for Branch {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => Err(CoreError::UnknownBranch(trimmed.to_string())),
        }
    }
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.chinese())
    }
}

/// A stem-branch pair from the sixty cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pillar {
    /// The heavenly stem.
    pub stem: Stem,
    /// The earthly branch.
    pub branch: Branch,
}

impl Pillar {
    /// Build a pillar, rejecting pairs of mismatched polarity.
    pub fn new(stem: Stem, branch: Branch) -> CoreResult<Self> {
        if stem.yin_yang() != branch.yin_yang() {
            return Err(CoreError::InvalidPillar {
                stem: stem.to_string(),
                branch: branch.to_string(),
            });
        }
        Ok(Self { stem, branch })
    }

    /// The pillar at a cycle index, wrapping modulo 60.
    pub fn from_cycle_index(index: usize) -> Self {
        Self {
            stem: Stem::from_index(index),
            branch: Branch::from_index(index),
        }
    }

    /// Position in the sixty cycle (甲子 = 0).
    pub fn cycle_index(self) -> usize {
        // n ≡ stem (mod 10), n ≡ branch (mod 12)  =>  n = 6·stem − 5·branch (mod 60)
        (6 * self.stem.index() + 60 - 5 * self.branch.index()) % 60
    }

    /// Head pillar (甲X) of the decade this pillar belongs to.
    pub fn xun(self) -> Self {
        let index = self.cycle_index();
        Self::from_cycle_index(index - index % 10)
    }

    /// The two void branches (旬空) of this pillar's decade.
    pub fn kong(self) -> [Branch; 2] {
        let head = self.xun().branch;
        [head.advance(10), head.advance(11)]
    }
}

impl FromStr for Pillar {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(s), Some(b), None) => Self::new(Stem::from_char(s)?, Branch::from_char(b)?),
            (Some(s), _, _) => {
                Stem::from_char(s)?;
                Err(CoreError::UnknownBranch(trimmed.chars().skip(1).collect()))
            }
            _ => Err(CoreError::UnknownStem(trimmed.to_string())),
        }
    }
}

impl std::fmt::Display for Pillar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

/// The four pillars of a moment: year, month, day and hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SexagenaryTime {
    /// Year pillar.
    pub year: Pillar,
    /// Month pillar.
    pub month: Pillar,
    /// Day pillar.
    pub day: Pillar,
    /// Hour pillar.
    pub hour: Pillar,
}

impl SexagenaryTime {
    /// Assemble the four pillars.
    pub fn new(year: Pillar, month: Pillar, day: Pillar, hour: Pillar) -> Self {
        Self {
            year,
            month,
            day,
            hour,
        }
    }

    /// Pillars in ordinal order: year, month, day, hour.
    pub fn pillars(&self) -> [Pillar; 4] {
        [self.year, self.month, self.day, self.hour]
    }

    /// Head pillar of the day's decade.
    pub fn xun(&self) -> Pillar {
        self.day.xun()
    }

    /// Void branches of the day's decade.
    pub fn kong(&self) -> [Branch; 2] {
        self.day.kong()
    }

    /// Returns true if `branch` is void in the day's decade.
    pub fn is_void(&self, branch: Branch) -> bool {
        self.kong().contains(&branch)
    }

    /// Month branch (月建).
    pub fn month_branch(&self) -> Branch {
        self.month.branch
    }

    /// Day branch (日辰).
    pub fn day_branch(&self) -> Branch {
        self.day.branch
    }
}

impl FromStr for SexagenaryTime {
    type Err = CoreError;

    /// Parse four whitespace- or comma-separated pillars, e.g. `"甲子 丙寅 戊午 庚申"`.
    fn from_str(s: &str) -> CoreResult<Self> {
        let parts: Vec<&str> = s
            .split(|c: char| c.is_whitespace() || c == ',' || c == '，')
            .filter(|p| !p.is_empty())
            .collect();
        match parts.as_slice() {
            [y, m, d, h] => Ok(Self::new(y.parse()?, m.parse()?, d.parse()?, h.parse()?)),
            _ => Err(CoreError::PillarCount(parts.len())),
        }
    }
}

impl std::fmt::Display for SexagenaryTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}年 {}月 {}日 {}时",
            self.year, self.month, self.day, self.hour
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_elements() {
        assert_eq!(Stem::Jia.element(), Element::Wood);
        assert_eq!(Stem::Ding.element(), Element::Fire);
        assert_eq!(Stem::Ji.element(), Element::Earth);
        assert_eq!(Stem::Xin.element(), Element::Metal);
        assert_eq!(Stem::Gui.element(), Element::Water);
    }

    #[test]
    fn stem_combinations() {
        assert_eq!(Stem::Jia.combination_partner(), Stem::Ji);
        assert_eq!(Stem::Ji.combination_partner(), Stem::Jia);
        assert_eq!(Stem::Jia.combination_element(), Element::Earth);
        assert_eq!(Stem::Geng.combination_element(), Element::Metal);
        assert_eq!(Stem::Xin.combination_element(), Element::Water);
        assert_eq!(Stem::Ren.combination_element(), Element::Wood);
        assert_eq!(Stem::Gui.combination_element(), Element::Fire);
    }

    #[test]
    fn parse_symbols() {
        assert_eq!("庚".parse::<Stem>(), Ok(Stem::Geng));
        assert_eq!("酉".parse::<Branch>(), Ok(Branch::You));
        assert!(matches!("x".parse::<Stem>(), Err(CoreError::UnknownStem(_))));
        assert!(matches!("甲".parse::<Branch>(), Err(CoreError::UnknownBranch(_))));
    }

    #[test]
    fn pillar_cycle_index_round_trips() {
        for n in 0..60 {
            let p = Pillar::from_cycle_index(n);
            assert_eq!(p.cycle_index(), n, "{p}");
        }
        assert_eq!("戊午".parse::<Pillar>().map(Pillar::cycle_index), Ok(54));
    }

    #[test]
    fn pillar_rejects_mixed_polarity() {
        assert!(matches!(
            Pillar::new(Stem::Jia, Branch::Chou),
            Err(CoreError::InvalidPillar { .. })
        ));
        assert!("甲丑".parse::<Pillar>().is_err());
    }

    #[test]
    fn void_branches_per_decade() {
        let jiazi: Pillar = "乙丑".parse().unwrap();
        assert_eq!(jiazi.kong(), [Branch::Xu, Branch::Hai]);
        let jiaxu: Pillar = "壬午".parse().unwrap();
        assert_eq!(jiaxu.xun().to_string(), "甲戌");
        assert_eq!(jiaxu.kong(), [Branch::Shen, Branch::You]);
        let jiayin: Pillar = "癸亥".parse().unwrap();
        assert_eq!(jiayin.kong(), [Branch::Zi, Branch::Chou]);
    }

    #[test]
    fn void_never_hits_own_day_branch() {
        for n in 0..60 {
            let day = Pillar::from_cycle_index(n);
            let [a, b] = day.kong();
            assert_eq!(a.advance(1), b);
            assert_ne!(a, day.branch);
            assert_ne!(b, day.branch);
        }
    }

    #[test]
    fn parse_sexagenary_time() {
        let t: SexagenaryTime = "甲子 丙寅 戊午，庚申".parse().unwrap();
        assert_eq!(t.day.to_string(), "戊午");
        assert_eq!(t.month_branch(), Branch::Yin);
        assert_eq!(t.to_string(), "甲子年 丙寅月 戊午日 庚申时");
        assert_eq!(
            "甲子 丙寅".parse::<SexagenaryTime>(),
            Err(CoreError::PillarCount(2))
        );
        let err = "甲子 丙寅 戊午 庚申 壬子".parse::<SexagenaryTime>().unwrap_err();
        assert_eq!(err.to_string(), "expected four pillars (year month day hour), got 5");
    }

    #[test]
    fn round_trip_serde() {
        let t: SexagenaryTime = "己卯 丙子 戊午 戊午".parse().unwrap();
        let json = serde_json::to_string(&t).unwrap();
        let back: SexagenaryTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
