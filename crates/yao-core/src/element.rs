//! The five elements (五行), polarity, and the generation/control cycles.
//!
//! Elements are indexed in generation order: 木 → 火 → 土 → 金 → 水 → 木.
//! With that ordering, `i` generates `i + 1` and controls `i + 2` (mod 5),
//! so every pairwise relation falls out of one subtraction.

use serde::{Deserialize, Serialize};

/// One of the five elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Element {
    /// 木
    Wood,
    /// 火
    Fire,
    /// 土
    Earth,
    /// 金
    Metal,
    /// 水
    Water,
}

impl Element {
    /// All elements in generation order.
    pub const ALL: [Self; 5] = [
        Self::Wood,
        Self::Fire,
        Self::Earth,
        Self::Metal,
        Self::Water,
    ];

    /// Position in the generation cycle (木 = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Element at a generation-cycle index, wrapping modulo 5.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 5]
    }

    /// The element this one generates (木 → 火).
    pub fn generates(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// The element this one controls (木 → 土).
    pub fn controls(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// The element that generates this one (火 ← 木).
    pub fn generator(self) -> Self {
        Self::from_index(self.index() + 4)
    }

    /// The element that controls this one (土 ← 木).
    pub fn controller(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// How `self` stands towards `other`.
    pub fn relation_to(self, other: Self) -> ElementRelation {
        match (other.index() + 5 - self.index()) % 5 {
            0 => ElementRelation::Same,
            1 => ElementRelation::Generates,
            2 => ElementRelation::Controls,
            3 => ElementRelation::ControlledBy,
            _ => ElementRelation::GeneratedBy,
        }
    }

    /// Chinese name of the element.
    pub fn chinese(self) -> &'static str {
        match self {
            Self::Wood => "木",
            Self::Fire => "火",
            Self::Earth => "土",
            Self::Metal => "金",
            Self::Water => "水",
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.chinese())
    }
}

/// Directed relation between two elements, read as "`from` ... `to`".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementRelation {
    /// Both sides are the same element (比和).
    Same,
    /// `from` generates `to`.
    Generates,
    /// `to` generates `from`.
    GeneratedBy,
    /// `from` controls `to`.
    Controls,
    /// `to` controls `from`.
    ControlledBy,
}

/// Yin or yang polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YinYang {
    /// 阳
    Yang,
    /// 阴
    Yin,
}

impl YinYang {
    /// The opposite polarity.
    pub fn flip(self) -> Self {
        match self {
            Self::Yang => Self::Yin,
            Self::Yin => Self::Yang,
        }
    }

    /// Returns true for yang.
    pub fn is_yang(self) -> bool {
        self == Self::Yang
    }
}

impl std::fmt::Display for YinYang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yang => write!(f, "阳"),
            Self::Yin => write!(f, "阴"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_cycle() {
        assert_eq!(Element::Wood.generates(), Element::Fire);
        assert_eq!(Element::Water.generates(), Element::Wood);
        assert_eq!(Element::Metal.generator(), Element::Earth);
    }

    #[test]
    fn control_cycle() {
        assert_eq!(Element::Wood.controls(), Element::Earth);
        assert_eq!(Element::Metal.controls(), Element::Wood);
        assert_eq!(Element::Water.controls(), Element::Fire);
        assert_eq!(Element::Wood.controller(), Element::Metal);
    }

    #[test]
    fn cycles_have_period_five() {
        for e in Element::ALL {
            let mut g = e;
            let mut c = e;
            for _ in 0..5 {
                g = g.generator();
                c = c.controller();
            }
            assert_eq!(g, e);
            assert_eq!(c, e);
        }
    }

    #[test]
    fn relation_is_total_and_consistent() {
        for a in Element::ALL {
            for b in Element::ALL {
                let rel = a.relation_to(b);
                let expected = if a == b {
                    ElementRelation::Same
                } else if a.generates() == b {
                    ElementRelation::Generates
                } else if b.generates() == a {
                    ElementRelation::GeneratedBy
                } else if a.controls() == b {
                    ElementRelation::Controls
                } else {
                    ElementRelation::ControlledBy
                };
                assert_eq!(rel, expected, "{a} -> {b}");
            }
        }
    }

    #[test]
    fn polarity_flip() {
        assert_eq!(YinYang::Yang.flip(), YinYang::Yin);
        assert!(!YinYang::Yin.is_yang());
    }

    #[test]
    fn display() {
        assert_eq!(Element::Metal.to_string(), "金");
        assert_eq!(YinYang::Yin.to_string(), "阴");
    }
}
