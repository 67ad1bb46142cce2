//! Hexagram synthesis: palace, world/response lines, Na-Jia, six relations
//! and six spirits.
//!
//! Stems follow the palace trigram (inner stem on lines 1-3, outer stem on
//! lines 4-6). Branches follow the hexagram's own trigrams, the lower one in
//! its inner slot and the upper one in its outer slot.

use serde::{Deserialize, Serialize};
use yao_core::line::{moving_bits, yang_bits};
use yao_core::palace::{hexagram_bits, lower_trigram, upper_trigram};
use yao_core::{
    Branch, Element, LineType, PalaceInfo, PalacePosition, SixRelation, SixSpirit, Stem, Trigram,
    classify, hexagram_name,
};

use crate::cast::Lines;
use crate::error::EngineResult;

/// One line of a built hexagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Position, 1 = bottom.
    pub position: u8,
    /// The cast line type.
    pub line_type: LineType,
    /// Na-Jia stem.
    pub stem: Stem,
    /// Na-Jia branch.
    pub branch: Branch,
    /// Element of the branch.
    pub element: Element,
    /// Six relation against the palace element.
    pub relation: SixRelation,
    /// Six spirit for the day stem.
    pub spirit: SixSpirit,
    /// World line (世).
    pub is_shi: bool,
    /// Response line (应).
    pub is_ying: bool,
}

impl Line {
    /// Returns true for 老阳 and 老阴.
    pub fn is_moving(&self) -> bool {
        self.line_type.is_moving()
    }

    /// Marker for the world/response column.
    pub fn marker(&self) -> &'static str {
        match (self.is_shi, self.is_ying) {
            (true, _) => "世",
            (_, true) => "应",
            _ => "",
        }
    }
}

/// A hexagram with every line attributed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hexagram {
    /// Full name, e.g. `山地剥`.
    pub name: String,
    /// Upper trigram.
    pub upper: Trigram,
    /// Lower trigram.
    pub lower: Trigram,
    /// Palace and generation.
    pub palace: PalaceInfo,
    /// Element of the palace trigram.
    pub palace_element: Element,
    /// World line position.
    pub shi: u8,
    /// Response line position.
    pub ying: u8,
    /// Hexagram body (卦身).
    pub body: Branch,
    /// Lines, index 0 = bottom.
    pub lines: [Line; 6],
}

impl Hexagram {
    /// The line at `position` (1 = bottom).
    pub fn line(&self, position: u8) -> Option<&Line> {
        self.lines.get(usize::from(position).checked_sub(1)?)
    }

    /// The six cast line types.
    pub fn line_types(&self) -> Lines {
        self.lines.map(|l| l.line_type)
    }

    /// Six-bit yang pattern, bit 0 = bottom.
    pub fn bits(&self) -> u8 {
        yang_bits(&self.line_types())
    }

    /// Positions of moving lines, bottom first.
    pub fn moving_positions(&self) -> Vec<u8> {
        self.lines
            .iter()
            .filter(|l| l.is_moving())
            .map(|l| l.position)
            .collect()
    }

    /// Positions carrying `relation`, bottom first.
    pub fn positions_of(&self, relation: SixRelation) -> Vec<u8> {
        self.lines
            .iter()
            .filter(|l| l.relation == relation)
            .map(|l| l.position)
            .collect()
    }

    /// Relations that no line carries, in [`SixRelation::ALL`] order.
    pub fn missing_relations(&self) -> Vec<SixRelation> {
        SixRelation::ALL
            .into_iter()
            .filter(|r| self.lines.iter().all(|l| l.relation != *r))
            .collect()
    }

    /// The world line.
    pub fn shi_line(&self) -> &Line {
        &self.lines[usize::from(self.shi - 1)]
    }
}

impl std::fmt::Display for Hexagram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let palace = self.palace.palace.chinese();
        match self.palace.position {
            PalacePosition::Pure => write!(f, "{}（{}宫首卦）", self.name, palace),
            position => write!(f, "{}（{}宫{}）", self.name, palace, position),
        }
    }
}

/// Name, trigrams and palace of a derived hexagram without line detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HexagramSummary {
    /// Full name.
    pub name: String,
    /// Upper trigram.
    pub upper: Trigram,
    /// Lower trigram.
    pub lower: Trigram,
    /// Palace and generation.
    pub palace: PalaceInfo,
}

/// Build the hexagram spelled by `lines`, relating lines to its own palace.
pub fn build(lines: &Lines, day_stem: Stem) -> EngineResult<Hexagram> {
    assemble(lines, day_stem, None)
}

/// Build the base hexagram and, when any line moves, the transformed one.
///
/// The transformed hexagram takes its own palace, world line and Na-Jia,
/// but its six relations are read against the base palace element.
pub fn build_pair(lines: &Lines, day_stem: Stem) -> EngineResult<(Hexagram, Option<Hexagram>)> {
    let base = build(lines, day_stem)?;
    if moving_bits(lines) == 0 {
        return Ok((base, None));
    }
    let changed = lines.map(LineType::transformed);
    let transformed = assemble(&changed, day_stem, Some(base.palace_element))?;
    Ok((base, Some(transformed)))
}

/// The nuclear hexagram (互卦): lines 2-4 below, lines 3-5 above.
pub fn nuclear(lines: &Lines) -> EngineResult<HexagramSummary> {
    let bits = yang_bits(lines);
    let lower = Trigram::from_bits((bits >> 1) & 0b111);
    let upper = Trigram::from_bits((bits >> 2) & 0b111);
    let palace = classify(hexagram_bits(upper, lower))?;
    Ok(HexagramSummary {
        name: hexagram_name(upper, lower).to_string(),
        upper,
        lower,
        palace,
    })
}

/// Hexagram body (卦身): a yang world line counts from 子, a yin one from 午.
pub fn body_branch(world_line: LineType, shi: u8) -> Branch {
    let start = if world_line.polarity().is_yang() {
        Branch::Zi
    } else {
        Branch::Wu
    };
    start.advance(usize::from(shi.saturating_sub(1)))
}

fn assemble(lines: &Lines, day_stem: Stem, relate_to: Option<Element>) -> EngineResult<Hexagram> {
    let bits = yang_bits(lines);
    let palace = classify(bits)?;
    let (lower, upper) = (lower_trigram(bits), upper_trigram(bits));
    let palace_element = palace.palace.element();
    let relation_element = relate_to.unwrap_or(palace_element);
    let (shi, ying) = (palace.shi(), palace.ying());

    let branches: [Branch; 6] = {
        let [a, b, c] = lower.inner_branches();
        let [d, e, f] = upper.outer_branches();
        [a, b, c, d, e, f]
    };
    let built = std::array::from_fn(|i| {
        let position = i as u8 + 1;
        let stem = if i < 3 {
            palace.palace.inner_stem()
        } else {
            palace.palace.outer_stem()
        };
        let branch = branches[i];
        Line {
            position,
            line_type: lines[i],
            stem,
            branch,
            element: branch.element(),
            relation: SixRelation::of(relation_element, branch.element()),
            spirit: SixSpirit::for_line(day_stem, i + 1),
            is_shi: position == shi,
            is_ying: position == ying,
        }
    });

    Ok(Hexagram {
        name: hexagram_name(upper, lower).to_string(),
        upper,
        lower,
        palace,
        palace_element,
        shi,
        ying,
        body: body_branch(lines[usize::from(shi - 1)], shi),
        lines: built,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cast::{cast_numbers, static_lines};
    use Branch::*;

    #[test]
    fn bo_attribution() {
        let (base, transformed) = build_pair(&cast_numbers(7, 8).unwrap(), Stem::Jia).unwrap();
        assert_eq!(base.name, "山地剥");
        assert_eq!(base.palace.palace, Trigram::Qian);
        assert_eq!(base.palace.position, PalacePosition::FifthWorld);
        assert_eq!((base.shi, base.ying), (5, 2));
        let branches: Vec<Branch> = base.lines.iter().map(|l| l.branch).collect();
        assert_eq!(branches, [Wei, Si, Mao, Xu, Zi, Yin]);
        assert_eq!(base.lines[0].stem, Stem::Jia);
        assert_eq!(base.lines[5].stem, Stem::Ren);
        assert_eq!(base.missing_relations(), [SixRelation::Sibling]);
        assert_eq!(base.moving_positions(), [3]);

        let transformed = transformed.unwrap();
        assert_eq!(transformed.name, "艮为山");
        // relations stay on the 乾 palace element
        assert_eq!(transformed.lines[2].branch, Shen);
        assert_eq!(transformed.lines[2].relation, SixRelation::Sibling);
    }

    #[test]
    fn static_hexagram_has_no_transform() {
        let lines = static_lines(Trigram::Qian, Trigram::Qian);
        let (base, transformed) = build_pair(&lines, Stem::Jia).unwrap();
        assert!(transformed.is_none());
        assert_eq!((base.shi, base.ying), (6, 3));
        assert_eq!(base.to_string(), "乾为天（乾宫首卦）");
    }

    #[test]
    fn spirits_rotate_from_day_stem() {
        let lines = static_lines(Trigram::Kun, Trigram::Kun);
        let hex = build(&lines, Stem::Wu).unwrap();
        assert_eq!(hex.lines[0].spirit, SixSpirit::Gouchen);
        assert_eq!(hex.lines[5].spirit, SixSpirit::VermilionBird);
    }

    #[test]
    fn world_and_response_marked_once() {
        let hex = build(&cast_numbers(3, 5).unwrap(), Stem::Bing).unwrap();
        assert_eq!(hex.lines.iter().filter(|l| l.is_shi).count(), 1);
        assert_eq!(hex.lines.iter().filter(|l| l.is_ying).count(), 1);
        assert_eq!(hex.shi_line().marker(), "世");
    }

    #[test]
    fn nuclear_of_bo_is_kun() {
        let summary = nuclear(&cast_numbers(7, 8).unwrap()).unwrap();
        assert_eq!(summary.name, "坤为地");
        let summary = nuclear(&static_lines(Trigram::Kan, Trigram::Li)).unwrap();
        assert_eq!(summary.name, "火水未济");
    }

    #[test]
    fn body_counts_from_world_polarity() {
        assert_eq!(body_branch(LineType::YoungYang, 1), Zi);
        assert_eq!(body_branch(LineType::OldYin, 3), Shen);
        assert_eq!(body_branch(LineType::YoungYang, 6), Si);
    }
}
