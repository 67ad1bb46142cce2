//! Covert spirits (伏神): relations missing from the board, found in the
//! palace's pure hexagram beneath an overt flying spirit (飞神).

use serde::{Deserialize, Serialize};
use yao_core::relations::clashes;
use yao_core::{Branch, Element, SexagenaryTime, SixRelation, Stem};

use crate::builder::Hexagram;

/// The overt line a covert spirit hides beneath.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlyingSpirit {
    /// Branch of the overt line.
    pub branch: Branch,
    /// Element of the overt line.
    pub element: Element,
    /// Relation of the overt line.
    pub relation: SixRelation,
}

/// A relation recovered from the palace's pure hexagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CovertSpirit {
    /// The missing relation.
    pub relation: SixRelation,
    /// Position in the pure hexagram, 1 = bottom.
    pub position: u8,
    /// Stem of the pure hexagram line.
    pub stem: Stem,
    /// Branch of the pure hexagram line.
    pub branch: Branch,
    /// Element of the branch.
    pub element: Element,
    /// The overt line at the same position.
    pub flying: FlyingSpirit,
    /// The covert spirit can come out.
    pub available: bool,
    /// Why it can or cannot.
    pub reason: String,
}

/// Whether a covert spirit can surface, with the reason; the first matching
/// rule decides.
pub fn availability(
    covert: Branch,
    flying: Branch,
    time: &SexagenaryTime,
) -> (bool, &'static str) {
    let (covert_el, flying_el) = (covert.element(), flying.element());
    if flying_el.controls() == covert_el {
        (false, "飞神克伏神")
    } else if time.is_void(covert) {
        (false, "伏神空亡")
    } else if flying_el.generates() == covert_el {
        (true, "飞神生伏神")
    } else if time.month_branch().element().generates() == covert_el
        || time.day_branch().element().generates() == covert_el
    {
        (true, "日月生伏神")
    } else if clashes(time.day_branch(), covert) {
        (true, "日冲伏神可出")
    } else {
        (false, "伏神无助")
    }
}

/// Look up `relation` in the pure hexagram of `hex`'s palace.
pub fn find(hex: &Hexagram, relation: SixRelation, time: &SexagenaryTime) -> Option<CovertSpirit> {
    let palace = hex.palace.palace;
    let (index, branch) = palace
        .pure_branches()
        .into_iter()
        .enumerate()
        .find(|(_, b)| SixRelation::of(hex.palace_element, b.element()) == relation)?;
    let overt = &hex.lines[index];
    let (available, reason) = availability(branch, overt.branch, time);
    Some(CovertSpirit {
        relation,
        position: index as u8 + 1,
        stem: if index < 3 {
            palace.inner_stem()
        } else {
            palace.outer_stem()
        },
        branch,
        element: branch.element(),
        flying: FlyingSpirit {
            branch: overt.branch,
            element: overt.element,
            relation: overt.relation,
        },
        available,
        reason: reason.to_string(),
    })
}

/// Covert spirits for every relation absent from the board.
pub fn find_all(hex: &Hexagram, time: &SexagenaryTime) -> Vec<CovertSpirit> {
    hex.missing_relations()
        .into_iter()
        .filter_map(|r| find(hex, r, time))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;
    use crate::cast::{cast_numbers, static_lines};
    use yao_core::Trigram;

    fn time(s: &str) -> SexagenaryTime {
        s.parse().unwrap()
    }

    #[test]
    fn bo_hides_sibling_under_zi() {
        let hex = build(&cast_numbers(7, 8).unwrap(), Stem::Jia).unwrap();
        let found = find_all(&hex, &time("甲子 丙寅 甲子 甲子"));
        assert_eq!(found.len(), 1);
        let covert = &found[0];
        assert_eq!(covert.relation, SixRelation::Sibling);
        assert_eq!((covert.position, covert.branch), (5, Branch::Shen));
        assert_eq!(covert.stem, Stem::Ren);
        assert_eq!(covert.flying.branch, Branch::Zi);
    }

    #[test]
    fn water_flying_feeds_wood_covert() {
        // 天风姤 lacks 妻财; 乾为天 has 寅 at 2 beneath 亥.
        let hex = build(&static_lines(Trigram::Qian, Trigram::Xun), Stem::Jia).unwrap();
        let covert = find(&hex, SixRelation::Wealth, &time("甲子 丙寅 甲子 甲子")).unwrap();
        assert_eq!((covert.position, covert.branch), (2, Branch::Yin));
        assert_eq!(covert.flying.branch, Branch::Hai);
        assert!(covert.available);
        assert_eq!(covert.reason, "飞神生伏神");
    }

    #[test]
    fn flying_control_blocks() {
        // 水火既济 lacks 妻财; 坎为水 has 午 at 3 beneath 亥.
        let hex = build(&static_lines(Trigram::Kan, Trigram::Li), Stem::Jia).unwrap();
        let covert = find(&hex, SixRelation::Wealth, &time("甲子 丙寅 甲子 甲子")).unwrap();
        assert_eq!((covert.position, covert.branch), (3, Branch::Wu));
        assert!(!covert.available);
        assert_eq!(covert.reason, "飞神克伏神");
    }

    #[test]
    fn availability_order() {
        let t = time("甲子 丙寅 甲子 甲子"); // voids 戌亥
        assert_eq!(availability(Branch::Hai, Branch::Shen, &t), (false, "伏神空亡"));
        assert_eq!(availability(Branch::Wu, Branch::Zi, &t), (false, "飞神克伏神"));
        // 寅 month wood feeds 巳 fire
        assert_eq!(availability(Branch::Si, Branch::Wu, &t), (true, "日月生伏神"));
        // 子 day clashes 午; flying 未 neither feeds nor controls
        let t = time("甲子 丁丑 甲子 甲子");
        assert_eq!(availability(Branch::Wu, Branch::Wei, &t), (true, "日冲伏神可出"));
        assert!(!availability(Branch::Mao, Branch::You, &t).0);
    }
}
