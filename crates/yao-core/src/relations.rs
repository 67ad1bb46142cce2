//! Branch interactions and the derived classifications of a line.
//!
//! Covers six-clash, six-harmony, six-harm, six-break, punishments,
//! three-harmony and three-meeting groups, tombs, the twelve life stages,
//! seasonal strength, the six relations (六亲) and the six spirits (六神).

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementRelation};
use crate::ganzhi::{Branch, Stem};

/// Six-clash (六冲): branches six apart.
pub fn clashes(a: Branch, b: Branch) -> bool {
    a.distance_to(b) == 6
}

/// Six-harmony (六合): 子丑, 寅亥, 卯戌, 辰酉, 巳申, 午未.
pub fn harmonizes(a: Branch, b: Branch) -> bool {
    (a.index() + b.index()) % 12 == 1
}

/// Element produced by a six-harmony pair, if the pair harmonizes.
pub fn harmony_element(a: Branch, b: Branch) -> Option<Element> {
    if !harmonizes(a, b) {
        return None;
    }
    let low = a.index().min(b.index());
    Some(match low {
        0 | 6 => Element::Earth,
        2 => Element::Wood,
        3 => Element::Fire,
        4 => Element::Metal,
        _ => Element::Water,
    })
}

/// Six-harm (六害): 子未, 丑午, 寅巳, 卯辰, 申亥, 酉戌.
pub fn harms(a: Branch, b: Branch) -> bool {
    (a.index() + b.index()) % 12 == 7
}

const BREAK_PAIRS: [(Branch, Branch); 6] = [
    (Branch::Zi, Branch::You),
    (Branch::Mao, Branch::Wu),
    (Branch::Chen, Branch::Chou),
    (Branch::Wei, Branch::Xu),
    (Branch::Yin, Branch::Hai),
    (Branch::Si, Branch::Shen),
];

/// Six-break (六破): 子酉, 卯午, 辰丑, 未戌, 寅亥, 巳申.
pub fn breaks(a: Branch, b: Branch) -> bool {
    BREAK_PAIRS
        .iter()
        .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
}

/// The three-branch punishment groups (寅巳申, 丑戌未).
pub const PUNISHMENT_TRIOS: [[Branch; 3]; 2] = [
    [Branch::Yin, Branch::Si, Branch::Shen],
    [Branch::Chou, Branch::Xu, Branch::Wei],
];

/// The rude punishment pair (子卯).
pub const PUNISHMENT_PAIR: [Branch; 2] = [Branch::Zi, Branch::Mao];

/// Branches that punish themselves (辰午酉亥).
pub const SELF_PUNISHMENT: [Branch; 4] = [Branch::Chen, Branch::Wu, Branch::You, Branch::Hai];

/// Returns true if `a` punishes `b` under any of the punishment rules.
pub fn punishes(a: Branch, b: Branch) -> bool {
    if a == b {
        return SELF_PUNISHMENT.contains(&a);
    }
    let in_trio = PUNISHMENT_TRIOS
        .iter()
        .any(|trio| trio.contains(&a) && trio.contains(&b));
    in_trio || (PUNISHMENT_PAIR.contains(&a) && PUNISHMENT_PAIR.contains(&b))
}

/// A three-branch group with the element it forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchGroup {
    /// The member branches.
    pub members: [Branch; 3],
    /// The element of the bureau.
    pub element: Element,
}

/// Three-harmony groups (三合局): 申子辰水, 亥卯未木, 寅午戌火, 巳酉丑金.
pub const THREE_HARMONY: [BranchGroup; 4] = [
    BranchGroup {
        members: [Branch::Shen, Branch::Zi, Branch::Chen],
        element: Element::Water,
    },
    BranchGroup {
        members: [Branch::Hai, Branch::Mao, Branch::Wei],
        element: Element::Wood,
    },
    BranchGroup {
        members: [Branch::Yin, Branch::Wu, Branch::Xu],
        element: Element::Fire,
    },
    BranchGroup {
        members: [Branch::Si, Branch::You, Branch::Chou],
        element: Element::Metal,
    },
];

/// Three-meeting groups (三会局): 寅卯辰木, 巳午未火, 申酉戌金, 亥子丑水.
pub const THREE_MEETING: [BranchGroup; 4] = [
    BranchGroup {
        members: [Branch::Yin, Branch::Mao, Branch::Chen],
        element: Element::Wood,
    },
    BranchGroup {
        members: [Branch::Si, Branch::Wu, Branch::Wei],
        element: Element::Fire,
    },
    BranchGroup {
        members: [Branch::Shen, Branch::You, Branch::Xu],
        element: Element::Metal,
    },
    BranchGroup {
        members: [Branch::Hai, Branch::Zi, Branch::Chou],
        element: Element::Water,
    },
];

/// Tomb branch (墓库) of an element: 木未, 火戌, 土戌, 金丑, 水辰.
pub fn tomb_of(element: Element) -> Branch {
    match element {
        Element::Wood => Branch::Wei,
        Element::Fire | Element::Earth => Branch::Xu,
        Element::Metal => Branch::Chou,
        Element::Water => Branch::Chen,
    }
}

/// Returns true if `a` and `b` form a stem five-combination (天干五合).
pub fn stems_combine(a: Stem, b: Stem) -> bool {
    a.combination_partner() == b
}

/// One of the twelve life stages (十二长生).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifeStage {
    /// 长生
    Birth,
    /// 沐浴
    Bath,
    /// 冠带
    Crown,
    /// 临官
    Office,
    /// 帝旺
    Peak,
    /// 衰
    Decline,
    /// 病
    Sickness,
    /// 死
    Death,
    /// 墓
    Tomb,
    /// 绝
    Extinction,
    /// 胎
    Conception,
    /// 养
    Nurture,
}

/// Coarse reading of a life stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageBucket {
    /// 长生, 冠带, 临官, 帝旺.
    Strong,
    /// 沐浴, 衰, 胎, 养.
    Medium,
    /// 病, 死, 墓, 绝.
    Weak,
}

impl LifeStage {
    /// Stages in cycle order starting at 长生.
    pub const ALL: [Self; 12] = [
        Self::Birth,
        Self::Bath,
        Self::Crown,
        Self::Office,
        Self::Peak,
        Self::Decline,
        Self::Sickness,
        Self::Death,
        Self::Tomb,
        Self::Extinction,
        Self::Conception,
        Self::Nurture,
    ];

    /// Branch where `element` is born (长生). Earth follows fire.
    pub fn birth_branch(element: Element) -> Branch {
        match element {
            Element::Wood => Branch::Hai,
            Element::Fire | Element::Earth => Branch::Yin,
            Element::Metal => Branch::Si,
            Element::Water => Branch::Shen,
        }
    }

    /// Stage of `element` at `branch`.
    pub fn of(element: Element, branch: Branch) -> Self {
        Self::ALL[Self::birth_branch(element).distance_to(branch)]
    }

    /// Coarse strength bucket.
    pub fn bucket(self) -> StageBucket {
        match self {
            Self::Birth | Self::Crown | Self::Office | Self::Peak => StageBucket::Strong,
            Self::Bath | Self::Decline | Self::Conception | Self::Nurture => StageBucket::Medium,
            Self::Sickness | Self::Death | Self::Tomb | Self::Extinction => StageBucket::Weak,
        }
    }

    /// Chinese name.
    pub fn chinese(self) -> &'static str {
        match self {
            Self::Birth => "长生",
            Self::Bath => "沐浴",
            Self::Crown => "冠带",
            Self::Office => "临官",
            Self::Peak => "帝旺",
            Self::Decline => "衰",
            Self::Sickness => "病",
            Self::Death => "死",
            Self::Tomb => "墓",
            Self::Extinction => "绝",
            Self::Conception => "胎",
            Self::Nurture => "养",
        }
    }
}

impl std::fmt::Display for LifeStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.chinese())
    }
}

/// Seasonal strength of an element under the month branch (旺相休囚死).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WangShuai {
    /// 旺: same element as the month.
    Prosperous,
    /// 相: the line generates the month element.
    Strong,
    /// 休: the month element generates the line.
    Resting,
    /// 囚: the line controls the month element.
    Imprisoned,
    /// 死: the month element controls the line.
    Dead,
}

impl WangShuai {
    /// Strength of `element` in the month ruled by `month`.
    pub fn of(element: Element, month: Branch) -> Self {
        match element.relation_to(month.element()) {
            ElementRelation::Same => Self::Prosperous,
            ElementRelation::Generates => Self::Strong,
            ElementRelation::GeneratedBy => Self::Resting,
            ElementRelation::Controls => Self::Imprisoned,
            ElementRelation::ControlledBy => Self::Dead,
        }
    }

    /// Returns true for 旺 and 相.
    pub fn is_thriving(self) -> bool {
        matches!(self, Self::Prosperous | Self::Strong)
    }

    /// Score adjustment applied to the baseline strength.
    pub fn score_delta(self) -> i32 {
        match self {
            Self::Prosperous => 40,
            Self::Strong => 25,
            Self::Resting => 0,
            Self::Imprisoned => -15,
            Self::Dead => -25,
        }
    }

    /// Chinese name.
    pub fn chinese(self) -> &'static str {
        match self {
            Self::Prosperous => "旺",
            Self::Strong => "相",
            Self::Resting => "休",
            Self::Imprisoned => "囚",
            Self::Dead => "死",
        }
    }
}

impl std::fmt::Display for WangShuai {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.chinese())
    }
}

/// The six relations (六亲), assigned by element against the palace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SixRelation {
    /// 父母: generates the palace.
    Parent,
    /// 兄弟: same element as the palace.
    Sibling,
    /// 子孙: generated by the palace.
    Offspring,
    /// 妻财: controlled by the palace.
    Wealth,
    /// 官鬼: controls the palace.
    Officer,
}

/// `RELATION_TABLE[palace][line]`, elements indexed in generation order.
const RELATION_TABLE: [[SixRelation; 5]; 5] = {
    use SixRelation::*;
    [
        // palace 木: 木 火 土 金 水
        [Sibling, Offspring, Wealth, Officer, Parent],
        // palace 火
        [Parent, Sibling, Offspring, Wealth, Officer],
        // palace 土
        [Officer, Parent, Sibling, Offspring, Wealth],
        // palace 金
        [Wealth, Officer, Parent, Sibling, Offspring],
        // palace 水
        [Offspring, Wealth, Officer, Parent, Sibling],
    ]
};

impl SixRelation {
    /// All relations.
    pub const ALL: [Self; 5] = [
        Self::Parent,
        Self::Sibling,
        Self::Offspring,
        Self::Wealth,
        Self::Officer,
    ];

    /// Relation of a line of `line` element in a palace of `palace` element.
    pub fn of(palace: Element, line: Element) -> Self {
        RELATION_TABLE[palace.index()][line.index()]
    }

    /// The element that carries this relation in a palace of `palace` element.
    pub fn element_in(self, palace: Element) -> Element {
        match self {
            Self::Parent => palace.generator(),
            Self::Sibling => palace,
            Self::Offspring => palace.generates(),
            Self::Wealth => palace.controls(),
            Self::Officer => palace.controller(),
        }
    }

    /// Chinese name.
    pub fn chinese(self) -> &'static str {
        match self {
            Self::Parent => "父母",
            Self::Sibling => "兄弟",
            Self::Offspring => "子孙",
            Self::Wealth => "妻财",
            Self::Officer => "官鬼",
        }
    }
}

impl std::fmt::Display for SixRelation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.chinese())
    }
}

/// The six spirits (六神), rotated over the lines by day stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SixSpirit {
    /// 青龙
    AzureDragon,
    /// 朱雀
    VermilionBird,
    /// 勾陈
    Gouchen,
    /// 螣蛇
    Tengshe,
    /// 白虎
    WhiteTiger,
    /// 玄武
    BlackTortoise,
}

impl SixSpirit {
    /// Spirits in rotation order.
    pub const ALL: [Self; 6] = [
        Self::AzureDragon,
        Self::VermilionBird,
        Self::Gouchen,
        Self::Tengshe,
        Self::WhiteTiger,
        Self::BlackTortoise,
    ];

    /// Rotation offset for the bottom line: 甲乙 0, 丙丁 1, 戊 2, 己 3, 庚辛 4, 壬癸 5.
    pub fn start_offset(day_stem: Stem) -> usize {
        match day_stem {
            Stem::Jia | Stem::Yi => 0,
            Stem::Bing | Stem::Ding => 1,
            Stem::Wu => 2,
            Stem::Ji => 3,
            Stem::Geng | Stem::Xin => 4,
            Stem::Ren | Stem::Gui => 5,
        }
    }

    /// Spirit on line `position` (1 = bottom) for a given day stem.
    pub fn for_line(day_stem: Stem, position: usize) -> Self {
        Self::ALL[(Self::start_offset(day_stem) + position + 5) % 6]
    }

    /// Chinese name.
    pub fn chinese(self) -> &'static str {
        match self {
            Self::AzureDragon => "青龙",
            Self::VermilionBird => "朱雀",
            Self::Gouchen => "勾陈",
            Self::Tengshe => "螣蛇",
            Self::WhiteTiger => "白虎",
            Self::BlackTortoise => "玄武",
        }
    }
}

impl std::fmt::Display for SixSpirit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.chinese())
    }
}
