//! Cross-line structures: six-clash and six-harmony hexagrams, branch
//! bureaus, punishments and stem five-combinations across the pillars.

use serde::{Deserialize, Serialize};
use yao_core::relations::{
    BranchGroup, PUNISHMENT_PAIR, PUNISHMENT_TRIOS, THREE_HARMONY, THREE_MEETING, clashes,
    harmonizes, punishes, stems_combine,
};
use yao_core::{Branch, Element, SexagenaryTime, Stem};

use crate::builder::Hexagram;

/// Opposite line pairs: (1,4), (2,5), (3,6).
const OPPOSITE_PAIRS: [(usize, usize); 3] = [(0, 3), (1, 4), (2, 5)];

/// How many opposite pairs clash, or harmonize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairPattern {
    /// Matching pairs, 0..=3.
    pub pairs: u8,
    /// All three pairs match.
    pub is_full: bool,
    /// Reading for a full pattern.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl PairPattern {
    fn count(hex: &Hexagram, test: fn(Branch, Branch) -> bool, note: &str) -> Self {
        let pairs = OPPOSITE_PAIRS
            .iter()
            .filter(|&&(a, b)| test(hex.lines[a].branch, hex.lines[b].branch))
            .count() as u8;
        let is_full = pairs == 3;
        Self {
            pairs,
            is_full,
            note: is_full.then(|| note.to_string()),
        }
    }
}

/// Kind of branch bureau.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BureauKind {
    /// 三合局: all three members present.
    ThreeHarmony,
    /// 半合局: two of the three members present.
    HalfHarmony,
    /// 三会局: a full directional trio.
    ThreeMeeting,
}

impl BureauKind {
    /// Chinese name.
    pub fn chinese(self) -> &'static str {
        match self {
            Self::ThreeHarmony => "三合",
            Self::HalfHarmony => "半合",
            Self::ThreeMeeting => "三会",
        }
    }
}

/// A bureau formed over the line branches plus month and day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bureau {
    /// Full, half or meeting.
    pub kind: BureauKind,
    /// Readable name, e.g. `申子辰三合水局`.
    pub name: String,
    /// Element of the bureau.
    pub element: Element,
    /// Members that are present.
    pub branches: Vec<Branch>,
    /// Line positions holding a present member.
    pub positions: Vec<u8>,
    /// The month branch supplies a member.
    pub from_month: bool,
    /// The day branch supplies a member.
    pub from_day: bool,
}

/// Kind of punishment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunishmentKind {
    /// 无恩之刑: 寅巳申.
    Ungrateful,
    /// 恃势之刑: 丑戌未.
    Bullying,
    /// 无礼之刑: 子卯.
    Rude,
    /// 自刑: 辰午酉亥 appearing twice.
    SelfInflicted,
}

impl PunishmentKind {
    /// Chinese name.
    pub fn chinese(self) -> &'static str {
        match self {
            Self::Ungrateful => "无恩之刑",
            Self::Bullying => "恃势之刑",
            Self::Rude => "无礼之刑",
            Self::SelfInflicted => "自刑",
        }
    }
}

/// A punishment found over the line branches plus month and day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Punishment {
    /// The kind.
    pub kind: PunishmentKind,
    /// Branches involved.
    pub branches: Vec<Branch>,
    /// Line positions holding them.
    pub positions: Vec<u8>,
}

/// One of the four pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PillarSlot {
    /// 年
    Year,
    /// 月
    Month,
    /// 日
    Day,
    /// 时
    Hour,
}

impl PillarSlot {
    /// Slots in ordinal order.
    pub const ALL: [Self; 4] = [Self::Year, Self::Month, Self::Day, Self::Hour];

    /// Chinese name.
    pub fn chinese(self) -> &'static str {
        match self {
            Self::Year => "年",
            Self::Month => "月",
            Self::Day => "日",
            Self::Hour => "时",
        }
    }
}

/// Ordinal distance between two pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PillarDistance {
    /// Neighbouring pillars.
    Adjacent,
    /// One pillar between them.
    OneApart,
    /// Year and hour.
    Far,
}

/// A stem five-combination between two pillars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StemCombination {
    /// The earlier pillar.
    pub first: PillarSlot,
    /// The later pillar.
    pub second: PillarSlot,
    /// The two stems.
    pub stems: (Stem, Stem),
    /// Element the pair combines into.
    pub element: Element,
    /// How far apart the pillars are.
    pub distance: PillarDistance,
}

/// Everything the structure detector finds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Structures {
    /// 六冲卦
    pub six_clash: PairPattern,
    /// 六合卦
    pub six_harmony: PairPattern,
    /// 三合, 半合 and 三会 bureaus.
    pub bureaus: Vec<Bureau>,
    /// 三刑
    pub punishments: Vec<Punishment>,
    /// 天干五合 across the pillars.
    pub stem_combinations: Vec<StemCombination>,
}

/// Where a branch in the pool came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Line(u8),
    Month,
    Day,
}

struct Pool {
    entries: Vec<(Branch, Source)>,
}

impl Pool {
    fn new(hex: &Hexagram, time: &SexagenaryTime) -> Self {
        let mut entries: Vec<(Branch, Source)> = hex
            .lines
            .iter()
            .map(|l| (l.branch, Source::Line(l.position)))
            .collect();
        entries.push((time.month_branch(), Source::Month));
        entries.push((time.day_branch(), Source::Day));
        Self { entries }
    }

    fn contains(&self, branch: Branch) -> bool {
        self.entries.iter().any(|(b, _)| *b == branch)
    }

    fn occurrences(&self, branch: Branch) -> usize {
        self.entries.iter().filter(|(b, _)| *b == branch).count()
    }

    fn positions(&self, branches: &[Branch]) -> Vec<u8> {
        self.entries
            .iter()
            .filter_map(|(b, s)| match s {
                Source::Line(p) if branches.contains(b) => Some(*p),
                _ => None,
            })
            .collect()
    }

    fn has_source(&self, branches: &[Branch], source: Source) -> bool {
        self.entries
            .iter()
            .any(|(b, s)| *s == source && branches.contains(b))
    }

    fn bureau(&self, group: &BranchGroup, kind: BureauKind, present: Vec<Branch>) -> Bureau {
        let name = match kind {
            BureauKind::HalfHarmony => format!(
                "{}半合{}局",
                present.iter().map(Branch::to_string).collect::<String>(),
                group.element
            ),
            _ => format!(
                "{}{}{}局",
                group.members.iter().map(Branch::to_string).collect::<String>(),
                kind.chinese(),
                group.element
            ),
        };
        Bureau {
            kind,
            name,
            element: group.element,
            positions: self.positions(&present),
            from_month: self.has_source(&present, Source::Month),
            from_day: self.has_source(&present, Source::Day),
            branches: present,
        }
    }
}

fn bureaus(pool: &Pool) -> Vec<Bureau> {
    let mut found = Vec::new();
    for group in &THREE_HARMONY {
        let present: Vec<Branch> = group
            .members
            .iter()
            .copied()
            .filter(|b| pool.contains(*b))
            .collect();
        match present.len() {
            3 => found.push(pool.bureau(group, BureauKind::ThreeHarmony, present)),
            // month and day alone do not make a half bureau in the hexagram
            2 if !pool.positions(&present).is_empty() => {
                found.push(pool.bureau(group, BureauKind::HalfHarmony, present));
            }
            _ => {}
        }
    }
    for group in &THREE_MEETING {
        if group.members.iter().all(|b| pool.contains(*b)) {
            found.push(pool.bureau(group, BureauKind::ThreeMeeting, group.members.to_vec()));
        }
    }
    found
}

fn punishments(pool: &Pool) -> Vec<Punishment> {
    let mut found = Vec::new();
    for (trio, kind) in PUNISHMENT_TRIOS
        .iter()
        .zip([PunishmentKind::Ungrateful, PunishmentKind::Bullying])
    {
        if trio.iter().all(|b| pool.contains(*b)) {
            found.push(Punishment {
                kind,
                branches: trio.to_vec(),
                positions: pool.positions(trio),
            });
        }
    }
    let [a, b] = PUNISHMENT_PAIR;
    if punishes(a, b) && pool.contains(a) && pool.contains(b) {
        found.push(Punishment {
            kind: PunishmentKind::Rude,
            branches: PUNISHMENT_PAIR.to_vec(),
            positions: pool.positions(&PUNISHMENT_PAIR),
        });
    }
    for branch in Branch::ALL {
        if punishes(branch, branch) && pool.occurrences(branch) >= 2 {
            found.push(Punishment {
                kind: PunishmentKind::SelfInflicted,
                branches: vec![branch],
                positions: pool.positions(&[branch]),
            });
        }
    }
    found
}

/// Stem five-combinations over the six pillar pairs.
pub fn stem_combinations(time: &SexagenaryTime) -> Vec<StemCombination> {
    let pillars = time.pillars();
    let mut found = Vec::new();
    for i in 0..4 {
        for j in i + 1..4 {
            let (a, b) = (pillars[i].stem, pillars[j].stem);
            if !stems_combine(a, b) {
                continue;
            }
            let distance = match j - i {
                1 => PillarDistance::Adjacent,
                2 => PillarDistance::OneApart,
                _ => PillarDistance::Far,
            };
            found.push(StemCombination {
                first: PillarSlot::ALL[i],
                second: PillarSlot::ALL[j],
                stems: (a, b),
                element: a.combination_element(),
                distance,
            });
        }
    }
    found
}

/// Run every detector over a hexagram at a moment.
pub fn detect(hex: &Hexagram, time: &SexagenaryTime) -> Structures {
    let pool = Pool::new(hex, time);
    Structures {
        six_clash: PairPattern::count(hex, clashes, "事散应急"),
        six_harmony: PairPattern::count(hex, harmonizes, "事合应缓"),
        bureaus: bureaus(&pool),
        punishments: punishments(&pool),
        stem_combinations: stem_combinations(time),
    }
}
