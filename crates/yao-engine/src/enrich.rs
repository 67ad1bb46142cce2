//! Time-dependent enrichment of each line.
//!
//! Given the pillars of the moment, every line gets its void state, the
//! action of the month and day branches upon it, a strength score with the
//! factors that produced it, its life stage at month and day, and for
//! moving lines the class of transformation into the changed line.

use serde::{Deserialize, Serialize};
use yao_core::relations::{breaks, clashes, harmonizes, tomb_of};
use yao_core::{
    Branch, Element, ElementRelation, LifeStage, SexagenaryTime, StageBucket, WangShuai,
};

use crate::builder::{Hexagram, Line};
use crate::config::AnalysisConfig;

/// Void state of a line (旬空).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoidState {
    /// Not in the void decade.
    NotVoid,
    /// 真空: void with nothing to relieve it.
    TrueVoid,
    /// 动空: void but moving.
    MovingVoid,
    /// 冲空: void but clashed by the day.
    ClashVoid,
    /// 月建空: void but ruling the month.
    MonthStanding,
}

impl VoidState {
    /// Classify a line branch against the pillars.
    pub fn of(branch: Branch, moving: bool, time: &SexagenaryTime) -> Self {
        if !time.is_void(branch) {
            Self::NotVoid
        } else if moving {
            Self::MovingVoid
        } else if clashes(time.day_branch(), branch) {
            Self::ClashVoid
        } else if branch == time.month_branch() {
            Self::MonthStanding
        } else {
            Self::TrueVoid
        }
    }

    /// Chinese name.
    pub fn chinese(self) -> &'static str {
        match self {
            Self::NotVoid => "",
            Self::TrueVoid => "真空",
            Self::MovingVoid => "动空",
            Self::ClashVoid => "冲空",
            Self::MonthStanding => "月建空",
        }
    }
}

/// Action of the month or day branch on a line branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchAction {
    /// 生
    Generate,
    /// 扶
    Support,
    /// 克
    Control,
    /// 冲
    Clash,
    /// 合
    Combine,
    /// 破
    Break,
    /// 无
    Neutral,
}

impl BranchAction {
    /// Action of `source` on `target`; clash outranks harmony, which
    /// outranks break, which outranks the element relations.
    pub fn of(source: Branch, target: Branch) -> Self {
        if clashes(source, target) {
            return Self::Clash;
        }
        if harmonizes(source, target) {
            return Self::Combine;
        }
        if breaks(source, target) {
            return Self::Break;
        }
        match source.element().relation_to(target.element()) {
            ElementRelation::Generates => Self::Generate,
            ElementRelation::Same => Self::Support,
            ElementRelation::Controls => Self::Control,
            ElementRelation::GeneratedBy | ElementRelation::ControlledBy => Self::Neutral,
        }
    }

    /// Chinese name.
    pub fn chinese(self) -> &'static str {
        match self {
            Self::Generate => "生",
            Self::Support => "扶",
            Self::Control => "克",
            Self::Clash => "冲",
            Self::Combine => "合",
            Self::Break => "破",
            Self::Neutral => "无",
        }
    }
}

impl std::fmt::Display for BranchAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.chinese())
    }
}

/// Special status produced by a day clash on a static line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialStatus {
    /// 无
    #[default]
    None,
    /// 暗动: a thriving static line clashed by the day.
    DarkStir,
    /// 日破: a weak static line clashed by the day.
    DayBreak,
}

impl SpecialStatus {
    /// Chinese name.
    pub fn chinese(self) -> &'static str {
        match self {
            Self::None => "无",
            Self::DarkStir => "暗动",
            Self::DayBreak => "日破",
        }
    }
}

/// One adjustment applied to a line's strength.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthFactor {
    /// What caused it, e.g. `日生`.
    pub label: String,
    /// Score change.
    pub delta: i32,
}

impl StrengthFactor {
    fn new(label: impl Into<String>, delta: i32) -> Self {
        Self {
            label: label.into(),
            delta,
        }
    }
}

/// Strength of a line under the month and day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineStrength {
    /// Seasonal strength under the month branch.
    pub wangshuai: WangShuai,
    /// Score in 0..=100.
    pub score: i32,
    /// Adjustments in the order they were applied.
    pub factors: Vec<StrengthFactor>,
    /// Dark-stir or day-break, if either applies.
    pub special: SpecialStatus,
    /// Score reached the configured threshold.
    pub is_strong: bool,
}

const BASELINE: i32 = 50;

impl LineStrength {
    /// Score a line given its actions and void state.
    pub fn assess(
        line: &Line,
        time: &SexagenaryTime,
        void_state: VoidState,
        config: &AnalysisConfig,
    ) -> Self {
        let wangshuai = WangShuai::of(line.element, time.month_branch());
        let mut score = BASELINE + wangshuai.score_delta();
        let mut factors = vec![StrengthFactor::new(
            format!("月令{wangshuai}"),
            wangshuai.score_delta(),
        )];
        let mut special = SpecialStatus::None;

        let day_delta = match BranchAction::of(time.day_branch(), line.branch) {
            BranchAction::Generate => Some(("日生", 15)),
            BranchAction::Support => Some(("日扶", 12)),
            BranchAction::Control => Some(("日克", -15)),
            BranchAction::Clash if line.is_moving() => Some(("冲散", -20)),
            BranchAction::Clash if wangshuai.is_thriving() => {
                special = SpecialStatus::DarkStir;
                Some(("暗动", 30))
            }
            BranchAction::Clash => {
                special = SpecialStatus::DayBreak;
                Some(("日破", -score))
            }
            _ => None,
        };
        if let Some((label, delta)) = day_delta {
            score += delta;
            factors.push(StrengthFactor::new(label, delta));
        }

        if special == SpecialStatus::DayBreak {
            return Self {
                wangshuai,
                score: 0,
                factors,
                special,
                is_strong: config.strong_threshold <= 0,
            };
        }

        let month_delta = match BranchAction::of(time.month_branch(), line.branch) {
            BranchAction::Generate => Some(("月生", 10)),
            BranchAction::Support => Some(("月扶", 8)),
            BranchAction::Control => Some(("月克", -10)),
            BranchAction::Clash => Some(("月冲", -8)),
            _ => None,
        };
        if let Some((label, delta)) = month_delta {
            score += delta;
            factors.push(StrengthFactor::new(label, delta));
        }

        if void_state == VoidState::TrueVoid {
            score -= 25;
            factors.push(StrengthFactor::new("旬空", -25));
        }
        if line.is_moving() {
            score += 5;
            factors.push(StrengthFactor::new("发动", 5));
        }

        let score = score.clamp(0, 100);
        Self {
            wangshuai,
            score,
            factors,
            special,
            is_strong: score >= config.strong_threshold,
        }
    }
}

/// A life stage with its strength bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageInfo {
    /// The stage.
    pub stage: LifeStage,
    /// Strong, medium or weak.
    pub bucket: StageBucket,
}

impl StageInfo {
    /// Stage of `element` at `branch`.
    pub fn of(element: Element, branch: Branch) -> Self {
        let stage = LifeStage::of(element, branch);
        Self {
            stage,
            bucket: stage.bucket(),
        }
    }
}

/// Overall tenor of a transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nature {
    /// 吉
    Auspicious,
    /// 凶
    Inauspicious,
    /// 中
    Neutral,
}

impl Nature {
    /// Chinese name.
    pub fn chinese(self) -> &'static str {
        match self {
            Self::Auspicious => "吉",
            Self::Inauspicious => "凶",
            Self::Neutral => "中",
        }
    }
}

/// Class of change from a moving line into its transformed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformKind {
    /// 化进
    Advance,
    /// 化退
    Retreat,
    /// 回头生
    ReturnGenerate,
    /// 回头克
    ReturnControl,
    /// 化空
    IntoVoid,
    /// 化墓
    IntoTomb,
    /// 伏吟
    Groaning,
    /// 反吟
    Reversal,
}

impl TransformKind {
    /// Classify the change from `from` to `to`; the first matching rule wins.
    pub fn of(from: Branch, to: Branch, time: &SexagenaryTime) -> Self {
        let (origin, changed) = (from.element(), to.element());
        if from == to {
            Self::Groaning
        } else if clashes(from, to) {
            Self::Reversal
        } else if time.is_void(to) {
            Self::IntoVoid
        } else if tomb_of(origin) == to {
            Self::IntoTomb
        } else if changed.generates() == origin {
            Self::ReturnGenerate
        } else if changed.controls() == origin {
            Self::ReturnControl
        } else if from.distance_to(to) <= 6 {
            Self::Advance
        } else {
            Self::Retreat
        }
    }

    /// Chinese name.
    pub fn chinese(self) -> &'static str {
        match self {
            Self::Advance => "化进",
            Self::Retreat => "化退",
            Self::ReturnGenerate => "回头生",
            Self::ReturnControl => "回头克",
            Self::IntoVoid => "化空",
            Self::IntoTomb => "化墓",
            Self::Groaning => "伏吟",
            Self::Reversal => "反吟",
        }
    }

    /// Tenor of the change.
    pub fn nature(self) -> Nature {
        match self {
            Self::Advance | Self::ReturnGenerate => Nature::Auspicious,
            Self::IntoVoid => Nature::Neutral,
            Self::Retreat
            | Self::ReturnControl
            | Self::IntoTomb
            | Self::Groaning
            | Self::Reversal => Nature::Inauspicious,
        }
    }

    /// Short reading of the change.
    pub fn note(self) -> &'static str {
        match self {
            Self::Advance => "化进神，事渐进展",
            Self::Retreat => "化退神，事有退缩",
            Self::ReturnGenerate => "回头生，得助力",
            Self::ReturnControl => "回头克，反受制",
            Self::IntoVoid => "化空，待出空之日",
            Self::IntoTomb => "化入墓库，待冲开之日",
            Self::Groaning => "伏吟，事多反复呻吟",
            Self::Reversal => "反吟，事多反复动荡",
        }
    }
}

impl std::fmt::Display for TransformKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.chinese())
    }
}

/// How a moving line changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovingTransform {
    /// The class of change.
    pub kind: TransformKind,
    /// Branch of the changed line.
    pub to_branch: Branch,
    /// Element of the changed line.
    pub to_element: Element,
    /// Tenor.
    pub nature: Nature,
    /// Short reading.
    pub note: String,
}

impl MovingTransform {
    /// Transformation from `from` into `to`.
    pub fn between(from: Branch, to: Branch, time: &SexagenaryTime) -> Self {
        let kind = TransformKind::of(from, to, time);
        Self {
            kind,
            to_branch: to,
            to_element: to.element(),
            nature: kind.nature(),
            note: kind.note().to_string(),
        }
    }
}

/// A line together with everything the moment says about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedLine {
    /// The attributed line.
    pub line: Line,
    /// Void state.
    pub void_state: VoidState,
    /// Action of the month branch.
    pub month_action: BranchAction,
    /// Action of the day branch.
    pub day_action: BranchAction,
    /// Strength score.
    pub strength: LineStrength,
    /// Life stage at the month branch.
    pub month_stage: StageInfo,
    /// Life stage at the day branch.
    pub day_stage: StageInfo,
    /// Change into the transformed line, moving lines only.
    pub transform: Option<MovingTransform>,
}

/// Enrich every line of `base` for the moment `time`.
pub fn enrich(
    base: &Hexagram,
    transformed: Option<&Hexagram>,
    time: &SexagenaryTime,
    config: &AnalysisConfig,
) -> [EnrichedLine; 6] {
    base.lines.map(|line| {
        let void_state = VoidState::of(line.branch, line.is_moving(), time);
        let transform = transformed
            .filter(|_| line.is_moving())
            .and_then(|t| t.line(line.position))
            .map(|changed| MovingTransform::between(line.branch, changed.branch, time));
        EnrichedLine {
            void_state,
            month_action: BranchAction::of(time.month_branch(), line.branch),
            day_action: BranchAction::of(time.day_branch(), line.branch),
            strength: LineStrength::assess(&line, time, void_state, config),
            month_stage: StageInfo::of(line.element, time.month_branch()),
            day_stage: StageInfo::of(line.element, time.day_branch()),
            transform,
            line,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use yao_core::{LineType, SixRelation, SixSpirit, Stem};
    use Branch::*;

    fn time(s: &str) -> SexagenaryTime {
        s.parse().unwrap()
    }

    fn line(branch: Branch, line_type: LineType) -> Line {
        Line {
            position: 1,
            line_type,
            stem: Stem::Jia,
            branch,
            element: branch.element(),
            relation: SixRelation::Sibling,
            spirit: SixSpirit::AzureDragon,
            is_shi: false,
            is_ying: false,
        }
    }

    #[test]
    fn action_priority() {
        assert_eq!(BranchAction::of(Wu, Zi), BranchAction::Clash);
        assert_eq!(BranchAction::of(Chou, Zi), BranchAction::Combine);
        assert_eq!(BranchAction::of(You, Zi), BranchAction::Break);
        assert_eq!(BranchAction::of(Shen, Zi), BranchAction::Generate);
        assert_eq!(BranchAction::of(Hai, Zi), BranchAction::Support);
        assert_eq!(BranchAction::of(Chen, Zi), BranchAction::Control);
        assert_eq!(BranchAction::of(Yin, Zi), BranchAction::Neutral);
    }

    #[test]
    fn void_states() {
        // 甲子旬 voids 戌亥.
        let t = time("甲子 丙戌 甲子 甲子");
        assert_eq!(VoidState::of(Zi, false, &t), VoidState::NotVoid);
        assert_eq!(VoidState::of(Hai, true, &t), VoidState::MovingVoid);
        assert_eq!(VoidState::of(Hai, false, &t), VoidState::TrueVoid);
        assert_eq!(VoidState::of(Xu, false, &t), VoidState::MonthStanding);
        let t = time("甲子 丙寅 丙辰 甲子"); // 甲寅旬 voids 子丑
        assert_eq!(VoidState::of(Zi, false, &t), VoidState::TrueVoid);
        let t = time("甲子 丙寅 庚午 丙子"); // 甲子旬 voids 戌亥
        assert_eq!(VoidState::of(Zi, false, &t), VoidState::NotVoid);
        let t = time("甲子 丙寅 己巳 甲子"); // 甲子旬, 巳 clashes 亥
        assert_eq!(VoidState::of(Hai, false, &t), VoidState::ClashVoid);
    }

    #[test]
    fn day_break_zeroes_score() {
        let t = time("甲子 癸酉 甲午 甲子");
        let s = LineStrength::assess(
            &line(Zi, LineType::YoungYang),
            &t,
            VoidState::NotVoid,
            &AnalysisConfig::default(),
        );
        assert_eq!(s.wangshuai, WangShuai::Resting);
        assert_eq!(s.special, SpecialStatus::DayBreak);
        assert_eq!(s.score, 0);
        assert!(s.factors.iter().any(|f| f.label == "日破"));
        assert!(!s.is_strong);
    }

    #[test]
    fn dark_stir_on_thriving_static_line() {
        let t = time("甲子 丙子 甲午 甲子");
        let s = LineStrength::assess(
            &line(Zi, LineType::YoungYang),
            &t,
            VoidState::NotVoid,
            &AnalysisConfig::default(),
        );
        assert_eq!(s.wangshuai, WangShuai::Prosperous);
        assert_eq!(s.special, SpecialStatus::DarkStir);
        assert!(s.score >= 80);
    }

    #[test]
    fn clash_scatters_moving_line() {
        let t = time("甲子 丙子 甲午 甲子");
        let s = LineStrength::assess(
            &line(Zi, LineType::OldYang),
            &t,
            VoidState::NotVoid,
            &AnalysisConfig::default(),
        );
        assert_eq!(s.special, SpecialStatus::None);
        assert!(s.factors.iter().any(|f| f.label == "冲散"));
    }

    #[test]
    fn true_void_penalty_only() {
        let t = time("甲子 丙戌 甲子 甲子");
        let cfg = AnalysisConfig::default();
        let void = LineStrength::assess(&line(Hai, LineType::YoungYin), &t, VoidState::TrueVoid, &cfg);
        let standing =
            LineStrength::assess(&line(Xu, LineType::YoungYang), &t, VoidState::MonthStanding, &cfg);
        assert!(void.factors.iter().any(|f| f.label == "旬空"));
        assert!(standing.factors.iter().all(|f| f.label != "旬空"));
    }

    #[test]
    fn transform_classes() {
        let t = time("甲子 丙寅 甲子 甲子"); // voids 戌亥
        let kind = |a, b| TransformKind::of(a, b, &t);
        assert_eq!(kind(Zi, Zi), TransformKind::Groaning);
        assert_eq!(kind(Zi, Wu), TransformKind::Reversal);
        assert_eq!(kind(Zi, Hai), TransformKind::IntoVoid);
        assert_eq!(kind(Zi, Chen), TransformKind::IntoTomb);
        assert_eq!(kind(Yin, Zi), TransformKind::ReturnGenerate);
        assert_eq!(kind(Mao, Shen), TransformKind::ReturnControl);
        assert_eq!(kind(Yin, Mao), TransformKind::Advance);
        assert_eq!(kind(Mao, Yin), TransformKind::Retreat);
        assert_eq!(TransformKind::Advance.nature(), Nature::Auspicious);
    }
}
