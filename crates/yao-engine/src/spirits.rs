//! Useful-god selection and the spirit system around it.
//!
//! The question picks a relation by keyword. The useful god (用神) is the
//! element carrying that relation; the source (原神) generates it, the taboo
//! (忌神) controls it and the enemy (仇神) controls the source.

use serde::{Deserialize, Serialize};
use yao_core::{Element, SixRelation};

use crate::builder::Hexagram;
use crate::config::AnalysisConfig;
use crate::covert::CovertSpirit;

/// What a question is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    /// 事业
    Career,
    /// 学业
    Study,
    /// 财运
    Wealth,
    /// 感情
    Relationship,
    /// 健康
    Health,
    /// 疾病
    Illness,
    /// 子女
    Children,
    /// 父母
    Parents,
    /// 兄弟
    Siblings,
    /// 出行
    Travel,
    /// 诉讼
    Lawsuit,
    /// 失物
    LostItem,
    /// No keyword matched.
    General,
}

impl QuestionCategory {
    /// Chinese name.
    pub fn chinese(self) -> &'static str {
        match self {
            Self::Career => "事业",
            Self::Study => "学业",
            Self::Wealth => "财运",
            Self::Relationship => "感情",
            Self::Health => "健康",
            Self::Illness => "疾病",
            Self::Children => "子女",
            Self::Parents => "父母",
            Self::Siblings => "兄弟",
            Self::Travel => "出行",
            Self::Lawsuit => "诉讼",
            Self::LostItem => "失物",
            Self::General => "综合",
        }
    }
}

/// Keyword table, searched in order.
const KEYWORDS: [(&[&str], QuestionCategory, SixRelation); 12] = [
    (&["事业", "工作", "升职"], QuestionCategory::Career, SixRelation::Officer),
    (&["考试", "学业"], QuestionCategory::Study, SixRelation::Parent),
    (&["财运", "投资", "生意"], QuestionCategory::Wealth, SixRelation::Wealth),
    (&["感情", "婚姻", "恋爱"], QuestionCategory::Relationship, SixRelation::Wealth),
    (&["健康"], QuestionCategory::Health, SixRelation::Offspring),
    (&["疾病"], QuestionCategory::Illness, SixRelation::Officer),
    (&["子女"], QuestionCategory::Children, SixRelation::Offspring),
    (&["父母"], QuestionCategory::Parents, SixRelation::Parent),
    (&["兄弟"], QuestionCategory::Siblings, SixRelation::Sibling),
    (&["出行"], QuestionCategory::Travel, SixRelation::Offspring),
    (&["诉讼"], QuestionCategory::Lawsuit, SixRelation::Officer),
    (&["失物"], QuestionCategory::LostItem, SixRelation::Wealth),
];

/// Outcome of question classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Matched category.
    pub category: QuestionCategory,
    /// Relation chosen as the useful god.
    pub relation: SixRelation,
    /// The keyword that matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

/// Classify a free-text question; the first keyword in table order wins.
pub fn classify_question(question: &str, config: &AnalysisConfig) -> Classification {
    KEYWORDS
        .iter()
        .find_map(|(words, category, relation)| {
            words
                .iter()
                .find(|w| question.contains(**w))
                .map(|w| Classification {
                    category: *category,
                    relation: *relation,
                    keyword: Some((*w).to_string()),
                })
        })
        .unwrap_or(Classification {
            category: QuestionCategory::General,
            relation: config.default_relation,
            keyword: None,
        })
}

/// One role of the spirit system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpiritRole {
    /// Relation carrying the role in this palace.
    pub relation: SixRelation,
    /// Element of the role.
    pub element: Element,
    /// Line positions carrying it.
    pub positions: Vec<u8>,
}

impl SpiritRole {
    fn for_element(hex: &Hexagram, element: Element) -> Self {
        let relation = SixRelation::of(hex.palace_element, element);
        Self {
            relation,
            element,
            positions: hex.positions_of(relation),
        }
    }

    /// The role does not appear on the board.
    pub fn is_absent(&self) -> bool {
        self.positions.is_empty()
    }
}

/// 用神, 原神, 忌神 and 仇神, plus the covert useful god when it is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpiritSystem {
    /// 用神
    pub yong: SpiritRole,
    /// 原神
    pub yuan: SpiritRole,
    /// 忌神
    pub ji: SpiritRole,
    /// 仇神
    pub chou: SpiritRole,
    /// The useful god recovered from the pure hexagram.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub covert: Option<CovertSpirit>,
}

/// Build the spirit system for `relation` on `hex`.
///
/// `covert_spirits` are the lookups already made for the missing relations.
pub fn spirit_system(
    hex: &Hexagram,
    relation: SixRelation,
    covert_spirits: &[CovertSpirit],
) -> SpiritSystem {
    let yong = relation.element_in(hex.palace_element);
    let yuan = yong.generator();
    let yong_role = SpiritRole::for_element(hex, yong);
    let covert = if yong_role.is_absent() {
        covert_spirits.iter().find(|c| c.relation == relation).cloned()
    } else {
        None
    };
    SpiritSystem {
        yong: yong_role,
        yuan: SpiritRole::for_element(hex, yuan),
        ji: SpiritRole::for_element(hex, yong.controller()),
        chou: SpiritRole::for_element(hex, yuan.controller()),
        covert,
    }
}
