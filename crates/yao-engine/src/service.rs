//! The facade: casting, building, enrichment and analysis in one call.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;
use yao_core::{Branch, LineType, Pillar, SexagenaryTime};

use crate::builder::{Hexagram, HexagramSummary, build_pair, nuclear};
use crate::calendar::Calendar;
use crate::cast::{CastRequest, Lines, cast_coins, cast_numbers, cast_random, cast_time};
use crate::config::AnalysisConfig;
use crate::covert::{self, CovertSpirit};
use crate::enrich::{EnrichedLine, enrich};
use crate::error::{EngineError, EngineResult};
use crate::spirits::{Classification, SpiritSystem, classify_question, spirit_system};
use crate::structure::{Structures, detect};
use crate::timing::{TimingHint, advise};

/// A complete reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// The question as asked.
    pub question: String,
    /// Category and useful-god relation picked for the question.
    pub classification: Classification,
    /// Civil timestamp of the reading, when one was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<NaiveDateTime>,
    /// The four pillars.
    pub time: SexagenaryTime,
    /// Head of the day's decade.
    pub xun: Pillar,
    /// The two void branches.
    pub kong: [Branch; 2],
    /// The hexagram as cast.
    pub base: Hexagram,
    /// The hexagram after the moving lines change.
    pub transformed: Option<Hexagram>,
    /// The nuclear hexagram (互卦).
    pub nuclear: HexagramSummary,
    /// Per-line enrichment of the base hexagram.
    pub lines: [EnrichedLine; 6],
    /// Cross-line structures.
    pub structures: Structures,
    /// The spirit system around the useful god.
    pub spirits: SpiritSystem,
    /// Covert spirits for every missing relation.
    pub covert_spirits: Vec<CovertSpirit>,
    /// Timing hints.
    pub timing: Vec<TimingHint>,
}

/// Facade input for an analysis of given lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisInput {
    /// Six lines, bottom first.
    pub lines: Vec<LineType>,
    /// The question.
    #[serde(default)]
    pub question: String,
    /// Moment of the reading.
    pub when: NaiveDateTime,
}

/// Facade input for casting and then analysing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastInput {
    /// Mode and its parameters.
    #[serde(flatten)]
    pub request: CastRequest,
    /// The question.
    #[serde(default)]
    pub question: String,
    /// Moment of the reading.
    pub when: NaiveDateTime,
}

/// Either facade input.
#[derive(Debug, Clone, PartialEq)]
pub enum FacadeInput {
    /// `cast_and_analyze`
    Cast(CastInput),
    /// `full_analysis`
    Lines(AnalysisInput),
}

impl FacadeInput {
    /// Parse a JSON request: one with a `mode` field casts, one without
    /// analyses the given lines.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let malformed = |e: serde_json::Error| EngineError::InvalidRequest(e.to_string());
        let value: serde_json::Value = serde_json::from_str(json).map_err(malformed)?;
        if value.get("mode").is_some() {
            serde_json::from_value(value).map(Self::Cast).map_err(malformed)
        } else {
            serde_json::from_value(value).map(Self::Lines).map_err(malformed)
        }
    }
}

/// The LiuYao engine over a calendar capability.
///
/// Holds no mutable state; share it freely across threads.
#[derive(Debug, Clone)]
pub struct LiuYaoService<C: Calendar> {
    calendar: C,
    config: AnalysisConfig,
}

impl<C: Calendar> LiuYaoService<C> {
    /// Create a service after checking the constant tables.
    pub fn new(calendar: C, config: AnalysisConfig) -> EngineResult<Self> {
        yao_core::ensure_tables()?;
        Ok(Self { calendar, config })
    }

    /// Cast six lines. A time cast needs its timestamp.
    pub fn cast_only(&self, request: &CastRequest) -> EngineResult<Lines> {
        self.cast_at(request, None)
    }

    fn cast_at(&self, request: &CastRequest, fallback: Option<NaiveDateTime>) -> EngineResult<Lines> {
        debug!(mode = request.mode(), "casting");
        match request {
            CastRequest::Coin { coin_throws } => cast_coins(coin_throws),
            CastRequest::Number { number_pair: (n1, n2) } => cast_numbers(*n1, *n2),
            CastRequest::Time { timestamp } => {
                let when = timestamp.or(fallback).ok_or_else(|| {
                    EngineError::InvalidCast("time cast needs a timestamp".to_string())
                })?;
                let time = self.calendar.to_ganzhi(when)?;
                cast_time(when, &time)
            }
            CastRequest::Random { seed } => Ok(cast_random(*seed)),
        }
    }

    /// Analyse six given lines at a civil moment.
    pub fn full_analysis(
        &self,
        lines: &Lines,
        question: &str,
        when: NaiveDateTime,
    ) -> EngineResult<Report> {
        let time = self.calendar.to_ganzhi(when)?;
        let mut report = self.analyze_at(lines, question, time)?;
        report.when = Some(when);
        Ok(report)
    }

    /// Cast, then analyse at a civil moment. A time cast without its own
    /// timestamp uses `when`.
    pub fn cast_and_analyze(
        &self,
        request: &CastRequest,
        question: &str,
        when: NaiveDateTime,
    ) -> EngineResult<Report> {
        let lines = self.cast_at(request, Some(when))?;
        self.full_analysis(&lines, question, when)
    }

    /// Analyse six given lines against known pillars, bypassing the calendar.
    pub fn analyze_at(
        &self,
        lines: &Lines,
        question: &str,
        time: SexagenaryTime,
    ) -> EngineResult<Report> {
        let (base, transformed) = build_pair(lines, time.day.stem)?;
        debug!(
            hexagram = %base,
            transformed = transformed.as_ref().map(|t| t.name.as_str()),
            %time,
            "built hexagram"
        );
        let enriched = enrich(&base, transformed.as_ref(), &time, &self.config);
        let structures = detect(&base, &time);
        let classification = classify_question(question, &self.config);
        let covert_spirits = covert::find_all(&base, &time);
        let spirits = spirit_system(&base, classification.relation, &covert_spirits);
        let timing = advise(&enriched, &spirits, &structures, &time);
        debug!(
            relation = %classification.relation,
            covert = covert_spirits.len(),
            hints = timing.len(),
            "analysis complete"
        );
        Ok(Report {
            question: question.to_string(),
            classification,
            when: None,
            time,
            xun: time.xun(),
            kong: time.kong(),
            nuclear: nuclear(lines)?,
            base,
            transformed,
            lines: enriched,
            structures,
            spirits,
            covert_spirits,
            timing,
        })
    }

    /// Serve a parsed facade request.
    pub fn handle(&self, input: &FacadeInput) -> EngineResult<Report> {
        match input {
            FacadeInput::Cast(cast) => {
                self.cast_and_analyze(&cast.request, &cast.question, cast.when)
            }
            FacadeInput::Lines(given) => {
                let lines: Lines = given.lines.as_slice().try_into().map_err(|_| {
                    EngineError::InvalidCast(format!(
                        "expected 6 lines, got {}",
                        given.lines.len()
                    ))
                })?;
                self.full_analysis(&lines, &given.question, given.when)
            }
        }
    }
}
