//! Casting: producing six raw line types.
//!
//! Every mode is a pure function of its input. The random mode takes its
//! seed explicitly so that a reading can be replayed.

use chrono::{Datelike, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use yao_core::palace::hexagram_bits;
use yao_core::{LineType, SexagenaryTime, Trigram, YinYang};

use crate::error::{EngineError, EngineResult};

/// Six cast lines, index 0 = bottom.
pub type Lines = [LineType; 6];

/// One face of a coin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coin {
    /// 字: the inscribed face.
    Heads,
    /// 背: the back.
    Tails,
}

/// One throw of three coins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoinThrow {
    /// The number of backs showing, 0..=3.
    Backs(u8),
    /// The three faces as thrown.
    Coins([Coin; 3]),
}

impl CoinThrow {
    /// Count of backs, validated to 0..=3.
    pub fn backs(self) -> EngineResult<u8> {
        match self {
            Self::Backs(n) if n <= 3 => Ok(n),
            Self::Backs(n) => Err(EngineError::InvalidCast(format!(
                "a throw shows 0 to 3 backs, got {n}"
            ))),
            Self::Coins(coins) => Ok(coins.iter().filter(|&&c| c == Coin::Tails).count() as u8),
        }
    }

    /// The line this throw produces.
    pub fn line(self) -> EngineResult<LineType> {
        Ok(line_for_backs(self.backs()?))
    }
}

/// One back 少阳, two 少阴, three 老阳, none 老阴.
fn line_for_backs(backs: u8) -> LineType {
    match backs {
        1 => LineType::YoungYang,
        2 => LineType::YoungYin,
        3 => LineType::OldYang,
        _ => LineType::OldYin,
    }
}

/// How a reading is cast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum CastRequest {
    /// Six coin throws, bottom line first.
    Coin {
        /// The throws.
        coin_throws: Vec<CoinThrow>,
    },
    /// Two positive numbers (梅花 style).
    Number {
        /// `(n1, n2)`: upper and lower seeds.
        number_pair: (u32, u32),
    },
    /// Derived from the moment of casting.
    Time {
        /// The moment; defaults to the analysis time when absent.
        #[serde(default)]
        timestamp: Option<NaiveDateTime>,
    },
    /// Six simulated throws from a seeded generator.
    Random {
        /// RNG seed.
        seed: u64,
    },
}

impl CastRequest {
    /// Short name of the mode, for logs.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Coin { .. } => "coin",
            Self::Number { .. } => "number",
            Self::Time { .. } => "time",
            Self::Random { .. } => "random",
        }
    }
}

/// Cast from six coin throws.
pub fn cast_coins(throws: &[CoinThrow]) -> EngineResult<Lines> {
    if throws.len() != 6 {
        return Err(EngineError::InvalidCast(format!(
            "expected 6 coin throws, got {}",
            throws.len()
        )));
    }
    let mut lines = [LineType::YoungYang; 6];
    for (slot, throw) in lines.iter_mut().zip(throws) {
        *slot = throw.line()?;
    }
    Ok(lines)
}

/// Static lines spelling `upper` over `lower`.
pub fn static_lines(upper: Trigram, lower: Trigram) -> Lines {
    let bits = hexagram_bits(upper, lower);
    std::array::from_fn(|i| {
        if (bits >> i) & 1 == 1 {
            LineType::fixed(YinYang::Yang)
        } else {
            LineType::fixed(YinYang::Yin)
        }
    })
}

/// Cast from two positive numbers.
///
/// `n1` picks the upper trigram, `n2` the lower, and their sum the single
/// moving line.
pub fn cast_numbers(n1: u32, n2: u32) -> EngineResult<Lines> {
    if n1 == 0 || n2 == 0 {
        return Err(EngineError::InvalidCast(format!(
            "number cast needs two positive integers, got ({n1}, {n2})"
        )));
    }
    let mut lines = static_lines(Trigram::from_number(n1), Trigram::from_number(n2));
    let moving = ((u64::from(n1) + u64::from(n2) - 1) % 6) as usize;
    lines[moving] = lines[moving].to_moving();
    Ok(lines)
}

/// Cast from a moment, given its pillars.
///
/// Year number is the year branch ordinal (子 = 1), month number counts from
/// 寅 = 1, day is the civil day of month and hour is the hour branch ordinal.
/// The upper seed is year + month + day, the lower adds the hour.
pub fn cast_time(when: NaiveDateTime, time: &SexagenaryTime) -> EngineResult<Lines> {
    let year = time.year.branch.index() as u32 + 1;
    let month = yao_core::Branch::Yin.distance_to(time.month_branch()) as u32 + 1;
    let hour = time.hour.branch.index() as u32 + 1;
    let upper = year + month + when.day();
    cast_numbers(upper, upper + hour)
}

/// Cast six simulated coin throws from a seeded generator.
pub fn cast_random(seed: u64) -> Lines {
    let mut rng = StdRng::seed_from_u64(seed);
    std::array::from_fn(|_| {
        let backs: u8 = (0..3).map(|_| rng.random_range(0..=1u8)).sum();
        line_for_backs(backs)
    })
}

/// Parse a six-digit 6/7/8/9 tally string, bottom line first.
pub fn parse_tally(s: &str) -> EngineResult<Lines> {
    let digits: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() != 6 {
        return Err(EngineError::InvalidCast(format!(
            "expected 6 line digits, got {}",
            digits.len()
        )));
    }
    let mut lines = [LineType::YoungYang; 6];
    for (slot, c) in lines.iter_mut().zip(digits) {
        *slot = c
            .to_digit(10)
            .and_then(|d| LineType::from_number(d as u8))
            .ok_or_else(|| EngineError::InvalidCast(format!("'{c}' is not one of 6, 7, 8, 9")))?;
    }
    Ok(lines)
}

/// Render lines as their 6/7/8/9 tally, bottom line first.
pub fn format_tally(lines: &Lines) -> String {
    lines.iter().map(|l| l.number().to_string()).collect()
}
