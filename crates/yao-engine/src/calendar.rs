//! The calendar capability: civil timestamps to sexagenary pillars.
//!
//! The engine only ever sees a [`SexagenaryTime`]. Callers with an almanac
//! of their own wrap it in [`FixedCalendar`]; [`SolarTermCalendar`] is a
//! self-contained approximation that places every solar-term boundary on a
//! fixed civil date.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use yao_core::{Branch, Pillar, SexagenaryTime, Stem};

use crate::error::CalendarError;

/// Converts a civil timestamp into the four pillars.
pub trait Calendar: Send + Sync {
    /// The year, month, day and hour pillars of `when`.
    fn to_ganzhi(&self, when: NaiveDateTime) -> Result<SexagenaryTime, CalendarError>;
}

impl<T: Calendar + ?Sized> Calendar for Box<T> {
    fn to_ganzhi(&self, when: NaiveDateTime) -> Result<SexagenaryTime, CalendarError> {
        (**self).to_ganzhi(when)
    }
}

/// A calendar that answers every timestamp with the same pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedCalendar {
    time: SexagenaryTime,
}

impl FixedCalendar {
    /// Always answer with `time`.
    pub fn new(time: SexagenaryTime) -> Self {
        Self { time }
    }
}

impl Calendar for FixedCalendar {
    fn to_ganzhi(&self, _when: NaiveDateTime) -> Result<SexagenaryTime, CalendarError> {
        Ok(self.time)
    }
}

/// Approximate civil start date of each solar month (节), in civil order.
const JIE: [(u32, u32, Branch); 12] = [
    (1, 6, Branch::Chou),
    (2, 4, Branch::Yin),
    (3, 6, Branch::Mao),
    (4, 5, Branch::Chen),
    (5, 6, Branch::Si),
    (6, 6, Branch::Wu),
    (7, 7, Branch::Wei),
    (8, 8, Branch::Shen),
    (9, 8, Branch::You),
    (10, 8, Branch::Xu),
    (11, 7, Branch::Hai),
    (12, 7, Branch::Zi),
];

/// `num_days_from_ce` offset that puts 2000-01-01 on 戊午.
const DAY_CYCLE_OFFSET: i64 = 14;

/// Built-in approximation of the solar-term calendar for 1900..=2100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolarTermCalendar;

impl SolarTermCalendar {
    /// First supported civil year.
    pub const FIRST_YEAR: i32 = 1900;
    /// Last supported civil year.
    pub const LAST_YEAR: i32 = 2100;

    fn year_pillar(date: NaiveDate) -> Pillar {
        let solar_year = if (date.month(), date.day()) < (2, 4) {
            date.year() - 1
        } else {
            date.year()
        };
        Pillar::from_cycle_index((solar_year - 4).rem_euclid(60) as usize)
    }

    fn month_pillar(date: NaiveDate, year_stem: Stem) -> Result<Pillar, CalendarError> {
        let branch = JIE
            .iter()
            .rev()
            .find(|(m, d, _)| (*m, *d) <= (date.month(), date.day()))
            .map_or(Branch::Zi, |&(_, _, b)| b);
        // 甲己之年丙作首: the 寅 month stem follows the year stem.
        let yin_stem = (year_stem.index() % 5) * 2 + 2;
        let stem = Stem::from_index(yin_stem + Branch::Yin.distance_to(branch));
        Pillar::new(stem, branch).map_err(|e| CalendarError::Conversion(e.to_string()))
    }

    fn day_pillar(date: NaiveDate) -> Pillar {
        let days = i64::from(date.num_days_from_ce()) + DAY_CYCLE_OFFSET;
        Pillar::from_cycle_index(days.rem_euclid(60) as usize)
    }

    fn hour_pillar(hour: u32, day_stem: Stem) -> Result<Pillar, CalendarError> {
        let branch = Branch::from_index(((hour as usize) + 1) / 2);
        // 甲己还加甲: the 子 hour stem follows the day stem.
        let stem = Stem::from_index((day_stem.index() % 5) * 2 + branch.index());
        Pillar::new(stem, branch).map_err(|e| CalendarError::Conversion(e.to_string()))
    }
}

impl Calendar for SolarTermCalendar {
    fn to_ganzhi(&self, when: NaiveDateTime) -> Result<SexagenaryTime, CalendarError> {
        let date = when.date();
        if !(Self::FIRST_YEAR..=Self::LAST_YEAR).contains(&date.year()) {
            return Err(CalendarError::OutOfRange(date.year()));
        }
        let year = Self::year_pillar(date);
        let month = Self::month_pillar(date, year.stem)?;
        // 23:00 already belongs to the next day's 子 hour.
        let day_date = if when.hour() == 23 {
            date.succ_opt()
                .ok_or_else(|| CalendarError::Conversion(format!("no day after {date}")))?
        } else {
            date
        };
        let day = Self::day_pillar(day_date);
        let hour = Self::hour_pillar(when.hour(), day.stem)?;
        let time = SexagenaryTime::new(year, month, day, hour);
        tracing::trace!(%when, %time, "converted timestamp");
        Ok(time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn convert(y: i32, m: u32, d: u32, h: u32) -> String {
        SolarTermCalendar.to_ganzhi(at(y, m, d, h)).unwrap().to_string()
    }

    #[test]
    fn millennium_noon() {
        assert_eq!(convert(2000, 1, 1, 12), "己卯年 丙子月 戊午日 戊午时");
    }

    #[test]
    fn year_turns_at_lichun() {
        let before = SolarTermCalendar.to_ganzhi(at(2024, 2, 3, 10)).unwrap();
        let after = SolarTermCalendar.to_ganzhi(at(2024, 2, 4, 10)).unwrap();
        assert_eq!(before.year.to_string(), "癸卯");
        assert_eq!(after.year.to_string(), "甲辰");
        assert_eq!(before.month.to_string(), "乙丑");
        assert_eq!(after.month.to_string(), "丙寅");
    }

    #[test]
    fn consecutive_days_advance_cycle() {
        let a = SolarTermCalendar.to_ganzhi(at(2023, 6, 30, 9)).unwrap();
        let b = SolarTermCalendar.to_ganzhi(at(2023, 7, 1, 9)).unwrap();
        assert_eq!((a.day.cycle_index() + 1) % 60, b.day.cycle_index());
    }

    #[test]
    fn late_hour_rolls_into_next_day() {
        let late = SolarTermCalendar.to_ganzhi(at(2000, 1, 1, 23)).unwrap();
        let next = SolarTermCalendar.to_ganzhi(at(2000, 1, 2, 0)).unwrap();
        assert_eq!(late.day, next.day);
        assert_eq!(late.hour, next.hour);
        assert_eq!(late.hour.branch, Branch::Zi);
        assert_eq!(late.day.to_string(), "己未");
    }

    #[test]
    fn out_of_range_years() {
        assert_eq!(
            SolarTermCalendar.to_ganzhi(at(1899, 12, 31, 0)),
            Err(CalendarError::OutOfRange(1899))
        );
        assert!(SolarTermCalendar.to_ganzhi(at(2100, 12, 31, 22)).is_ok());
    }

    #[test]
    fn fixed_calendar_ignores_timestamp() {
        let time: SexagenaryTime = "甲子 丙寅 戊午 庚申".parse().unwrap();
        let cal = FixedCalendar::new(time);
        assert_eq!(cal.to_ganzhi(at(1950, 1, 1, 0)), Ok(time));
        assert_eq!(cal.to_ganzhi(at(2050, 8, 8, 8)), Ok(time));
        let boxed: Box<dyn Calendar> = Box::new(cal);
        assert_eq!(boxed.to_ganzhi(at(2000, 1, 1, 0)), Ok(time));
    }
}
