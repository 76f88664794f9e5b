//! Arithmétique des jours ouvrés (lundi → vendredi).
//!
//! Les dates circulent sous la forme `YYYYMMDD` ; l'ordre lexicographique
//! coïncide avec l'ordre chronologique.

use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Format texte d'une date dans le fichier de rota.
pub const DATE_FORMAT: &str = "%Y%m%d";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("invalid date (expected YYYYMMDD): {0}")]
    InvalidDate(String),
    #[error("invalid weekday code (expected Mon..Fri): {0}")]
    InvalidWeekday(String),
}

/// Jour calendaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(into = "String"))]
pub struct Day(NaiveDate);

impl Day {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Date factice `19700101` qui ne doit jamais apparaître dans une requête.
    pub fn is_sentinel(&self) -> bool {
        self.0.year() == 1970 && self.0.ordinal() == 1
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    pub fn is_business_day(&self) -> bool {
        !matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Code à trois lettres (`Mon`, `Tue`, ...).
    pub fn dow(&self) -> String {
        self.0.format("%a").to_string()
    }

    pub fn work_day(&self) -> Option<WorkDay> {
        WorkDay::from_weekday(self.weekday())
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for Day {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CalendarError::InvalidDate(s.to_string()));
        }
        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Self)
            .map_err(|_| CalendarError::InvalidDate(s.to_string()))
    }
}

impl From<Day> for String {
    fn from(day: Day) -> Self {
        day.to_string()
    }
}

/// Jour ouvré, seul domaine admis pour le télétravail récurrent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum WorkDay {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
}

impl WorkDay {
    pub const ALL: [WorkDay; 5] = [
        WorkDay::Mon,
        WorkDay::Tue,
        WorkDay::Wed,
        WorkDay::Thu,
        WorkDay::Fri,
    ];

    pub fn from_weekday(wd: Weekday) -> Option<Self> {
        match wd {
            Weekday::Mon => Some(WorkDay::Mon),
            Weekday::Tue => Some(WorkDay::Tue),
            Weekday::Wed => Some(WorkDay::Wed),
            Weekday::Thu => Some(WorkDay::Thu),
            Weekday::Fri => Some(WorkDay::Fri),
            Weekday::Sat | Weekday::Sun => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkDay::Mon => "Mon",
            WorkDay::Tue => "Tue",
            WorkDay::Wed => "Wed",
            WorkDay::Thu => "Thu",
            WorkDay::Fri => "Fri",
        }
    }
}

impl fmt::Display for WorkDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkDay {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WorkDay::ALL
            .into_iter()
            .find(|wd| wd.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CalendarError::InvalidWeekday(s.to_string()))
    }
}

/// Jour ouvré suivant (saute le week-end).
pub fn next_weekday(day: Day) -> Day {
    let mut d = day.0 + Duration::days(1);
    while matches!(d.weekday(), Weekday::Sat | Weekday::Sun) {
        d += Duration::days(1);
    }
    Day(d)
}

/// Jour ouvré précédent (saute le week-end).
pub fn prev_weekday(day: Day) -> Day {
    let mut d = day.0 - Duration::days(1);
    while matches!(d.weekday(), Weekday::Sat | Weekday::Sun) {
        d -= Duration::days(1);
    }
    Day(d)
}

/// Ramène un samedi/dimanche au vendredi qui précède ; un jour ouvré est inchangé.
pub fn clamp_to_weekday(day: Day) -> Day {
    if day.is_business_day() {
        day
    } else {
        prev_weekday(day)
    }
}

/// Aujourd'hui (UTC), ramené au dernier jour ouvré.
pub fn today() -> Day {
    clamp_to_weekday(Day(Utc::now().date_naive()))
}

/// `count` jours ouvrés consécutifs à partir de `start` (ramené à un jour ouvré).
pub fn business_days(start: Day, count: usize) -> impl Iterator<Item = Day> {
    std::iter::successors(Some(clamp_to_weekday(start)), |d| Some(next_weekday(*d))).take(count)
}
