extern crate chrono;

use crate::{
    config::window::DEFAULT_DAYS,
    error::{Error, Result},
};
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::fmt;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];
const AWARE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M%:z",
];

enum Parsed {
    Date(NaiveDate),
    Instant(DateTime<Utc>),
}

fn parse(raw: &str) -> Result<Option<Parsed>> {
    let s = raw.trim();
    if s.is_empty() {
        return Ok(None);
    }
    let invalid = || Error::InvalidDateFormat(s.to_string());
    if s.len() == 10 && s.matches('-').count() == 2 {
        return NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(|d| Some(Parsed::Date(d)))
            .map_err(|_| invalid());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(Some(Parsed::Instant(dt.with_timezone(&Utc))));
    }
    // `%:z` does not take `Z`
    let zoned = match s.strip_suffix('Z') {
        Some(rest) => format!("{}+00:00", rest),
        None => s.to_string(),
    };
    for fmt in AWARE_FORMATS {
        if let Ok(dt) = DateTime::<FixedOffset>::parse_from_str(&zoned, fmt) {
            return Ok(Some(Parsed::Instant(dt.with_timezone(&Utc))));
        }
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| Some(Parsed::Instant(Utc.from_utc_datetime(&naive))))
        .ok_or_else(invalid)
}

fn at(date: NaiveDate, hour: u32, min: u32, sec: u32) -> Result<DateTime<Utc>> {
    date.and_hms_opt(hour, min, sec)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| Error::InvalidDateFormat(date.to_string()))
}

/// Closed interval `[from, to]` in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    from: DateTime<Utc>,
    to: DateTime<Utc>,
}
impl DateWindow {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Self> {
        if from > to {
            Err(Error::InvalidRange { from, to })
        } else {
            Ok(Self { from, to })
        }
    }
    /// Resolves user input against `now`.
    ///
    /// A blank `from` means thirty days before `now`, a blank `to` means `now`.
    /// A bare date for `to` covers that whole day up to 23:59:59.
    pub fn resolve(from: Option<&str>, to: Option<&str>, now: DateTime<Utc>) -> Result<Self> {
        let from = match parse(from.unwrap_or_default())? {
            None => now - Duration::days(DEFAULT_DAYS),
            Some(Parsed::Date(d)) => at(d, 0, 0, 0)?,
            Some(Parsed::Instant(t)) => t,
        };
        let to = match parse(to.unwrap_or_default())? {
            None => now,
            Some(Parsed::Date(d)) => at(d, 23, 59, 59)?,
            Some(Parsed::Instant(t)) => t,
        };
        Self::new(from, to)
    }
    pub fn resolve_now(from: Option<&str>, to: Option<&str>) -> Result<Self> {
        Self::resolve(from, to, Utc::now())
    }
    pub fn from(&self) -> DateTime<Utc> {
        self.from
    }
    pub fn to(&self) -> DateTime<Utc> {
        self.to
    }
    pub fn from_timestamp(&self) -> i64 {
        self.from.timestamp()
    }
    pub fn to_timestamp(&self) -> i64 {
        self.to.timestamp()
    }
    pub fn contains(&self, ts: i64) -> bool {
        self.from_timestamp() <= ts && ts <= self.to_timestamp()
    }
    pub fn seconds(&self) -> f64 {
        (self.to - self.from).num_milliseconds() as f64 / 1000.0
    }
}
impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} → {}",
            self.from.format("%Y-%m-%d"),
            self.to.format("%Y-%m-%d")
        )
    }
}
