//! Civil birth time to absolute UTC.
//!
//! The UTC offset is always an explicit input. The executing process's own
//! time zone is never consulted, so the same birth record produces the same
//! instant on every machine.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

pub const J2000_JD: f64 = 2_451_545.0;
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;
const UNIX_EPOCH_JD: f64 = 2_440_587.5;
const SECONDS_PER_DAY: f64 = 86_400.0;

pub const MIN_UTC_OFFSET_HOURS: f64 = -12.0;
pub const MAX_UTC_OFFSET_HOURS: f64 = 14.0;

/// A single absolute point in time.
///
/// Built once per birth record and handed to every downstream stage so no
/// stage re-derives UTC on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UtcInstant(DateTime<Utc>);

impl UtcInstant {
    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self(datetime)
    }

    /// Instant for a Julian Day number on the UT scale (millisecond resolution).
    pub fn from_julian_day(jd: f64) -> ChartResult<Self> {
        if !jd.is_finite() {
            return Err(ChartError::invalid("julian_day", "must be finite"));
        }
        let millis = ((jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY * 1000.0).round();
        DateTime::<Utc>::from_timestamp_millis(millis as i64)
            .map(Self)
            .ok_or_else(|| ChartError::invalid("julian_day", format!("{jd} is out of range")))
    }

    pub fn datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Julian Day (UT).
    pub fn julian_day(&self) -> f64 {
        let seconds =
            self.0.timestamp() as f64 + f64::from(self.0.timestamp_subsec_nanos()) * 1e-9;
        UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY
    }

    /// Days elapsed since J2000.0 (2000-01-01 12:00 UT).
    pub fn days_since_j2000(&self) -> f64 {
        self.julian_day() - J2000_JD
    }

    /// Julian centuries since J2000.0.
    pub fn julian_centuries(&self) -> f64 {
        self.days_since_j2000() / DAYS_PER_JULIAN_CENTURY
    }
}

/// A birth record as entered by the user: wall-clock date and time at the
/// birth place, the place's coordinates and its UTC offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthInput {
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// Degrees, north positive.
    pub latitude: f64,
    /// Degrees, east positive.
    pub longitude: f64,
    pub utc_offset_hours: f64,
}

impl BirthInput {
    /// Build and validate a birth record.
    pub fn new(
        date: NaiveDate,
        time: NaiveTime,
        latitude: f64,
        longitude: f64,
        utc_offset_hours: f64,
    ) -> ChartResult<Self> {
        let input = Self {
            date,
            time,
            latitude,
            longitude,
            utc_offset_hours,
        };
        input.validate()?;
        Ok(input)
    }

    /// Build from raw calendar fields, e.g. `(1997, 10, 11, 6, 45, ...)`.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        latitude: f64,
        longitude: f64,
        utc_offset_hours: f64,
    ) -> ChartResult<Self> {
        let date = civil_date(year, month, day)?;
        let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
            ChartError::invalid("time", format!("{hour:02}:{minute:02} is not a valid time"))
        })?;
        Self::new(date, time, latitude, longitude, utc_offset_hours)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ChartError::invalid(
                "latitude",
                format!("{} is outside [-90, 90]", self.latitude),
            ));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ChartError::invalid(
                "longitude",
                format!("{} is outside [-180, 180]", self.longitude),
            ));
        }
        validate_offset(self.utc_offset_hours)
    }

    pub fn to_utc(&self) -> ChartResult<UtcInstant> {
        self.validate()?;
        to_utc(self.date, self.time, self.utc_offset_hours)
    }
}

fn validate_offset(utc_offset_hours: f64) -> ChartResult<()> {
    if !(MIN_UTC_OFFSET_HOURS..=MAX_UTC_OFFSET_HOURS).contains(&utc_offset_hours) {
        return Err(ChartError::invalid(
            "utcOffsetHours",
            format!(
                "{utc_offset_hours} is outside [{MIN_UTC_OFFSET_HOURS}, {MAX_UTC_OFFSET_HOURS}]"
            ),
        ));
    }
    Ok(())
}

/// Convert a civil wall-clock reading into UTC.
///
/// `UTC = wall clock read as if it were UTC - offset`. Offsets are rounded
/// to the nearest second, so +5.5 and +5.75 shift by exactly 19800 s and
/// 20700 s.
pub fn to_utc(date: NaiveDate, time: NaiveTime, utc_offset_hours: f64) -> ChartResult<UtcInstant> {
    validate_offset(utc_offset_hours)?;
    let wall_clock = Utc.from_utc_datetime(&NaiveDateTime::new(date, time));
    let offset_seconds = (utc_offset_hours * 3600.0).round() as i64;
    wall_clock
        .checked_sub_signed(Duration::seconds(offset_seconds))
        .map(UtcInstant)
        .ok_or_else(|| {
            ChartError::invalid(
                "date",
                format!("{date} {time} at UTC{utc_offset_hours:+} is outside the calendar range"),
            )
        })
}

/// Calendar date from year/month/day, rejecting impossible dates.
pub fn civil_date(year: i32, month: u32, day: u32) -> ChartResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        ChartError::invalid("date", format!("{year:04}-{month:02}-{day:02} is not a calendar date"))
    })
}

/// Parse `HH:MM` or `HH:MM:SS`.
pub fn parse_time(value: &str) -> ChartResult<NaiveTime> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| ChartError::invalid("time", format!("'{value}' is not HH:MM or HH:MM:SS")))
}

/// Parse `YYYY-MM-DD`.
pub fn parse_date(value: &str) -> ChartResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ChartError::invalid("date", format!("'{value}' is not YYYY-MM-DD")))
}
