//! Vimshottari dasha scheduling.
//!
//! Dashas are time periods ruled by planets, anchored to the Moon's
//! nakshatra at birth. The 120-year cycle opens with the nakshatra's lord;
//! the share of the nakshatra the Moon has already crossed counts as
//! elapsed before birth. Every boundary is measured in years from that
//! anchor, so neighbouring periods share their boundary instant exactly.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ephemeris::types::Body;
use crate::error::{ChartError, ChartResult};
use crate::time::UtcInstant;
use crate::vedic::nakshatra::nakshatra_for_longitude;

pub const VIMSHOTTARI_TOTAL_YEARS: f64 = 120.0;
pub const VIMSHOTTARI_YEAR_DAYS: f64 = 365.25;

const MILLIS_PER_DAY: f64 = 86_400_000.0;
// keeps Duration::milliseconds well inside its range
const MAX_OFFSET_MILLIS: f64 = 9.0e15;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DashaLevel {
    #[default]
    Mahadasha,
    Antardasha,
    Pratyantardasha,
}

impl DashaLevel {
    pub const ALL: [DashaLevel; 3] = [
        DashaLevel::Mahadasha,
        DashaLevel::Antardasha,
        DashaLevel::Pratyantardasha,
    ];

    pub fn next(self) -> Option<DashaLevel> {
        match self {
            DashaLevel::Mahadasha => Some(DashaLevel::Antardasha),
            DashaLevel::Antardasha => Some(DashaLevel::Pratyantardasha),
            DashaLevel::Pratyantardasha => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            DashaLevel::Mahadasha => "mahadasha",
            DashaLevel::Antardasha => "antardasha",
            DashaLevel::Pratyantardasha => "pratyantardasha",
        }
    }
}

impl fmt::Display for DashaLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for DashaLevel {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        DashaLevel::ALL
            .iter()
            .copied()
            .find(|level| level.id() == lower)
            .ok_or_else(|| ChartError::invalid("dashaDepth", format!("unknown level '{s}'")))
    }
}

pub const VIMSHOTTARI_SEQUENCE: [(Body, f64); 9] = [
    (Body::Ketu, 7.0),
    (Body::Venus, 20.0),
    (Body::Sun, 6.0),
    (Body::Moon, 10.0),
    (Body::Mars, 7.0),
    (Body::Rahu, 18.0),
    (Body::Jupiter, 16.0),
    (Body::Saturn, 19.0),
    (Body::Mercury, 17.0),
];

fn sequence_index(lord: Body) -> Option<usize> {
    VIMSHOTTARI_SEQUENCE.iter().position(|(body, _)| *body == lord)
}

/// Full Mahadasha length of `lord` in years.
pub fn dasha_years(lord: Body) -> f64 {
    sequence_index(lord)
        .map(|idx| VIMSHOTTARI_SEQUENCE[idx].1)
        .unwrap_or(0.0)
}

/// Nominal bounds in years from the cycle anchor, before clipping at birth.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct NominalSpan {
    start_years: f64,
    end_years: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashaPeriod {
    pub lord: Body,
    pub level: DashaLevel,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_days: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DashaPeriod>,
    #[serde(skip)]
    span: NominalSpan,
}

impl DashaPeriod {
    /// Half-open containment: `start <= instant < end`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// Vimshottari timeline for one birth.
#[derive(Debug, Clone, PartialEq)]
pub struct VimshottariDasha {
    birth: DateTime<Utc>,
    anchor: DateTime<Utc>,
    first_index: usize,
    elapsed_fraction: f64,
    year_days: f64,
}

impl VimshottariDasha {
    pub fn new(birth: &UtcInstant, moon_sidereal_longitude: f64) -> ChartResult<Self> {
        Self::with_year_days(birth, moon_sidereal_longitude, VIMSHOTTARI_YEAR_DAYS)
    }

    pub fn with_year_days(
        birth: &UtcInstant,
        moon_sidereal_longitude: f64,
        year_days: f64,
    ) -> ChartResult<Self> {
        if !moon_sidereal_longitude.is_finite() {
            return Err(ChartError::invalid("moonLongitude", "must be finite"));
        }
        if !year_days.is_finite() || year_days <= 0.0 {
            return Err(ChartError::invalid(
                "dashaYearDays",
                format!("{year_days} is not a positive number of days"),
            ));
        }

        let moon = nakshatra_for_longitude(moon_sidereal_longitude);
        let first_index = sequence_index(moon.base.lord).ok_or_else(|| {
            ChartError::invalid("moonLongitude", format!("{} rules no dasha", moon.base.lord))
        })?;
        let elapsed_years = VIMSHOTTARI_SEQUENCE[first_index].1 * moon.progress;

        let birth = birth.datetime();
        let anchor = birth
            .checked_sub_signed(years_to_duration(elapsed_years, year_days))
            .ok_or_else(|| ChartError::invalid("birth", "dasha anchor out of range"))?;

        log::debug!(
            "vimshottari: moon in {} ({}), {:.4} of nakshatra elapsed",
            moon.base.name,
            moon.base.lord,
            moon.progress
        );

        Ok(Self {
            birth,
            anchor,
            first_index,
            elapsed_fraction: moon.progress,
            year_days,
        })
    }

    /// Lord of the Mahadasha running at birth.
    pub fn birth_lord(&self) -> Body {
        VIMSHOTTARI_SEQUENCE[self.first_index].0
    }

    pub fn birth(&self) -> DateTime<Utc> {
        self.birth
    }

    /// Fraction of the Moon's nakshatra crossed at birth, [0, 1].
    pub fn elapsed_fraction(&self) -> f64 {
        self.elapsed_fraction
    }

    /// Years of the first Mahadasha remaining after birth.
    pub fn balance_years(&self) -> f64 {
        VIMSHOTTARI_SEQUENCE[self.first_index].1 * (1.0 - self.elapsed_fraction)
    }

    pub fn year_days(&self) -> f64 {
        self.year_days
    }

    /// Mahadashas from birth onward. Each call restarts at birth.
    pub fn iter(&self) -> Mahadashas<'_> {
        Mahadashas {
            dasha: self,
            next: 0,
        }
    }

    /// One full rotation: the first nine Mahadashas.
    ///
    /// The first period is clipped at birth, so the rotation ends
    /// `120 - elapsed` years after birth, where the birth lord returns.
    /// Use [`Self::iter`] for the timeline past that point.
    pub fn cycle(&self) -> Vec<DashaPeriod> {
        self.iter().take(VIMSHOTTARI_SEQUENCE.len()).collect()
    }

    /// One rotation with sub-periods filled in down to `depth`.
    pub fn tree(&self, depth: DashaLevel) -> Vec<DashaPeriod> {
        let mut periods = self.cycle();
        for period in &mut periods {
            self.fill_children(period, depth);
        }
        periods
    }

    fn fill_children(&self, period: &mut DashaPeriod, depth: DashaLevel) {
        if period.level >= depth {
            return;
        }
        let mut children = self.subperiods(period);
        for child in &mut children {
            self.fill_children(child, depth);
        }
        period.children = children;
    }

    /// Mahadasha running at `instant`; `None` before birth.
    pub fn period_at(&self, instant: DateTime<Utc>) -> Option<DashaPeriod> {
        if instant < self.birth {
            return None;
        }
        let elapsed_days = (instant - self.anchor).num_milliseconds() as f64 / MILLIS_PER_DAY;
        let cycles = (elapsed_days / self.year_days / VIMSHOTTARI_TOTAL_YEARS).floor();
        let first_guess = (cycles.max(0.0) as usize * VIMSHOTTARI_SEQUENCE.len()).saturating_sub(1);

        for k in first_guess..first_guess + 2 * VIMSHOTTARI_SEQUENCE.len() {
            let period = self.mahadasha(k)?;
            if period.contains(instant) {
                return Some(period);
            }
        }
        None
    }

    /// Antardashas of a Mahadasha, or Pratyantardashas of an Antardasha.
    ///
    /// The parent's full span is divided in proportion to each lord's years,
    /// starting from the parent's own lord; anything before birth is dropped
    /// and a sub-period straddling birth starts at birth.
    pub fn subperiods(&self, parent: &DashaPeriod) -> Vec<DashaPeriod> {
        let (Some(level), Some(first)) = (parent.level.next(), sequence_index(parent.lord)) else {
            return Vec::new();
        };
        let span = parent.span;
        let length = span.end_years - span.start_years;
        // periods that did not come from this scheduler carry no span
        if length <= 0.0 {
            return Vec::new();
        }

        let boundary = |cumulative: f64| {
            if cumulative >= VIMSHOTTARI_TOTAL_YEARS {
                span.end_years
            } else {
                span.start_years + length * cumulative / VIMSHOTTARI_TOTAL_YEARS
            }
        };

        let mut children = Vec::with_capacity(VIMSHOTTARI_SEQUENCE.len());
        let mut cumulative = 0.0;
        for offset in 0..VIMSHOTTARI_SEQUENCE.len() {
            let (lord, years) = VIMSHOTTARI_SEQUENCE[(first + offset) % VIMSHOTTARI_SEQUENCE.len()];
            let next = cumulative + years;
            let child_span = NominalSpan {
                start_years: boundary(cumulative),
                end_years: boundary(next),
            };
            cumulative = next;
            if let Some(child) = self.period(lord, level, child_span) {
                if child.end > self.birth {
                    children.push(child);
                }
            }
        }
        children
    }

    /// The chain Mahadasha -> ... -> `depth` running at `instant`.
    pub fn periods_at(&self, instant: DateTime<Utc>, depth: DashaLevel) -> Vec<DashaPeriod> {
        let Some(mahadasha) = self.period_at(instant) else {
            return Vec::new();
        };
        let mut chain = vec![mahadasha];
        while let Some(current) = chain.last() {
            if current.level >= depth {
                break;
            }
            match self
                .subperiods(current)
                .into_iter()
                .find(|p| p.contains(instant))
            {
                Some(child) => chain.push(child),
                None => break,
            }
        }
        chain
    }

    fn cumulative_years(&self, k: usize) -> f64 {
        let len = VIMSHOTTARI_SEQUENCE.len();
        let full_cycles = (k / len) as f64 * VIMSHOTTARI_TOTAL_YEARS;
        let partial: f64 = (0..k % len)
            .map(|j| VIMSHOTTARI_SEQUENCE[(self.first_index + j) % len].1)
            .sum();
        full_cycles + partial
    }

    /// The k-th Mahadasha counted from the cycle anchor, clipped at birth.
    fn mahadasha(&self, k: usize) -> Option<DashaPeriod> {
        let (lord, years) = VIMSHOTTARI_SEQUENCE[(self.first_index + k) % VIMSHOTTARI_SEQUENCE.len()];
        let start_years = self.cumulative_years(k);
        self.period(
            lord,
            DashaLevel::Mahadasha,
            NominalSpan {
                start_years,
                end_years: start_years + years,
            },
        )
    }

    fn instant_at(&self, years: f64) -> Option<DateTime<Utc>> {
        let millis = years * self.year_days * MILLIS_PER_DAY;
        if !millis.is_finite() || millis.abs() > MAX_OFFSET_MILLIS {
            return None;
        }
        self.anchor
            .checked_add_signed(Duration::milliseconds(millis.round() as i64))
    }

    fn period(&self, lord: Body, level: DashaLevel, span: NominalSpan) -> Option<DashaPeriod> {
        let start = self.instant_at(span.start_years)?.max(self.birth);
        let end = self.instant_at(span.end_years)?;
        Some(DashaPeriod {
            lord,
            level,
            start,
            end,
            duration_days: (end - start).num_milliseconds() as f64 / MILLIS_PER_DAY,
            children: Vec::new(),
            span,
        })
    }
}

fn years_to_duration(years: f64, year_days: f64) -> Duration {
    Duration::milliseconds((years * year_days * MILLIS_PER_DAY).round() as i64)
}

impl<'a> IntoIterator for &'a VimshottariDasha {
    type Item = DashaPeriod;
    type IntoIter = Mahadashas<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy sequence of Mahadashas, repeating the nine-lord rotation until the
/// calendar range of `DateTime<Utc>` runs out.
#[derive(Debug, Clone)]
pub struct Mahadashas<'a> {
    dasha: &'a VimshottariDasha,
    next: usize,
}

impl Iterator for Mahadashas<'_> {
    type Item = DashaPeriod;

    fn next(&mut self) -> Option<DashaPeriod> {
        loop {
            let period = self.dasha.mahadasha(self.next)?;
            self.next += 1;
            // a Moon at the very end of its nakshatra leaves nothing of the first period
            if period.end > self.dasha.birth {
                return Some(period);
            }
        }
    }
}

/// Build the Vimshottari timeline for a birth with the standard 365.25-day year.
pub fn vimshottari_dasha(
    birth: &UtcInstant,
    moon_sidereal_longitude: f64,
) -> ChartResult<VimshottariDasha> {
    VimshottariDasha::new(birth, moon_sidereal_longitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn birth() -> UtcInstant {
        UtcInstant::from_datetime(Utc.with_ymd_and_hms(1997, 10, 11, 1, 15, 0).unwrap())
    }

    #[test]
    fn test_sequence_totals_120_years() {
        let total: f64 = VIMSHOTTARI_SEQUENCE.iter().map(|(_, years)| years).sum();
        assert_eq!(total, VIMSHOTTARI_TOTAL_YEARS);
        assert_eq!(dasha_years(Body::Venus), 20.0);
    }

    #[test]
    fn test_moon_at_nakshatra_start_gives_full_first_period() {
        let dasha = vimshottari_dasha(&birth(), 0.0).unwrap();
        let first = dasha.iter().next().unwrap();
        assert_eq!(first.lord, Body::Ketu);
        assert_eq!(first.start, birth().datetime());
        assert!((first.duration_days - 7.0 * 365.25).abs() < 1e-6);
    }

    #[test]
    fn test_balance_from_half_crossed_nakshatra() {
        // middle of Bharani
        let lon = 1.5 * (360.0 / 27.0);
        let dasha = vimshottari_dasha(&birth(), lon).unwrap();
        assert_eq!(dasha.birth_lord(), Body::Venus);
        assert!((dasha.balance_years() - 10.0).abs() < 1e-9);
        let first = dasha.iter().next().unwrap();
        assert!((first.duration_days - 10.0 * 365.25).abs() < 1e-3);
    }

    #[test]
    fn test_mahadashas_are_contiguous() {
        let dasha = vimshottari_dasha(&birth(), 283.57).unwrap();
        let periods: Vec<_> = dasha.iter().take(30).collect();
        for pair in periods.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        let lords: Vec<_> = periods.iter().take(10).map(|p| p.lord).collect();
        assert_eq!(lords[0], Body::Moon);
        assert_eq!(lords[9], Body::Moon);
    }

    #[test]
    fn test_cycle_ends_where_birth_lord_returns() {
        let dasha = vimshottari_dasha(&birth(), 283.57).unwrap();
        let cycle = dasha.cycle();
        assert_eq!(cycle.len(), 9);
        let end = cycle[8].end;
        assert_eq!(end, dasha.anchor + years_to_duration(120.0, dasha.year_days()));
        assert!(end < birth().datetime() + years_to_duration(120.0, dasha.year_days()));

        let tenth = dasha.iter().nth(9).unwrap();
        assert_eq!(tenth.lord, dasha.birth_lord());
        assert_eq!(tenth.start, end);
    }

    #[test]
    fn test_full_rotation_spans_120_years() {
        let dasha = vimshottari_dasha(&birth(), 283.57).unwrap();
        let days: f64 = dasha.iter().skip(1).take(9).map(|p| p.duration_days).sum();
        assert!((days - 120.0 * 365.25).abs() < 1e-6, "days = {days}");
    }

    #[test]
    fn test_period_at_birth_is_nakshatra_lord() {
        let dasha = vimshottari_dasha(&birth(), 283.57).unwrap();
        let current = dasha.period_at(birth().datetime()).unwrap();
        assert_eq!(current.lord, Body::Moon);
        assert_eq!(current.level, DashaLevel::Mahadasha);
        assert!(dasha.period_at(birth().datetime() - Duration::seconds(1)).is_none());
    }

    #[test]
    fn test_period_at_far_future_matches_iterator() {
        let dasha = vimshottari_dasha(&birth(), 100.0).unwrap();
        let target = dasha.iter().nth(23).unwrap();
        let midpoint = target.start + (target.end - target.start) / 2;
        assert_eq!(dasha.period_at(midpoint).unwrap(), target);
        assert_eq!(dasha.period_at(target.start).unwrap(), target);
    }

    #[test]
    fn test_iterator_restarts() {
        let dasha = vimshottari_dasha(&birth(), 200.0).unwrap();
        assert_eq!(dasha.iter().nth(12), dasha.iter().nth(12));
        assert_eq!(dasha.cycle().len(), 9);
    }

    #[test]
    fn test_antardashas_partition_full_mahadasha() {
        let dasha = vimshottari_dasha(&birth(), 283.57).unwrap();
        let parent = dasha.iter().nth(1).unwrap();
        let subs = dasha.subperiods(&parent);
        assert_eq!(subs.len(), 9);
        assert_eq!(subs[0].lord, parent.lord);
        assert_eq!(subs[0].start, parent.start);
        assert_eq!(subs[8].end, parent.end);
        for pair in subs.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        // Mars-Mars: 7 * 7 / 120 years
        let expected = 7.0 * 7.0 / 120.0 * 365.25;
        assert!((subs[0].duration_days - expected).abs() < 1e-6);
        assert!(subs.iter().all(|s| s.level == DashaLevel::Antardasha));
    }

    #[test]
    fn test_antardashas_of_first_period_start_at_birth() {
        let dasha = vimshottari_dasha(&birth(), 283.57).unwrap();
        let first = dasha.iter().next().unwrap();
        let subs = dasha.subperiods(&first);
        assert!(!subs.is_empty() && subs.len() <= 9);
        assert_eq!(subs[0].start, birth().datetime());
        assert_eq!(subs.last().unwrap().end, first.end);
        assert!(subs.iter().all(|s| s.end > s.start));
    }

    #[test]
    fn test_periods_at_nests_to_depth() {
        let dasha = vimshottari_dasha(&birth(), 283.57).unwrap();
        let when = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let chain = dasha.periods_at(when, DashaLevel::Pratyantardasha);
        assert_eq!(chain.len(), 3);
        assert_eq!(
            chain.iter().map(|p| p.level).collect::<Vec<_>>(),
            DashaLevel::ALL.to_vec()
        );
        assert!(chain.iter().all(|p| p.contains(when)));
        assert!(dasha.subperiods(&chain[2]).is_empty());
    }

    #[test]
    fn test_tree_fills_children() {
        let dasha = vimshottari_dasha(&birth(), 283.57).unwrap();
        let tree = dasha.tree(DashaLevel::Antardasha);
        assert_eq!(tree.len(), 9);
        assert_eq!(tree[1].children.len(), 9);
        assert!(tree[1].children[0].children.is_empty());
    }

    #[test]
    fn test_invalid_year_length_rejected() {
        assert!(VimshottariDasha::with_year_days(&birth(), 10.0, 0.0).is_err());
        assert!(VimshottariDasha::with_year_days(&birth(), f64::NAN, 365.25).is_err());
        assert!(VimshottariDasha::with_year_days(&birth(), 10.0, 360.0).is_ok());
    }

    #[test]
    fn test_level_parses() {
        assert_eq!("Antardasha".parse::<DashaLevel>().unwrap(), DashaLevel::Antardasha);
        assert!("yogini".parse::<DashaLevel>().is_err());
    }
}
