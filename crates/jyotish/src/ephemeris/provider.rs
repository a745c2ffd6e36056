//! The ephemeris seam: anything that can report geocentric tropical
//! positions for the nine grahas at an instant.

use chrono::Datelike;
use std::collections::BTreeMap;

use crate::angles::{normalize_degrees, signed_difference};
use crate::ephemeris::kepler::{planet_geocentric, sun_rectangular, ELEMENT_EPOCH_JD};
use crate::ephemeris::lunar::{moon_position, rahu_longitude};
use crate::ephemeris::types::{Body, EphemerisPositions, NodeMode, PlanetPosition};
use crate::error::{ChartError, ChartResult};
use crate::time::{UtcInstant, DAYS_PER_JULIAN_CENTURY, J2000_JD};

/// Earliest and latest calendar years the built-in theory is trusted for.
pub const MIN_SUPPORTED_YEAR: i32 = 1600;
pub const MAX_SUPPORTED_YEAR: i32 = 2400;

/// Half-width of the central difference used for daily motion.
const SPEED_STEP_DAYS: f64 = 0.5;

/// Source of tropical geocentric positions.
///
/// Implementations must be deterministic: the same instant always yields
/// the same positions.
pub trait EphemerisProvider: Send + Sync {
    fn positions(&self, instant: &UtcInstant) -> ChartResult<EphemerisPositions>;

    /// Short identifier for logs and serialized metadata.
    fn name(&self) -> &'static str;
}

/// Analytic ephemeris from mean orbital elements plus the major periodic
/// terms. Good to a few arc-minutes for the Sun and planets and about a
/// tenth of a degree for the Moon between 1600 and 2400.
///
/// Instants are treated as TT; the few tens of seconds of delta T over the
/// supported range are below the theory's precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeplerianEphemeris {
    pub node_mode: NodeMode,
}

impl KeplerianEphemeris {
    pub fn new(node_mode: NodeMode) -> Self {
        Self { node_mode }
    }

    fn check_range(instant: &UtcInstant) -> ChartResult<()> {
        let year = instant.datetime().year();
        if !(MIN_SUPPORTED_YEAR..=MAX_SUPPORTED_YEAR).contains(&year) {
            return Err(ChartError::unavailable(format!(
                "year {year} is outside the supported range {MIN_SUPPORTED_YEAR}-{MAX_SUPPORTED_YEAR}"
            )));
        }
        Ok(())
    }

    /// Longitude, latitude and distance of `body` at Julian Day `jd`.
    fn spherical(&self, body: Body, jd: f64) -> ChartResult<(f64, f64, f64)> {
        let d = jd - ELEMENT_EPOCH_JD;
        match body {
            Body::Sun => {
                let sun = sun_rectangular(d);
                Ok((sun.longitude(), 0.0, sun.distance()))
            }
            Body::Moon => Ok(moon_position(d)),
            Body::Rahu | Body::Ketu => {
                let t = (jd - J2000_JD) / DAYS_PER_JULIAN_CENTURY;
                let rahu = rahu_longitude(t, self.node_mode);
                let lon = if body == Body::Ketu {
                    normalize_degrees(rahu + 180.0)
                } else {
                    rahu
                };
                Ok((lon, 0.0, 0.0))
            }
            _ => planet_geocentric(body, d)
                .map(|geo| (geo.longitude(), geo.latitude(), geo.distance()))
                .ok_or_else(|| ChartError::unavailable(format!("no theory for {body}"))),
        }
    }

    fn position(&self, body: Body, jd: f64) -> ChartResult<PlanetPosition> {
        let (lon, lat, distance) = self.spherical(body, jd)?;
        let (before, _, _) = self.spherical(body, jd - SPEED_STEP_DAYS)?;
        let (after, _, _) = self.spherical(body, jd + SPEED_STEP_DAYS)?;
        let speed_lon = signed_difference(before, after) / (2.0 * SPEED_STEP_DAYS);

        if !lon.is_finite() || !speed_lon.is_finite() {
            return Err(ChartError::degenerate(format!(
                "non-finite position for {body} at JD {jd}"
            )));
        }

        Ok(PlanetPosition {
            lon,
            lat,
            distance,
            speed_lon,
            // the nodes regress even where the true node briefly stalls
            retrograde: body.is_node() || speed_lon < 0.0,
        })
    }
}

impl EphemerisProvider for KeplerianEphemeris {
    fn positions(&self, instant: &UtcInstant) -> ChartResult<EphemerisPositions> {
        Self::check_range(instant)?;
        let jd = instant.julian_day();

        let mut bodies = BTreeMap::new();
        for body in Body::ALL {
            let position = self.position(body, jd)?;
            log::debug!(
                "{body}: lon {:.4} lat {:.4} speed {:.4}{}",
                position.lon,
                position.lat,
                position.speed_lon,
                if position.retrograde { " R" } else { "" }
            );
            bodies.insert(body, position);
        }
        Ok(EphemerisPositions { bodies })
    }

    fn name(&self) -> &'static str {
        "keplerian"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(y: i32, mo: u32, d: u32, h: u32) -> UtcInstant {
        UtcInstant::from_datetime(Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap())
    }

    #[test]
    fn test_all_nine_bodies_present() {
        let positions = KeplerianEphemeris::default().positions(&at(2000, 1, 1, 12)).unwrap();
        assert_eq!(positions.bodies.len(), 9);
        for body in Body::ALL {
            let p = positions.require(body).unwrap();
            assert!((0.0..360.0).contains(&p.lon), "{body}: {}", p.lon);
        }
    }

    #[test]
    fn test_ketu_opposes_rahu_and_both_retrograde() {
        for mode in [NodeMode::Mean, NodeMode::True] {
            let positions = KeplerianEphemeris::new(mode).positions(&at(1985, 7, 3, 4)).unwrap();
            let rahu = positions.require(Body::Rahu).unwrap();
            let ketu = positions.require(Body::Ketu).unwrap();
            assert!((normalize_degrees(ketu.lon - rahu.lon) - 180.0).abs() < 1e-9);
            assert!(rahu.retrograde && ketu.retrograde);
        }
    }

    #[test]
    fn test_out_of_range_year_is_unavailable() {
        let result = KeplerianEphemeris::default().positions(&at(1500, 1, 1, 0));
        assert!(matches!(result, Err(ChartError::EphemerisUnavailable { .. })));
        let result = KeplerianEphemeris::default().positions(&at(2401, 1, 1, 0));
        assert!(matches!(result, Err(ChartError::EphemerisUnavailable { .. })));
    }

    #[test]
    fn test_moon_speed_is_plausible() {
        let positions = KeplerianEphemeris::default().positions(&at(2010, 3, 15, 0)).unwrap();
        let moon = positions.require(Body::Moon).unwrap();
        assert!((11.5..15.5).contains(&moon.speed_lon), "{}", moon.speed_lon);
        assert!(!moon.retrograde);
    }
}
