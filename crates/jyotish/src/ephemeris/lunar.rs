//! Moon and lunar node theory.
//!
//! The Moon starts from its Keplerian mean orbit (see [`super::kepler`]) and
//! adds the largest periodic perturbations: evection, variation, the annual
//! equation and the parallactic inequality, plus smaller terms. The nodes
//! use Meeus, "Astronomical Algorithms", ch. 47.

use crate::angles::{cos_deg, normalize_degrees, sin_deg};
use crate::ephemeris::kepler::{moon_elements, sun_elements};
use crate::ephemeris::types::NodeMode;

/// Geocentric ecliptic longitude, latitude (deg) and distance (Earth radii)
/// of the Moon at day number `d`.
pub fn moon_position(d: f64) -> (f64, f64, f64) {
    let moon = moon_elements(d);
    let sun = sun_elements(d);
    let orbit = moon.rectangular();

    let ms = sun.mean_anomaly;
    let mm = moon.mean_anomaly;
    let sun_mean_lon = ms + sun.perihelion;
    let moon_mean_lon = mm + moon.perihelion + moon.node;
    let elongation = moon_mean_lon - sun_mean_lon;
    let latitude_arg = moon_mean_lon - moon.node;
    let (dd, f) = (elongation, latitude_arg);

    let d_lon = -1.274 * sin_deg(mm - 2.0 * dd)
        + 0.658 * sin_deg(2.0 * dd)
        - 0.186 * sin_deg(ms)
        - 0.059 * sin_deg(2.0 * mm - 2.0 * dd)
        - 0.057 * sin_deg(mm - 2.0 * dd + ms)
        + 0.053 * sin_deg(mm + 2.0 * dd)
        + 0.046 * sin_deg(2.0 * dd - ms)
        + 0.041 * sin_deg(mm - ms)
        - 0.035 * sin_deg(dd)
        - 0.031 * sin_deg(mm + ms)
        - 0.015 * sin_deg(2.0 * f - 2.0 * dd)
        + 0.011 * sin_deg(mm - 4.0 * dd);

    let d_lat = -0.173 * sin_deg(f - 2.0 * dd)
        - 0.055 * sin_deg(mm - f - 2.0 * dd)
        - 0.046 * sin_deg(mm + f - 2.0 * dd)
        + 0.033 * sin_deg(f + 2.0 * dd)
        + 0.017 * sin_deg(2.0 * mm + f);

    let d_dist = -0.58 * cos_deg(mm - 2.0 * dd) - 0.46 * cos_deg(2.0 * dd);

    (
        normalize_degrees(orbit.longitude() + d_lon),
        orbit.latitude() + d_lat,
        orbit.distance() + d_dist,
    )
}

/// Mean longitude of the ascending node (Rahu), degrees [0, 360).
///
/// `t` is Julian centuries since J2000.0.
pub fn mean_rahu(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    normalize_degrees(
        125.044_547_9 - 1_934.136_289_1 * t + 0.002_075_4 * t2 + t3 / 467_441.0
            - t4 / 60_616_000.0,
    )
}

/// True longitude of the ascending node: the mean node plus its five
/// principal periodic terms.
pub fn true_rahu(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let elongation = 297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2 + t3 / 545_868.0
        - t4 / 113_065_000.0;
    let sun_anomaly = 357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2 + t3 / 24_490_000.0;
    let moon_anomaly = 134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2 + t3 / 69_699.0
        - t4 / 14_712_000.0;
    let latitude_arg = 93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t2
        - t3 / 3_526_000.0
        + t4 / 863_310_000.0;

    let correction = -1.4979 * sin_deg(2.0 * (elongation - latitude_arg))
        - 0.1500 * sin_deg(sun_anomaly)
        - 0.1226 * sin_deg(2.0 * elongation)
        + 0.1176 * sin_deg(2.0 * latitude_arg)
        - 0.0801 * sin_deg(2.0 * (moon_anomaly - latitude_arg));

    normalize_degrees(mean_rahu(t) + correction)
}

pub fn rahu_longitude(t: f64, mode: NodeMode) -> f64 {
    match mode {
        NodeMode::Mean => mean_rahu(t),
        NodeMode::True => true_rahu(t),
    }
}
