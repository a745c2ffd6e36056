//! Mean orbital elements and two-body positions.
//!
//! Elements are referred to the ecliptic and equinox of date, as linear
//! functions of `d`, the day number counted from 2000 Jan 0.0 UT
//! (JD 2451543.5). Source: P. Schlyter, "How to compute planetary positions".
//! Precision is about one to two arc-minutes for Sun..Saturn over several
//! centuries around 2000.

use crate::angles::{cos_deg, normalize_degrees, sin_deg};
use crate::ephemeris::types::Body;

/// JD of day number zero (2000 Jan 0.0 UT).
pub const ELEMENT_EPOCH_JD: f64 = 2_451_543.5;

const KEPLER_TOLERANCE_DEG: f64 = 1e-9;
const KEPLER_MAX_ITERATIONS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    /// Longitude of the ascending node (deg)
    pub node: f64,
    /// Inclination to the ecliptic (deg)
    pub inclination: f64,
    /// Argument of perihelion (deg)
    pub perihelion: f64,
    /// Semi-major axis (AU; Earth radii for the Moon)
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    /// Mean anomaly (deg, normalized)
    pub mean_anomaly: f64,
}

/// Rectangular ecliptic coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangular {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Rectangular {
    pub fn from_spherical(lon: f64, lat: f64, r: f64) -> Self {
        Self {
            x: r * cos_deg(lat) * cos_deg(lon),
            y: r * cos_deg(lat) * sin_deg(lon),
            z: r * sin_deg(lat),
        }
    }

    pub fn longitude(&self) -> f64 {
        normalize_degrees(self.y.atan2(self.x).to_degrees())
    }

    pub fn latitude(&self) -> f64 {
        self.z.atan2(self.x.hypot(self.y)).to_degrees()
    }

    pub fn distance(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Mean elements for `body` at day number `d`. `None` for the lunar nodes.
pub fn elements(body: Body, d: f64) -> Option<OrbitalElements> {
    let (node, inclination, perihelion, semi_major_axis, eccentricity, mean_anomaly) = match body {
        Body::Sun => return Some(sun_elements(d)),
        Body::Moon => return Some(moon_elements(d)),
        Body::Mercury => (
            48.3313 + 3.24587e-5 * d,
            7.0047 + 5.00e-8 * d,
            29.1241 + 1.01444e-5 * d,
            0.387098,
            0.205635 + 5.59e-10 * d,
            168.6562 + 4.0923344368 * d,
        ),
        Body::Venus => (
            76.6799 + 2.46590e-5 * d,
            3.3946 + 2.75e-8 * d,
            54.8910 + 1.38374e-5 * d,
            0.723330,
            0.006773 - 1.302e-9 * d,
            48.0052 + 1.6021302244 * d,
        ),
        Body::Mars => (
            49.5574 + 2.11081e-5 * d,
            1.8497 - 1.78e-8 * d,
            286.5016 + 2.92961e-5 * d,
            1.523688,
            0.093405 + 2.516e-9 * d,
            18.6021 + 0.5240207766 * d,
        ),
        Body::Jupiter => (
            100.4542 + 2.76854e-5 * d,
            1.3030 - 1.557e-7 * d,
            273.8777 + 1.64505e-5 * d,
            5.20256,
            0.048498 + 4.469e-9 * d,
            19.8950 + 0.0830853001 * d,
        ),
        Body::Saturn => (
            113.6634 + 2.38980e-5 * d,
            2.4886 - 1.081e-7 * d,
            339.3939 + 2.97661e-5 * d,
            9.55475,
            0.055546 - 9.499e-9 * d,
            316.9670 + 0.0334442282 * d,
        ),
        Body::Rahu | Body::Ketu => return None,
    };

    Some(OrbitalElements {
        node,
        inclination,
        perihelion,
        semi_major_axis,
        eccentricity,
        mean_anomaly: normalize_degrees(mean_anomaly),
    })
}

pub fn sun_elements(d: f64) -> OrbitalElements {
    OrbitalElements {
        node: 0.0,
        inclination: 0.0,
        perihelion: 282.9404 + 4.70935e-5 * d,
        semi_major_axis: 1.0,
        eccentricity: 0.016709 - 1.151e-9 * d,
        mean_anomaly: normalize_degrees(356.0470 + 0.9856002585 * d),
    }
}

/// Geocentric mean orbit of the Moon (distances in Earth radii).
pub fn moon_elements(d: f64) -> OrbitalElements {
    OrbitalElements {
        node: 125.1228 - 0.0529538083 * d,
        inclination: 5.1454,
        perihelion: 318.0634 + 0.1643573223 * d,
        semi_major_axis: 60.2666,
        eccentricity: 0.054900,
        mean_anomaly: normalize_degrees(115.3654 + 13.0649929509 * d),
    }
}

/// Solve Kepler's equation `M = E - e sin E` for E (degrees) by Newton iteration.
pub fn solve_kepler(mean_anomaly_deg: f64, eccentricity: f64) -> f64 {
    let e = eccentricity;
    let m = mean_anomaly_deg;
    let mut ecc_anomaly = m + (e * sin_deg(m) * (1.0 + e * cos_deg(m))).to_degrees();
    for _ in 0..KEPLER_MAX_ITERATIONS {
        let delta = (ecc_anomaly - (e * sin_deg(ecc_anomaly)).to_degrees() - m)
            / (1.0 - e * cos_deg(ecc_anomaly));
        ecc_anomaly -= delta;
        if delta.abs() < KEPLER_TOLERANCE_DEG {
            break;
        }
    }
    ecc_anomaly
}

impl OrbitalElements {
    /// True anomaly (deg) and radius vector.
    pub fn anomaly_and_radius(&self) -> (f64, f64) {
        let e = self.eccentricity;
        let ecc_anomaly = solve_kepler(self.mean_anomaly, e);
        let xv = self.semi_major_axis * (cos_deg(ecc_anomaly) - e);
        let yv = self.semi_major_axis * (1.0 - e * e).sqrt() * sin_deg(ecc_anomaly);
        (yv.atan2(xv).to_degrees(), xv.hypot(yv))
    }

    /// Position in the orbit's central-body frame (heliocentric for
    /// planets, geocentric for the Moon).
    pub fn rectangular(&self) -> Rectangular {
        let (true_anomaly, r) = self.anomaly_and_radius();
        let u = true_anomaly + self.perihelion;
        let (n, i) = (self.node, self.inclination);
        Rectangular {
            x: r * (cos_deg(n) * cos_deg(u) - sin_deg(n) * sin_deg(u) * cos_deg(i)),
            y: r * (sin_deg(n) * cos_deg(u) + cos_deg(n) * sin_deg(u) * cos_deg(i)),
            z: r * sin_deg(u) * sin_deg(i),
        }
    }
}

/// Geocentric position of the Sun: rectangular coordinates in AU.
pub fn sun_rectangular(d: f64) -> Rectangular {
    let sun = sun_elements(d);
    let (true_anomaly, r) = sun.anomaly_and_radius();
    Rectangular::from_spherical(true_anomaly + sun.perihelion, 0.0, r)
}

/// Heliocentric corrections for the mutual perturbations of Jupiter and
/// Saturn (the "great inequality"). Returns `(d_lon, d_lat)` in degrees.
pub fn giant_planet_perturbation(body: Body, d: f64) -> (f64, f64) {
    let mj = normalize_degrees(19.8950 + 0.0830853001 * d);
    let ms = normalize_degrees(316.9670 + 0.0334442282 * d);
    match body {
        Body::Jupiter => (
            -0.332 * sin_deg(2.0 * mj - 5.0 * ms - 67.6)
                - 0.056 * sin_deg(2.0 * mj - 2.0 * ms + 21.0)
                + 0.042 * sin_deg(3.0 * mj - 5.0 * ms + 21.0)
                - 0.036 * sin_deg(mj - 2.0 * ms)
                + 0.022 * cos_deg(mj - ms)
                + 0.023 * sin_deg(2.0 * mj - 3.0 * ms + 52.0)
                - 0.016 * sin_deg(mj - 5.0 * ms - 69.0),
            0.0,
        ),
        Body::Saturn => (
            0.812 * sin_deg(2.0 * mj - 5.0 * ms - 67.6)
                - 0.229 * cos_deg(2.0 * mj - 4.0 * ms - 2.0)
                + 0.119 * sin_deg(mj - 2.0 * ms - 3.0)
                + 0.046 * sin_deg(2.0 * mj - 6.0 * ms - 69.0)
                + 0.014 * sin_deg(mj - 3.0 * ms + 32.0),
            -0.020 * cos_deg(2.0 * mj - 4.0 * ms - 2.0) + 0.018 * sin_deg(2.0 * mj - 6.0 * ms - 49.0),
        ),
        _ => (0.0, 0.0),
    }
}

/// Geocentric position of a planet (Mercury..Saturn) at day number `d`.
pub fn planet_geocentric(body: Body, d: f64) -> Option<Rectangular> {
    if matches!(body, Body::Sun | Body::Moon | Body::Rahu | Body::Ketu) {
        return None;
    }
    let mut helio = elements(body, d)?.rectangular();

    let (d_lon, d_lat) = giant_planet_perturbation(body, d);
    if d_lon != 0.0 || d_lat != 0.0 {
        helio = Rectangular::from_spherical(
            helio.longitude() + d_lon,
            helio.latitude() + d_lat,
            helio.distance(),
        );
    }

    let sun = sun_rectangular(d);
    Some(Rectangular {
        x: helio.x + sun.x,
        y: helio.y + sun.y,
        z: helio.z,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kepler_circular_orbit_is_identity() {
        for m in [0.0, 45.0, 123.4, 359.0] {
            assert!((solve_kepler(m, 0.0) - m).abs() < 1e-12);
        }
    }

    #[test]
    fn test_kepler_satisfies_equation() {
        let e = 0.205635;
        for m in [1.0, 90.0, 179.0, 270.5] {
            let ecc = solve_kepler(m, e);
            let residual = ecc - (e * sin_deg(ecc)).to_degrees() - m;
            assert!(residual.abs() < 1e-8, "M={m}: residual {residual}");
        }
    }

    #[test]
    fn test_sun_at_j2000() {
        // JD 2451545.0 -> d = 1.5; apparent longitude ~280.37
        let sun = sun_rectangular(1.5);
        assert!((sun.longitude() - 280.37).abs() < 0.05, "{}", sun.longitude());
        assert!((sun.distance() - 0.9833).abs() < 0.001);
    }

    #[test]
    fn test_nodes_have_no_elements() {
        assert!(elements(Body::Rahu, 0.0).is_none());
        assert!(planet_geocentric(Body::Sun, 0.0).is_none());
        assert!(planet_geocentric(Body::Mars, 0.0).is_some());
    }
}
