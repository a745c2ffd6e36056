//! Greenwich and local sidereal time.
//!
//! GST uses the IAU 1982 expression (Meeus, "Astronomical Algorithms",
//! eq. 12.4) in Julian centuries from J2000.0.

use crate::angles::normalize;
use crate::time::civil::{UtcInstant, J2000_JD};

/// Greenwich mean sidereal time in hours, [0, 24).
pub fn greenwich_sidereal_time(instant: &UtcInstant) -> f64 {
    let jd = instant.julian_day();
    let t = instant.julian_centuries();
    let degrees = 280.460_618_37 + 360.985_647_366_29 * (jd - J2000_JD) + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    normalize(degrees / 15.0, 24.0)
}

/// Local sidereal time in degrees, [0, 360).
///
/// This is the right ascension of the local meridian (RAMC).
pub fn local_sidereal_time(gst_hours: f64, longitude_deg: f64) -> f64 {
    normalize((gst_hours + longitude_deg / 15.0) * 15.0, 360.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn instant(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> UtcInstant {
        UtcInstant::from_datetime(Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap())
    }

    #[test]
    fn test_gst_at_j2000_noon() {
        // 18h 41m 50.548s
        let gst = greenwich_sidereal_time(&instant(2000, 1, 1, 12, 0));
        assert!((gst - 18.697_374_558).abs() < 1e-6, "gst = {gst}");
    }

    #[test]
    fn test_gst_meeus_example_12a() {
        // 1987 April 10, 0h UT: 13h 10m 46.3668s
        let gst = greenwich_sidereal_time(&instant(1987, 4, 10, 0, 0));
        let expected = 13.0 + 10.0 / 60.0 + 46.3668 / 3600.0;
        assert!((gst - expected).abs() < 1e-5, "gst = {gst}");
    }

    #[test]
    fn test_lst_east_longitude_adds() {
        let lst = local_sidereal_time(2.0, 15.0);
        assert!((lst - 45.0).abs() < 1e-12);
        let wrapped = local_sidereal_time(23.0, 30.0);
        assert!((wrapped - 15.0).abs() < 1e-9);
        let west = local_sidereal_time(0.5, -30.0);
        assert!((west - 337.5).abs() < 1e-9);
    }

    #[test]
    fn test_one_hour_utc_error_shifts_lst_about_15_degrees() {
        let a = greenwich_sidereal_time(&instant(2010, 6, 1, 10, 0));
        let b = greenwich_sidereal_time(&instant(2010, 6, 1, 11, 0));
        let shift = crate::angles::signed_difference(
            local_sidereal_time(a, 77.2),
            local_sidereal_time(b, 77.2),
        );
        assert!((shift - 15.041).abs() < 0.01, "shift = {shift}");
    }
}
