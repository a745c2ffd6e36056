use crate::time::UtcInstant;

/// Mean obliquity of the ecliptic at J2000.0: 23° 26′ 21.448″.
pub const OBLIQUITY_J2000_DEG: f64 = 23.439_291_111;

/// Mean obliquity of the ecliptic (degrees), IAU 1980 polynomial.
pub fn obliquity(instant: &UtcInstant) -> f64 {
    obliquity_at(instant.julian_centuries())
}

/// Same as [`obliquity`] for `t` Julian centuries from J2000.0.
pub fn obliquity_at(t: f64) -> f64 {
    OBLIQUITY_J2000_DEG - (46.815_0 * t + 0.000_59 * t * t - 0.001_813 * t * t * t) / 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obliquity_at_j2000() {
        assert!((obliquity_at(0.0) - 23.4393).abs() < 1e-4);
    }

    #[test]
    fn test_obliquity_decreases_this_era() {
        assert!(obliquity_at(0.2) < obliquity_at(0.0));
        // about 47 arc-seconds per century
        let drop = (obliquity_at(0.0) - obliquity_at(1.0)) * 3600.0;
        assert!((drop - 46.8).abs() < 0.1, "drop = {drop}");
    }
}
