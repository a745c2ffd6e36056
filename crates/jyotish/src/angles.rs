//! Angle helpers shared by every stage of the pipeline.

/// Normalize degrees to [0, 360).
pub fn normalize_degrees(value: f64) -> f64 {
    let normalized = value.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Normalize an arbitrary value into [0, modulus).
pub fn normalize(value: f64, modulus: f64) -> f64 {
    let normalized = value.rem_euclid(modulus);
    if normalized >= modulus {
        0.0
    } else {
        normalized
    }
}

/// Signed difference `to - from` folded into (-180, 180].
pub fn signed_difference(from: f64, to: f64) -> f64 {
    let diff = normalize_degrees(to - from);
    if diff > 180.0 {
        diff - 360.0
    } else {
        diff
    }
}

/// Shortest angular distance between two longitudes, in [0, 180].
pub fn angular_difference(lon1: f64, lon2: f64) -> f64 {
    signed_difference(lon1, lon2).abs()
}

pub fn sin_deg(deg: f64) -> f64 {
    deg.to_radians().sin()
}

pub fn cos_deg(deg: f64) -> f64 {
    deg.to_radians().cos()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
        assert_eq!(normalize_degrees(-10.0), 350.0);
        assert_eq!(normalize_degrees(370.0), 10.0);
        assert_eq!(normalize_degrees(-1e-20), 0.0);
    }

    #[test]
    fn test_normalize_is_idempotent_and_bounded() {
        let mut lon = -1080.0;
        while lon <= 1080.0 {
            let once = normalize_degrees(lon);
            assert!((0.0..360.0).contains(&once), "{lon} -> {once}");
            assert_eq!(normalize_degrees(once), once);
            lon += 7.3;
        }
    }

    #[test]
    fn test_normalize_modulus() {
        assert_eq!(normalize(-1.0, 12.0), 11.0);
        assert_eq!(normalize(25.5, 24.0), 1.5);
    }

    #[test]
    fn test_signed_difference_wraps() {
        assert!((signed_difference(359.0, 1.0) - 2.0).abs() < 1e-12);
        assert!((signed_difference(1.0, 359.0) + 2.0).abs() < 1e-12);
        assert!((angular_difference(10.0, 190.0) - 180.0).abs() < 1e-12);
    }
}
