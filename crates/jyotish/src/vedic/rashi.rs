//! The twelve sidereal signs and whole-sign houses.

use crate::angles::normalize_degrees;

pub const SIGN_SIZE: f64 = 30.0;

pub const SIGN_NAMES: [&str; 12] = [
    "Aries",
    "Taurus",
    "Gemini",
    "Cancer",
    "Leo",
    "Virgo",
    "Libra",
    "Scorpio",
    "Sagittarius",
    "Capricorn",
    "Aquarius",
    "Pisces",
];

/// Sign index 0 (Aries) to 11 (Pisces).
pub fn sign_index(longitude: f64) -> usize {
    ((normalize_degrees(longitude) / SIGN_SIZE) as usize).min(11)
}

pub fn sign_name(index: usize) -> &'static str {
    SIGN_NAMES[index % 12]
}

/// Degrees elapsed within the sign, [0, 30).
pub fn degree_in_sign(longitude: f64) -> f64 {
    let lon = normalize_degrees(longitude);
    (lon - sign_index(lon) as f64 * SIGN_SIZE).max(0.0)
}

/// Whole-sign house (1-12) of a sign counted from a reference sign.
pub fn whole_sign_house(sign: usize, reference_sign: usize) -> u8 {
    ((sign + 12 - reference_sign % 12) % 12) as u8 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_boundaries() {
        assert_eq!(sign_index(0.0), 0);
        assert_eq!(sign_index(29.999), 0);
        assert_eq!(sign_index(30.0), 1);
        assert_eq!(sign_index(359.999), 11);
        assert_eq!(sign_index(-0.5), 11);
        assert_eq!(sign_name(sign_index(283.57)), "Capricorn");
    }

    #[test]
    fn test_degree_in_sign() {
        assert!((degree_in_sign(283.57) - 13.57).abs() < 1e-9);
        assert!((degree_in_sign(360.0)).abs() < 1e-12);
    }

    #[test]
    fn test_whole_sign_houses_wrap() {
        assert_eq!(whole_sign_house(6, 6), 1);
        assert_eq!(whole_sign_house(7, 6), 2);
        assert_eq!(whole_sign_house(5, 6), 12);
        assert_eq!(whole_sign_house(0, 11), 2);
        for asc in 0..12 {
            for sign in 0..12 {
                assert!((1..=12).contains(&whole_sign_house(sign, asc)));
            }
        }
    }
}
