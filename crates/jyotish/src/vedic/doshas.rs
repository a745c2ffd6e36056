//! Dosha detection.
//!
//! Manglik (Mangal dosha): Mars in the 1st, 2nd, 4th, 7th, 8th or 12th
//! whole-sign house counted from the lagna or from the Moon.

use serde::{Deserialize, Serialize};

use crate::chart::types::Chart;
use crate::ephemeris::types::Body;
use crate::error::{ChartError, ChartResult};
use crate::vedic::rashi::whole_sign_house;

pub const MANGLIK_HOUSES: [u8; 6] = [1, 2, 4, 7, 8, 12];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManglikReport {
    pub is_manglik: bool,
    pub mars_house_from_lagna: u8,
    pub mars_house_from_moon: u8,
    pub from_lagna: bool,
    pub from_moon: bool,
}

fn is_manglik_house(house: u8) -> bool {
    MANGLIK_HOUSES.contains(&house)
}

/// Manglik analysis from sign indices (0 = Aries).
pub fn manglik_from_signs(mars_sign: usize, lagna_sign: usize, moon_sign: usize) -> ManglikReport {
    let from_lagna_house = whole_sign_house(mars_sign, lagna_sign);
    let from_moon_house = whole_sign_house(mars_sign, moon_sign);
    let from_lagna = is_manglik_house(from_lagna_house);
    let from_moon = is_manglik_house(from_moon_house);
    ManglikReport {
        is_manglik: from_lagna || from_moon,
        mars_house_from_lagna: from_lagna_house,
        mars_house_from_moon: from_moon_house,
        from_lagna,
        from_moon,
    }
}

pub fn manglik(chart: &Chart) -> ChartResult<ManglikReport> {
    let mars = chart
        .body(Body::Mars)
        .ok_or_else(|| ChartError::unavailable("chart has no Mars"))?;
    let moon = chart
        .moon()
        .ok_or_else(|| ChartError::unavailable("chart has no Moon"))?;
    Ok(manglik_from_signs(
        mars.placement.sign,
        chart.ascendant.placement.sign,
        moon.placement.sign,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mars_second_from_lagna() {
        // Mars in Scorpio, lagna Libra, Moon Capricorn
        let report = manglik_from_signs(7, 6, 9);
        assert!(report.is_manglik);
        assert!(report.from_lagna);
        assert_eq!(report.mars_house_from_lagna, 2);
        assert_eq!(report.mars_house_from_moon, 11);
        assert!(!report.from_moon);
    }

    #[test]
    fn test_moon_alone_can_trigger() {
        // Mars 3rd from lagna, 7th from Moon
        let report = manglik_from_signs(2, 0, 8);
        assert!(!report.from_lagna);
        assert!(report.from_moon);
        assert!(report.is_manglik);
    }

    #[test]
    fn test_every_house_pattern() {
        for house in 1..=12u8 {
            let mars_sign = (house - 1) as usize;
            // Moon placed so Mars is 3rd from it, never a manglik house
            let moon_sign = (mars_sign + 10) % 12;
            let report = manglik_from_signs(mars_sign, 0, moon_sign);
            assert_eq!(report.mars_house_from_lagna, house);
            assert_eq!(report.mars_house_from_moon, 3);
            assert_eq!(report.is_manglik, MANGLIK_HOUSES.contains(&house));
        }
    }
}
