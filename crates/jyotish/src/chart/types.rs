use serde::{Deserialize, Serialize};

use crate::astro::AyanamsaSystem;
use crate::ephemeris::types::{Body, NodeMode};
use crate::time::{BirthInput, UtcInstant};
use crate::vedic::dashas::DashaPeriod;
use crate::vedic::nakshatra::nakshatra_for_longitude;
use crate::vedic::rashi::{degree_in_sign, sign_index, sign_name};

/// Sign and nakshatra coordinates of one sidereal longitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// Sidereal longitude, [0, 360)
    pub longitude: f64,
    /// 0 = Aries .. 11 = Pisces
    pub sign: usize,
    pub sign_name: String,
    /// Degrees within the sign, [0, 30)
    pub degree: f64,
    /// 0 = Ashwini .. 26 = Revati
    pub nakshatra: usize,
    pub nakshatra_name: String,
    pub nakshatra_lord: Body,
    pub pada: u8,
}

impl Placement {
    pub fn from_longitude(sidereal_longitude: f64) -> Self {
        let nakshatra = nakshatra_for_longitude(sidereal_longitude);
        let sign = sign_index(sidereal_longitude);
        Self {
            longitude: sidereal_longitude,
            sign,
            sign_name: sign_name(sign).to_string(),
            degree: degree_in_sign(sidereal_longitude),
            nakshatra: nakshatra.base.index,
            nakshatra_name: nakshatra.base.name.to_string(),
            nakshatra_lord: nakshatra.base.lord,
            pada: nakshatra.pada,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyPosition {
    #[serde(rename = "name")]
    pub body: Body,
    #[serde(flatten)]
    pub placement: Placement,
    pub tropical_longitude: f64,
    pub latitude: f64,
    /// Degrees per day
    pub speed: f64,
    pub retrograde: bool,
    /// Whole-sign house, 1-12
    pub house: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AscendantResult {
    pub tropical_longitude: f64,
    #[serde(flatten)]
    pub placement: Placement,
    /// Sidereal midheaven
    pub midheaven: f64,
}

/// A complete sidereal birth chart. Built in one pass and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub input: BirthInput,
    pub utc: UtcInstant,
    pub julian_day: f64,
    /// Greenwich sidereal time, hours
    pub gst_hours: f64,
    /// Local sidereal time (RAMC), degrees
    pub lst: f64,
    pub obliquity: f64,
    pub ayanamsa: f64,
    pub ayanamsa_system: AyanamsaSystem,
    pub node_mode: NodeMode,
    pub ephemeris: String,
    pub ascendant: AscendantResult,
    /// One entry per body in graha order
    pub bodies: Vec<BodyPosition>,
    pub dasha: Vec<DashaPeriod>,
}

impl Chart {
    pub fn body(&self, body: Body) -> Option<&BodyPosition> {
        self.bodies.iter().find(|position| position.body == body)
    }

    pub fn moon(&self) -> Option<&BodyPosition> {
        self.body(Body::Moon)
    }

    /// Bodies occupying whole-sign `house`.
    pub fn bodies_in_house(&self, house: u8) -> impl Iterator<Item = &BodyPosition> {
        self.bodies.iter().filter(move |position| position.house == house)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_from_longitude() {
        let placement = Placement::from_longitude(283.57);
        assert_eq!(placement.sign, 9);
        assert_eq!(placement.sign_name, "Capricorn");
        assert!((placement.degree - 13.57).abs() < 1e-9);
        assert_eq!(placement.nakshatra, 21);
        assert_eq!(placement.nakshatra_name, "Shravana");
        assert_eq!(placement.nakshatra_lord, Body::Moon);
        assert_eq!(placement.pada, 1);
    }

    #[test]
    fn test_placement_serializes_camel_case() {
        let json = serde_json::to_value(Placement::from_longitude(0.5)).unwrap();
        assert_eq!(json["signName"], "Aries");
        assert_eq!(json["nakshatraLord"], "ketu");
        assert_eq!(json["pada"], 1);
    }
}
