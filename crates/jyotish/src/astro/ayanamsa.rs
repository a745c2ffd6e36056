//! Tropical-to-sidereal correction.
//!
//! Each system is a reference value at J2000.0 carried forward by the
//! IAU 2006 general precession in longitude.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::angles::normalize_degrees;
use crate::error::ChartError;
use crate::time::UtcInstant;

/// Lahiri (Chitrapaksha) ayanamsa at J2000.0, degrees.
pub const LAHIRI_J2000_DEG: f64 = 23.853_06;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AyanamsaSystem {
    /// Spica at 0° Libra; the Indian government standard.
    #[default]
    Lahiri,
    Raman,
    /// Krishnamurti Paddhati.
    #[serde(alias = "kp")]
    Krishnamurti,
    FaganBradley,
    Yukteshwar,
}

impl AyanamsaSystem {
    pub const ALL: [AyanamsaSystem; 5] = [
        AyanamsaSystem::Lahiri,
        AyanamsaSystem::Raman,
        AyanamsaSystem::Krishnamurti,
        AyanamsaSystem::FaganBradley,
        AyanamsaSystem::Yukteshwar,
    ];

    pub fn reference_j2000_deg(self) -> f64 {
        match self {
            AyanamsaSystem::Lahiri => LAHIRI_J2000_DEG,
            AyanamsaSystem::Raman => 22.370,
            AyanamsaSystem::Krishnamurti => 23.850,
            AyanamsaSystem::FaganBradley => 24.736,
            AyanamsaSystem::Yukteshwar => 22.376,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            AyanamsaSystem::Lahiri => "lahiri",
            AyanamsaSystem::Raman => "raman",
            AyanamsaSystem::Krishnamurti => "krishnamurti",
            AyanamsaSystem::FaganBradley => "fagan_bradley",
            AyanamsaSystem::Yukteshwar => "yukteshwar",
        }
    }
}

impl fmt::Display for AyanamsaSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AyanamsaSystem {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase().replace(['-', ' '], "_");
        match lower.as_str() {
            "chitrapaksha" => return Ok(AyanamsaSystem::Lahiri),
            "kp" => return Ok(AyanamsaSystem::Krishnamurti),
            _ => {}
        }
        AyanamsaSystem::ALL
            .iter()
            .copied()
            .find(|system| system.id() == lower)
            .ok_or_else(|| {
                let valid: Vec<&str> = AyanamsaSystem::ALL.iter().map(|s| s.id()).collect();
                ChartError::invalid(
                    "ayanamsa",
                    format!("unknown system '{s}', expected one of {valid:?}"),
                )
            })
    }
}

/// General precession in longitude since J2000.0, degrees.
pub fn general_precession(t: f64) -> f64 {
    (5_028.796_195 * t + 1.105_434_8 * t * t) / 3600.0
}

pub fn ayanamsa(system: AyanamsaSystem, instant: &UtcInstant) -> f64 {
    system.reference_j2000_deg() + general_precession(instant.julian_centuries())
}

pub fn lahiri_ayanamsa(instant: &UtcInstant) -> f64 {
    ayanamsa(AyanamsaSystem::Lahiri, instant)
}

/// `normalize(tropical - ayanamsa)`. The correction is always subtracted.
pub fn tropical_to_sidereal(tropical_deg: f64, ayanamsa_deg: f64) -> f64 {
    normalize_degrees(tropical_deg - ayanamsa_deg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(y: i32) -> UtcInstant {
        UtcInstant::from_datetime(Utc.with_ymd_and_hms(y, 1, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_lahiri_at_j2000() {
        assert!((lahiri_ayanamsa(&at(2000)) - 23.85306).abs() < 1e-6);
    }

    #[test]
    fn test_lahiri_grows_about_50_arcsec_per_year() {
        let per_year = (lahiri_ayanamsa(&at(2050)) - lahiri_ayanamsa(&at(2000))) / 50.0;
        assert!((per_year * 3600.0 - 50.29).abs() < 0.05, "{}", per_year * 3600.0);
    }

    #[test]
    fn test_zero_ayanamsa_is_identity() {
        let mut lon = 0.0;
        while lon < 360.0 {
            assert_eq!(tropical_to_sidereal(lon, 0.0), lon);
            lon += 0.7;
        }
    }

    #[test]
    fn test_subtraction_wraps() {
        assert!((tropical_to_sidereal(10.0, 23.85) - 346.15).abs() < 1e-9);
    }

    #[test]
    fn test_parse_system_names() {
        assert_eq!("Lahiri".parse::<AyanamsaSystem>().unwrap(), AyanamsaSystem::Lahiri);
        assert_eq!("KP".parse::<AyanamsaSystem>().unwrap(), AyanamsaSystem::Krishnamurti);
        assert_eq!(
            "fagan-bradley".parse::<AyanamsaSystem>().unwrap(),
            AyanamsaSystem::FaganBradley
        );
        assert!(matches!(
            "tropical".parse::<AyanamsaSystem>(),
            Err(ChartError::InvalidInput { .. })
        ));
    }
}
