//! Ascendant (lagna) and midheaven from local sidereal time.

use crate::angles::{cos_deg, normalize_degrees, sin_deg};
use crate::error::{ChartError, ChartResult};

/// Tropical ascendant in degrees [0, 360).
///
/// `lst_deg` is the right ascension of the meridian (RAMC). With
/// `y = -cos RAMC` and `x = sin RAMC cos ε + tan φ sin ε`, `atan2(y, x)`
/// is the setting point of the ecliptic; the rising point is opposite it.
///
/// Beyond the polar circles (`|φ| > 90° - ε`) the ecliptic can briefly
/// coincide with the horizon. The result is still a horizon point but runs
/// backward for part of the sidereal day.
pub fn ascendant(lst_deg: f64, obliquity_deg: f64, latitude_deg: f64) -> ChartResult<f64> {
    if !lst_deg.is_finite() || !obliquity_deg.is_finite() || !latitude_deg.is_finite() {
        return Err(ChartError::degenerate("non-finite ascendant input"));
    }
    if latitude_deg.abs() >= 90.0 {
        return Err(ChartError::degenerate(format!(
            "ascendant undefined at latitude {latitude_deg}"
        )));
    }

    let y = -cos_deg(lst_deg);
    let x = sin_deg(lst_deg) * cos_deg(obliquity_deg)
        + latitude_deg.to_radians().tan() * sin_deg(obliquity_deg);
    let descendant = y.atan2(x).to_degrees();

    let asc = normalize_degrees(descendant + 180.0);
    if !asc.is_finite() {
        return Err(ChartError::degenerate(format!(
            "ascendant did not resolve for LST {lst_deg}, latitude {latitude_deg}"
        )));
    }
    Ok(asc)
}

/// Tropical midheaven (MC) in degrees [0, 360).
pub fn midheaven(lst_deg: f64, obliquity_deg: f64) -> ChartResult<f64> {
    let mc = sin_deg(lst_deg).atan2(cos_deg(lst_deg) * cos_deg(obliquity_deg));
    if !mc.is_finite() {
        return Err(ChartError::degenerate(format!("midheaven undefined for LST {lst_deg}")));
    }
    Ok(normalize_degrees(mc.to_degrees()))
}
