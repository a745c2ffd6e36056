//! Nakshatra utilities.
//!
//! Nakshatras are 27 lunar mansions, each spanning 13°20' (360/27 degrees).
//! Each nakshatra is divided into 4 padas (quarters).

use serde::Serialize;

use crate::angles::normalize_degrees;
use crate::ephemeris::types::Body;

pub const NAKSHATRA_SEGMENT_SIZE: f64 = 360.0 / 27.0;
pub const PADA_SIZE: f64 = NAKSHATRA_SEGMENT_SIZE / 4.0;

// (slug, display name, Vimshottari lord)
pub const NAKSHATRA_ORDER: [(&str, &str, Body); 27] = [
    ("ashwini", "Ashwini", Body::Ketu),
    ("bharani", "Bharani", Body::Venus),
    ("krittika", "Krittika", Body::Sun),
    ("rohini", "Rohini", Body::Moon),
    ("mrigashira", "Mrigashira", Body::Mars),
    ("ardra", "Ardra", Body::Rahu),
    ("punarvasu", "Punarvasu", Body::Jupiter),
    ("pushya", "Pushya", Body::Saturn),
    ("ashlesha", "Ashlesha", Body::Mercury),
    ("magha", "Magha", Body::Ketu),
    ("purva_phalguni", "Purva Phalguni", Body::Venus),
    ("uttara_phalguni", "Uttara Phalguni", Body::Sun),
    ("hasta", "Hasta", Body::Moon),
    ("chitra", "Chitra", Body::Mars),
    ("swati", "Swati", Body::Rahu),
    ("vishakha", "Vishakha", Body::Jupiter),
    ("anuradha", "Anuradha", Body::Saturn),
    ("jyeshtha", "Jyeshtha", Body::Mercury),
    ("mula", "Mula", Body::Ketu),
    ("purva_ashadha", "Purva Ashadha", Body::Venus),
    ("uttara_ashadha", "Uttara Ashadha", Body::Sun),
    ("shravana", "Shravana", Body::Moon),
    ("dhanishta", "Dhanishta", Body::Mars),
    ("shatabhisha", "Shatabhisha", Body::Rahu),
    ("purva_bhadrapada", "Purva Bhadrapada", Body::Jupiter),
    ("uttara_bhadrapada", "Uttara Bhadrapada", Body::Saturn),
    ("revati", "Revati", Body::Mercury),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Nakshatra {
    pub id: &'static str,
    pub name: &'static str,
    pub lord: Body,
    pub start: f64,
    pub end: f64,
    pub index: usize,
}

/// Where a longitude falls inside its nakshatra.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NakshatraMetadata {
    #[serde(flatten)]
    pub base: &'static Nakshatra,
    /// Degrees past the nakshatra's start
    pub offset: f64,
    /// Fraction of the nakshatra traversed, [0, 1)
    pub progress: f64,
    pub pada: u8,
    pub pada_fraction: f64,
}

fn build_nakshatra_table() -> Vec<Nakshatra> {
    NAKSHATRA_ORDER
        .iter()
        .enumerate()
        .map(|(idx, &(id, name, lord))| {
            let start = idx as f64 * NAKSHATRA_SEGMENT_SIZE;
            Nakshatra {
                id,
                name,
                lord,
                start,
                end: start + NAKSHATRA_SEGMENT_SIZE,
                index: idx,
            }
        })
        .collect()
}

lazy_static::lazy_static! {
    static ref NAKSHATRA_TABLE: Vec<Nakshatra> = build_nakshatra_table();
}

pub fn nakshatra(index: usize) -> &'static Nakshatra {
    &NAKSHATRA_TABLE[index % NAKSHATRA_TABLE.len()]
}

/// Nakshatra index 0 (Ashwini) to 26 (Revati).
pub fn nakshatra_index(longitude: f64) -> usize {
    ((normalize_degrees(longitude) / NAKSHATRA_SEGMENT_SIZE) as usize).min(26)
}

/// Metadata for the nakshatra containing `longitude` (sidereal degrees).
pub fn nakshatra_for_longitude(longitude: f64) -> NakshatraMetadata {
    let lon = normalize_degrees(longitude);
    let entry = nakshatra(nakshatra_index(lon));

    let offset = (lon - entry.start).max(0.0);
    let pada = ((offset / PADA_SIZE) as u8).min(3) + 1;
    let pada_offset = offset - f64::from(pada - 1) * PADA_SIZE;

    NakshatraMetadata {
        base: entry,
        offset,
        progress: (offset / NAKSHATRA_SEGMENT_SIZE).min(1.0),
        pada,
        pada_fraction: pada_offset / PADA_SIZE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nakshatra_for_longitude() {
        let meta = nakshatra_for_longitude(0.0);
        assert_eq!(meta.base.id, "ashwini");
        assert_eq!(meta.base.lord, Body::Ketu);
        assert_eq!(meta.pada, 1);

        let meta = nakshatra_for_longitude(13.33);
        assert_eq!(meta.base.id, "ashwini");
        assert_eq!(meta.pada, 4);

        let meta = nakshatra_for_longitude(283.57);
        assert_eq!(meta.base.name, "Shravana");
        assert_eq!(meta.base.lord, Body::Moon);
    }

    #[test]
    fn test_last_nakshatra_and_wrap() {
        let meta = nakshatra_for_longitude(359.9999);
        assert_eq!(meta.base.index, 26);
        assert_eq!(meta.pada, 4);
        assert_eq!(nakshatra_for_longitude(360.0).base.index, 0);
    }

    #[test]
    fn test_pada_always_in_range() {
        let mut lon = 0.0;
        while lon < 360.0 {
            let meta = nakshatra_for_longitude(lon);
            assert!((1..=4).contains(&meta.pada), "{lon}");
            assert!((0.0..=1.0).contains(&meta.progress));
            lon += 0.37;
        }
    }

    #[test]
    fn test_lords_repeat_every_nine() {
        for idx in 0..18 {
            assert_eq!(nakshatra(idx).lord, nakshatra(idx + 9).lord);
        }
    }
}
