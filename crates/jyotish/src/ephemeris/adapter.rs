//! Swiss Ephemeris backend, enabled with the `swisseph` feature.

use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;
use swisseph::swe::{calc_ut, set_ephe_path};

use crate::angles::normalize_degrees;
use crate::ephemeris::provider::EphemerisProvider;
use crate::ephemeris::types::{Body, EphemerisPositions, NodeMode, PlanetPosition};
use crate::error::{ChartError, ChartResult};
use crate::time::UtcInstant;

// FLG_SWIEPH | FLG_SPEED
const CALC_FLAGS: u32 = 2 | 256;
const SE_MEAN_NODE: u32 = 10;
const SE_TRUE_NODE: u32 = 11;

fn body_code(body: Body, node_mode: NodeMode) -> Option<u32> {
    match body {
        Body::Sun => Some(0),
        Body::Moon => Some(1),
        Body::Mercury => Some(2),
        Body::Venus => Some(3),
        Body::Mars => Some(4),
        Body::Jupiter => Some(5),
        Body::Saturn => Some(6),
        Body::Rahu => Some(match node_mode {
            NodeMode::Mean => SE_MEAN_NODE,
            NodeMode::True => SE_TRUE_NODE,
        }),
        // derived from Rahu
        Body::Ketu => None,
    }
}

/// Positions from the Swiss Ephemeris data files.
pub struct SwissEphemerisProvider {
    node_mode: NodeMode,
}

impl SwissEphemerisProvider {
    /// Use `ephemeris_path`, else `SWISS_EPHEMERIS_PATH`, else
    /// `/usr/local/share/swisseph`.
    ///
    /// The data path is global to the Swiss Ephemeris library, so the last
    /// provider built decides it for the whole process.
    pub fn new(ephemeris_path: Option<PathBuf>, node_mode: NodeMode) -> ChartResult<Self> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/usr/local/share/swisseph"))
        });
        if !path.exists() {
            return Err(ChartError::unavailable(format!(
                "ephemeris path {} does not exist",
                path.display()
            )));
        }
        set_ephe_path(&path.to_string_lossy());
        log::debug!("swiss ephemeris data path: {}", path.display());
        Ok(Self { node_mode })
    }

    fn calc(&self, body: Body, code: u32, jd: f64) -> ChartResult<PlanetPosition> {
        let result = calc_ut(jd, code, CALC_FLAGS)
            .map_err(|e| ChartError::unavailable(format!("swiss ephemeris failed for {body}: {e}")))?;
        let out = result.out;
        let speed_lon = out[3];
        Ok(PlanetPosition {
            lon: normalize_degrees(out[0]),
            lat: out[1],
            distance: out[2],
            speed_lon,
            retrograde: body.is_node() || speed_lon < 0.0,
        })
    }
}

impl EphemerisProvider for SwissEphemerisProvider {
    fn positions(&self, instant: &UtcInstant) -> ChartResult<EphemerisPositions> {
        let jd = instant.julian_day();
        let mut bodies = BTreeMap::new();
        for body in Body::ALL {
            if let Some(code) = body_code(body, self.node_mode) {
                bodies.insert(body, self.calc(body, code, jd)?);
            }
        }
        let rahu = *bodies
            .get(&Body::Rahu)
            .ok_or_else(|| ChartError::unavailable("no position for Rahu"))?;
        bodies.insert(
            Body::Ketu,
            PlanetPosition {
                lon: normalize_degrees(rahu.lon + 180.0),
                lat: -rahu.lat,
                ..rahu
            },
        );
        Ok(EphemerisPositions { bodies })
    }

    fn name(&self) -> &'static str {
        "swisseph"
    }
}
