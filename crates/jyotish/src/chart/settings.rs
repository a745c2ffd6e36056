use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use crate::astro::AyanamsaSystem;
use crate::ephemeris::{EphemerisProvider, KeplerianEphemeris, NodeMode};
use crate::error::{ChartError, ChartResult};
use crate::vedic::dashas::{DashaLevel, VIMSHOTTARI_YEAR_DAYS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EphemerisBackend {
    /// Built-in analytic theory.
    #[default]
    Keplerian,
    /// Swiss Ephemeris data files; needs the `swisseph` feature.
    Swisseph,
}

/// Calculation options for a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub ayanamsa: AyanamsaSystem,
    pub node_mode: NodeMode,

    // Dasha
    pub dasha_depth: DashaLevel,
    pub dasha_year_days: f64,

    // Ephemeris
    pub ephemeris: EphemerisBackend,
    pub ephemeris_path: Option<PathBuf>,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            ayanamsa: AyanamsaSystem::Lahiri,
            node_mode: NodeMode::Mean,
            dasha_depth: DashaLevel::Mahadasha,
            dasha_year_days: VIMSHOTTARI_YEAR_DAYS,
            ephemeris: EphemerisBackend::Keplerian,
            ephemeris_path: None,
        }
    }
}

impl ChartSettings {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.dasha_year_days.is_finite() || self.dasha_year_days <= 0.0 {
            return Err(ChartError::invalid(
                "dasha_year_days",
                format!("{} is not a positive number of days", self.dasha_year_days),
            ));
        }
        Ok(())
    }

    /// The ephemeris backend these settings select.
    pub fn provider(&self) -> ChartResult<Arc<dyn EphemerisProvider>> {
        match self.ephemeris {
            EphemerisBackend::Keplerian => Ok(Arc::new(KeplerianEphemeris::new(self.node_mode))),
            #[cfg(feature = "swisseph")]
            EphemerisBackend::Swisseph => Ok(Arc::new(
                crate::ephemeris::SwissEphemerisProvider::new(
                    self.ephemeris_path.clone(),
                    self.node_mode,
                )?,
            )),
            #[cfg(not(feature = "swisseph"))]
            EphemerisBackend::Swisseph => Err(ChartError::unavailable(
                "built without the swisseph feature",
            )),
        }
    }
}
