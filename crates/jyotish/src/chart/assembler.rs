//! One-pass chart assembly: civil time to a complete sidereal chart.

use std::sync::Arc;

use crate::astro::{ascendant, ayanamsa, midheaven, obliquity, tropical_to_sidereal};
use crate::chart::settings::ChartSettings;
use crate::chart::types::{AscendantResult, BodyPosition, Chart, Placement};
use crate::ephemeris::{Body, EphemerisProvider, KeplerianEphemeris};
use crate::error::{ChartError, ChartResult};
use crate::time::{greenwich_sidereal_time, local_sidereal_time, BirthInput, UtcInstant};
use crate::vedic::dashas::VimshottariDasha;
use crate::vedic::rashi::whole_sign_house;

/// Builds charts against one ephemeris backend and one set of settings.
///
/// Holds no mutable state; a single assembler can serve many threads.
#[derive(Clone)]
pub struct ChartAssembler {
    provider: Arc<dyn EphemerisProvider>,
    settings: ChartSettings,
}

impl Default for ChartAssembler {
    fn default() -> Self {
        Self {
            provider: Arc::new(KeplerianEphemeris::default()),
            settings: ChartSettings::default(),
        }
    }
}

impl ChartAssembler {
    /// Assembler with the backend `settings` selects.
    pub fn new(settings: ChartSettings) -> ChartResult<Self> {
        settings.validate()?;
        let provider = settings.provider()?;
        Ok(Self { provider, settings })
    }

    pub fn with_provider(
        provider: Arc<dyn EphemerisProvider>,
        settings: ChartSettings,
    ) -> ChartResult<Self> {
        settings.validate()?;
        Ok(Self { provider, settings })
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    pub fn assemble(&self, input: &BirthInput) -> ChartResult<Chart> {
        let utc = input.to_utc()?;

        let gst_hours = greenwich_sidereal_time(&utc);
        let lst = local_sidereal_time(gst_hours, input.longitude);
        let eps = obliquity(&utc);
        let ayanamsa_deg = ayanamsa(self.settings.ayanamsa, &utc);
        log::debug!(
            "utc {} jd {:.6}: gst {gst_hours:.6}h lst {lst:.4} obliquity {eps:.6} ayanamsa {ayanamsa_deg:.6}",
            utc.datetime(),
            utc.julian_day()
        );

        let ascendant = self.ascendant(lst, eps, input.latitude, ayanamsa_deg)?;
        log::debug!(
            "ascendant tropical {:.4} sidereal {:.4} ({})",
            ascendant.tropical_longitude,
            ascendant.placement.longitude,
            ascendant.placement.sign_name
        );

        let bodies = self.bodies(&utc, ayanamsa_deg, ascendant.placement.sign)?;

        let moon = bodies
            .iter()
            .find(|position| position.body == Body::Moon)
            .ok_or_else(|| ChartError::unavailable("no position for Moon"))?;
        let dasha = VimshottariDasha::with_year_days(
            &utc,
            moon.placement.longitude,
            self.settings.dasha_year_days,
        )?
        .tree(self.settings.dasha_depth);

        Ok(Chart {
            input: input.clone(),
            utc,
            julian_day: utc.julian_day(),
            gst_hours,
            lst,
            obliquity: eps,
            ayanamsa: ayanamsa_deg,
            ayanamsa_system: self.settings.ayanamsa,
            node_mode: self.settings.node_mode,
            ephemeris: self.provider.name().to_string(),
            ascendant,
            bodies,
            dasha,
        })
    }

    /// Vimshottari timeline of an assembled chart, using this assembler's
    /// year length.
    pub fn dasha(&self, chart: &Chart) -> ChartResult<VimshottariDasha> {
        let moon = chart
            .moon()
            .ok_or_else(|| ChartError::unavailable("chart has no Moon"))?;
        VimshottariDasha::with_year_days(
            &chart.utc,
            moon.placement.longitude,
            self.settings.dasha_year_days,
        )
    }

    fn ascendant(
        &self,
        lst: f64,
        eps: f64,
        latitude: f64,
        ayanamsa_deg: f64,
    ) -> ChartResult<AscendantResult> {
        let tropical = ascendant(lst, eps, latitude)?;
        let mc = midheaven(lst, eps)?;
        Ok(AscendantResult {
            tropical_longitude: tropical,
            placement: Placement::from_longitude(tropical_to_sidereal(tropical, ayanamsa_deg)),
            midheaven: tropical_to_sidereal(mc, ayanamsa_deg),
        })
    }

    fn bodies(
        &self,
        utc: &UtcInstant,
        ayanamsa_deg: f64,
        ascendant_sign: usize,
    ) -> ChartResult<Vec<BodyPosition>> {
        let positions = self.provider.positions(utc)?;
        Body::ALL
            .iter()
            .map(|&body| {
                let position = positions.require(body)?;
                if !position.lon.is_finite() || !position.speed_lon.is_finite() {
                    return Err(ChartError::degenerate(format!(
                        "{} returned a non-finite position for {body}",
                        self.provider.name()
                    )));
                }
                let sidereal = tropical_to_sidereal(position.lon, ayanamsa_deg);
                let placement = Placement::from_longitude(sidereal);
                let house = whole_sign_house(placement.sign, ascendant_sign);
                log::debug!(
                    "{body}: {:.4} {} house {house}",
                    placement.longitude,
                    placement.sign_name
                );
                Ok(BodyPosition {
                    body,
                    placement,
                    tropical_longitude: position.lon,
                    latitude: position.lat,
                    speed: position.speed_lon,
                    retrograde: position.retrograde || body.is_node(),
                    house,
                })
            })
            .collect()
    }
}

/// Assemble a chart with default settings and the built-in ephemeris.
pub fn assemble(input: &BirthInput) -> ChartResult<Chart> {
    ChartAssembler::default().assemble(input)
}
