//! Sidereal (Vedic) birth charts.
//!
//! Civil birth time is normalized to UTC once, then flows through sidereal
//! time, the ephemeris, the ayanamsa correction and the ascendant solver
//! into an immutable [`Chart`] with whole-sign houses, nakshatras and the
//! Vimshottari dasha timeline.

pub mod angles;
pub mod astro;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod time;
pub mod vedic;

pub use astro::AyanamsaSystem;
pub use chart::{assemble, AscendantResult, BodyPosition, Chart, ChartAssembler, ChartSettings};
pub use ephemeris::{Body, EphemerisProvider, KeplerianEphemeris, NodeMode};
pub use error::{ChartError, ChartResult};
pub use time::{to_utc, BirthInput, UtcInstant};
pub use vedic::{manglik, DashaLevel, DashaPeriod, ManglikReport, VimshottariDasha};
