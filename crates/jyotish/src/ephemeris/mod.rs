pub mod kepler;
pub mod lunar;
pub mod provider;
pub mod types;

#[cfg(feature = "swisseph")]
pub mod adapter;

#[cfg(feature = "swisseph")]
pub use adapter::SwissEphemerisProvider;
pub use provider::{EphemerisProvider, KeplerianEphemeris, MAX_SUPPORTED_YEAR, MIN_SUPPORTED_YEAR};
pub use types::{Body, EphemerisPositions, NodeMode, PlanetPosition};
