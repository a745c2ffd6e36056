pub mod ascendant;
pub mod ayanamsa;
pub mod obliquity;

pub use ascendant::{ascendant, midheaven};
pub use ayanamsa::{
    ayanamsa, general_precession, lahiri_ayanamsa, tropical_to_sidereal, AyanamsaSystem,
    LAHIRI_J2000_DEG,
};
pub use obliquity::{obliquity, obliquity_at, OBLIQUITY_J2000_DEG};
