pub mod civil;
pub mod sidereal;

pub use civil::{
    civil_date, parse_date, parse_time, to_utc, BirthInput, UtcInstant, DAYS_PER_JULIAN_CENTURY,
    J2000_JD,
};
pub use sidereal::{greenwich_sidereal_time, local_sidereal_time};
