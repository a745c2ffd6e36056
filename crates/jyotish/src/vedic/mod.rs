pub mod dashas;
pub mod doshas;
pub mod nakshatra;
pub mod rashi;

pub use dashas::{
    dasha_years, vimshottari_dasha, DashaLevel, DashaPeriod, Mahadashas, VimshottariDasha,
    VIMSHOTTARI_SEQUENCE, VIMSHOTTARI_TOTAL_YEARS, VIMSHOTTARI_YEAR_DAYS,
};
pub use doshas::{manglik, manglik_from_signs, ManglikReport, MANGLIK_HOUSES};
pub use nakshatra::{nakshatra, nakshatra_for_longitude, nakshatra_index, Nakshatra, NakshatraMetadata};
pub use rashi::{degree_in_sign, sign_index, sign_name, whole_sign_house, SIGN_NAMES};
