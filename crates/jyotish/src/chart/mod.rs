pub mod assembler;
pub mod settings;
pub mod types;

pub use assembler::{assemble, ChartAssembler};
pub use settings::{ChartSettings, EphemerisBackend};
pub use types::{AscendantResult, BodyPosition, Chart, Placement};
