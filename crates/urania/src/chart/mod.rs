pub mod assembler;
pub mod result;
pub mod settings;

pub use assembler::{compute_chart, tally, ChartEngine, PERSONAL_BODIES};
pub use result::{ChartResult, ElementTally, ModalityTally, PlacedBody, PlacedCusp, SCHEMA_VERSION};
pub use settings::ChartSettings;
