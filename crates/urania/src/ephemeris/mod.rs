pub mod analytic;
pub mod backend;
pub mod houses;
pub mod types;

#[cfg(feature = "swisseph")]
pub mod adapter;

pub use analytic::AnalyticEphemeris;
pub use backend::{is_decreasing, EphemerisBackend};
pub use houses::compute_houses;
pub use types::{normalize_degrees, Body, BodyPosition, HouseFrame, HouseSystem};

#[cfg(feature = "swisseph")]
pub use adapter::SwissEphemerisBackend;
