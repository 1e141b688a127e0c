//! Natal chart engine: planetary positions, houses, signs and aspects for a
//! birth instant and place.

pub mod aspects;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod input;
pub mod time;
pub mod western;

pub use aspects::{Aspect, AspectKind, AspectNature, AspectOrbs};
pub use chart::{compute_chart, ChartEngine, ChartResult, ChartSettings};
pub use ephemeris::{AnalyticEphemeris, Body, EphemerisBackend, HouseSystem};
pub use error::EngineError;
pub use input::BirthInput;
pub use time::JulianDay;
pub use western::{Element, Modality, Sign};
