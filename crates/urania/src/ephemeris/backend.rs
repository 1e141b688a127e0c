use crate::ephemeris::houses::compute_houses;
use crate::ephemeris::types::{normalize_degrees, BodyPosition, HouseFrame, HouseSystem};
use crate::error::EngineError;
use crate::time::JulianDay;

/// A source of body positions and house frames.
///
/// The analytic model is the portable default; a high-precision library can
/// stand in for it behind the same two calls.
pub trait EphemerisBackend: Send + Sync {
    /// Short identifier, recorded in logs.
    fn name(&self) -> &'static str;

    /// All ten bodies in canonical order.
    fn body_positions(&self, jd: JulianDay) -> Result<[BodyPosition; 10], EngineError>;

    /// Ascendant, Midheaven and cusps for a place on Earth.
    fn houses(
        &self,
        jd: JulianDay,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<HouseFrame, EngineError> {
        compute_houses(jd, latitude, longitude, system)
    }
}

/// Numerical-derivative test: true when `longitude_at` decreases across
/// `[jd - step, jd + step]`, taking the shorter way round the circle.
pub fn is_decreasing<F>(longitude_at: F, jd: JulianDay, step_days: f64) -> bool
where
    F: Fn(JulianDay) -> f64,
{
    let before = longitude_at(jd.offset_days(-step_days));
    let after = longitude_at(jd.offset_days(step_days));
    let mut delta = normalize_degrees(after - before);
    if delta > 180.0 {
        delta -= 360.0;
    }
    delta < 0.0
}
