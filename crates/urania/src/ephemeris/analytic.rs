//! Portable low-order analytic ephemeris.
//!
//! Sun: Meeus ch. 25 (low accuracy), with the equation of center written
//! as a series in the orbital eccentricity. Moon: the six largest periodic
//! terms of Meeus ch. 47. Planets: mean motion from their J2000 mean
//! longitudes. Expect about a degree for the Sun and Moon and considerably
//! worse for the planets; no data files are needed.

use crate::ephemeris::backend::{is_decreasing, EphemerisBackend};
use crate::ephemeris::types::{normalize_degrees, Body, BodyPosition};
use crate::error::EngineError;
use crate::time::JulianDay;

/// Half-width of the sampling window for the retrograde test.
pub const RETROGRADE_STEP_DAYS: f64 = 0.5;

/// Mean orbital elements for the mean-motion planet model.
#[derive(Debug, Clone, Copy)]
pub struct MeanElements {
    pub body: Body,
    /// Heliocentric mean longitude at J2000.0, degrees
    pub longitude_j2000: f64,
    /// Sidereal period in days
    pub period_days: f64,
    /// Semi-major axis in AU; only used to judge apparent motion
    pub semi_major_axis: f64,
}

// Standish (1992) J2000 mean elements
pub const PLANET_ELEMENTS: [MeanElements; 8] = [
    MeanElements { body: Body::Mercury, longitude_j2000: 252.250_323_5, period_days: 87.969_1, semi_major_axis: 0.387_099_27 },
    MeanElements { body: Body::Venus, longitude_j2000: 181.979_099_5, period_days: 224.700_8, semi_major_axis: 0.723_335_66 },
    MeanElements { body: Body::Mars, longitude_j2000: 355.446_567_9, period_days: 686.979_6, semi_major_axis: 1.523_710_34 },
    MeanElements { body: Body::Jupiter, longitude_j2000: 34.396_440_5, period_days: 4_332.589, semi_major_axis: 5.202_887 },
    MeanElements { body: Body::Saturn, longitude_j2000: 49.954_244_2, period_days: 10_759.22, semi_major_axis: 9.536_675_94 },
    MeanElements { body: Body::Uranus, longitude_j2000: 313.238_104_5, period_days: 30_685.4, semi_major_axis: 19.189_164_64 },
    MeanElements { body: Body::Neptune, longitude_j2000: 304.879_970_3, period_days: 60_189.0, semi_major_axis: 30.069_922_76 },
    MeanElements { body: Body::Pluto, longitude_j2000: 238.929_038_3, period_days: 90_560.0, semi_major_axis: 39.482_116_75 },
];

/// The analytic backend. Stateless; every call is a pure function of `jd`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    pub fn new() -> Self {
        Self
    }

    /// Positions of all ten bodies in canonical order.
    pub fn positions(&self, jd: JulianDay) -> [BodyPosition; 10] {
        Body::ALL.map(|body| BodyPosition {
            body,
            longitude: body_longitude(body, jd),
            retrograde: is_retrograde(body, jd),
        })
    }
}

impl EphemerisBackend for AnalyticEphemeris {
    fn name(&self) -> &'static str {
        "analytic"
    }

    fn body_positions(&self, jd: JulianDay) -> Result<[BodyPosition; 10], EngineError> {
        Ok(self.positions(jd))
    }
}

/// Ecliptic longitude of any charted body.
pub fn body_longitude(body: Body, jd: JulianDay) -> f64 {
    match body {
        Body::Sun => sun_longitude(jd),
        Body::Moon => moon_longitude(jd),
        planet => elements_for(planet)
            .map(|el| mean_longitude(el, jd))
            .unwrap_or(0.0),
    }
}

pub fn elements_for(body: Body) -> Option<&'static MeanElements> {
    PLANET_ELEMENTS.iter().find(|el| el.body == body)
}

/// True geometric longitude of the Sun.
pub fn sun_longitude(jd: JulianDay) -> f64 {
    let t = jd.centuries_since_j2000();
    let t2 = t * t;

    let mean_longitude = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t2;
    let mean_anomaly = (357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t2).to_radians();
    let e = 0.016_708_634 - 0.000_042_037 * t - 0.000_000_126_7 * t2;

    let center = (2.0 * e - e.powi(3) / 4.0) * mean_anomaly.sin()
        + 1.25 * e * e * (2.0 * mean_anomaly).sin()
        + 13.0 / 12.0 * e.powi(3) * (3.0 * mean_anomaly).sin();

    normalize_degrees(mean_longitude + center.to_degrees())
}

/// Geocentric longitude of the Moon.
pub fn moon_longitude(jd: JulianDay) -> f64 {
    let t = jd.centuries_since_j2000();
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let mean_longitude = 218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t2
        + t3 / 538_841.0
        - t4 / 65_194_000.0;
    let elongation = (297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2
        + t3 / 545_868.0
        - t4 / 113_065_000.0)
        .to_radians();
    let sun_anomaly =
        (357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2 + t3 / 24_490_000.0)
            .to_radians();
    let moon_anomaly = (134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2
        + t3 / 69_699.0
        - t4 / 14_712_000.0)
        .to_radians();
    let latitude_argument = (93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t2
        - t3 / 3_526_000.0
        + t4 / 863_310_000.0)
        .to_radians();

    let periodic = 6.288_774 * moon_anomaly.sin()
        + 1.274_027 * (2.0 * elongation - moon_anomaly).sin()
        + 0.658_314 * (2.0 * elongation).sin()
        + 0.213_618 * (2.0 * moon_anomaly).sin()
        - 0.185_116 * sun_anomaly.sin()
        - 0.114_332 * (2.0 * latitude_argument).sin();

    normalize_degrees(mean_longitude + periodic)
}

/// Mean-motion longitude: reference + 360° × elapsed / period.
pub fn mean_longitude(elements: &MeanElements, jd: JulianDay) -> f64 {
    normalize_degrees(
        elements.longitude_j2000 + 360.0 * jd.days_since_j2000() / elements.period_days,
    )
}

/// Direction of the planet seen from Earth, with both bodies on circular
/// coplanar orbits at their mean longitudes.
pub fn apparent_longitude(elements: &MeanElements, jd: JulianDay) -> f64 {
    let planet = mean_longitude(elements, jd).to_radians();
    let earth = (sun_longitude(jd) + 180.0).to_radians();
    let a = elements.semi_major_axis;

    let x = a * planet.cos() - earth.cos();
    let y = a * planet.sin() - earth.sin();
    normalize_degrees(y.atan2(x).to_degrees())
}

/// Whether the body appears to move backwards at `jd`.
///
/// The luminaries never do. For planets this is a numerical derivative of
/// the circular-orbit apparent longitude, so stations are only accurate to
/// within days; treat the flag as an approximation.
pub fn is_retrograde(body: Body, jd: JulianDay) -> bool {
    match elements_for(body) {
        Some(elements) if !body.is_luminary() => is_decreasing(
            |t| apparent_longitude(elements, t),
            jd,
            RETROGRADE_STEP_DAYS,
        ),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn angular_gap(a: f64, b: f64) -> f64 {
        let d = (a - b).abs() % 360.0;
        d.min(360.0 - d)
    }

    #[test]
    fn sun_at_j2000_is_late_capricorn_boundary() {
        let lon = sun_longitude(JulianDay::J2000);
        assert!(angular_gap(lon, 280.38) < 0.05, "sun = {lon}");
    }

    #[test]
    fn sun_near_equinox_in_march() {
        // 2000-03-20 07:35 UT, vernal equinox
        let lon = sun_longitude(JulianDay::new(2_451_623.816));
        assert!(angular_gap(lon, 0.0) < 0.1, "sun = {lon}");
    }

    #[test]
    fn moon_at_j2000() {
        let lon = moon_longitude(JulianDay::J2000);
        assert!(angular_gap(lon, 223.3) < 1.5, "moon = {lon}");
    }

    #[test]
    fn mean_longitude_at_epoch_is_reference() {
        for el in &PLANET_ELEMENTS {
            let lon = mean_longitude(el, JulianDay::J2000);
            assert!((lon - el.longitude_j2000).abs() < 1e-9);
        }
    }

    #[test]
    fn mean_longitude_completes_one_orbit_per_period() {
        let mars = elements_for(Body::Mars).unwrap();
        let later = JulianDay::J2000.offset_days(mars.period_days);
        assert!(angular_gap(mean_longitude(mars, later), mars.longitude_j2000) < 1e-6);
    }

    #[test]
    fn luminaries_never_retrograde() {
        for days in [0.0, 100.0, 5_000.0, -20_000.0] {
            let jd = JulianDay::J2000.offset_days(days);
            assert!(!is_retrograde(Body::Sun, jd));
            assert!(!is_retrograde(Body::Moon, jd));
        }
    }

    #[test]
    fn superior_planet_retrogrades_at_opposition() {
        // Jupiter opposite the Sun must be moving backwards; scan a year
        // and check the flag at the best opposition found.
        let jupiter = elements_for(Body::Jupiter).unwrap();
        let opposition = (0..400)
            .map(|d| JulianDay::J2000.offset_days(d as f64))
            .min_by(|a, b| {
                let ea = angular_gap(apparent_longitude(jupiter, *a), sun_longitude(*a) + 180.0);
                let eb = angular_gap(apparent_longitude(jupiter, *b), sun_longitude(*b) + 180.0);
                ea.total_cmp(&eb)
            })
            .unwrap();
        assert!(is_retrograde(Body::Jupiter, opposition));
    }

    #[test]
    fn retrograde_flag_follows_the_geocentric_direction() {
        let mars = elements_for(Body::Mars).unwrap();
        let jd = (0..800)
            .map(|d| JulianDay::J2000.offset_days(d as f64))
            .find(|jd| is_retrograde(Body::Mars, *jd))
            .unwrap();
        let (before, after) = (jd.offset_days(-0.5), jd.offset_days(0.5));
        // The reported mean longitude keeps advancing; the apparent one backs up.
        assert!(angular_gap(mean_longitude(mars, after), mean_longitude(mars, before)) > 0.0);
        assert!(normalize_degrees(mean_longitude(mars, after) - mean_longitude(mars, before)) < 180.0);
        assert!(normalize_degrees(apparent_longitude(mars, after) - apparent_longitude(mars, before)) > 180.0);
    }

    #[test]
    fn superior_planet_direct_at_conjunction() {
        let saturn = elements_for(Body::Saturn).unwrap();
        let conjunction = (0..400)
            .map(|d| JulianDay::J2000.offset_days(d as f64))
            .min_by(|a, b| {
                let ea = angular_gap(apparent_longitude(saturn, *a), sun_longitude(*a));
                let eb = angular_gap(apparent_longitude(saturn, *b), sun_longitude(*b));
                ea.total_cmp(&eb)
            })
            .unwrap();
        assert!(!is_retrograde(Body::Saturn, conjunction));
    }

    #[test]
    fn positions_are_normalized_and_ordered() {
        let eph = AnalyticEphemeris::new();
        for days in [-50_000.0, -1.0, 0.0, 12_345.6, 80_000.0] {
            let positions = eph.positions(JulianDay::J2000.offset_days(days));
            for (i, pos) in positions.iter().enumerate() {
                assert_eq!(pos.body, Body::ALL[i]);
                assert!((0.0..360.0).contains(&pos.longitude));
            }
        }
    }
}
