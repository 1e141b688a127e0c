//! Sidereal time, Ascendant, Midheaven and house cusps.
//!
//! GMST and obliquity follow Meeus ch. 12 and 22. The Placidus cusps use
//! the classic fixed-point iteration on the semi-arc trisection.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::ephemeris::types::{normalize_degrees, HouseFrame, HouseSystem};
use crate::error::{ensure_finite, EngineError};
use crate::time::JulianDay;

/// Latitudes closer than this to a pole have no defined horizon geometry.
pub const POLE_TOLERANCE_DEG: f64 = 1e-6;

const PLACIDUS_MAX_ITERATIONS: usize = 1_000;
const PLACIDUS_TOLERANCE_RAD: f64 = 1e-10;

/// Greenwich Mean Sidereal Time in degrees, [0, 360).
pub fn greenwich_mean_sidereal_time(jd: JulianDay) -> f64 {
    let t = jd.centuries_since_j2000();
    let theta = 280.460_618_37
        + 360.985_647_366_29 * jd.days_since_j2000()
        + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    normalize_degrees(theta)
}

/// Local Sidereal Time (= RAMC) in degrees for an east-positive longitude.
pub fn local_sidereal_time(jd: JulianDay, longitude: f64) -> f64 {
    normalize_degrees(greenwich_mean_sidereal_time(jd) + longitude)
}

/// Mean obliquity of the ecliptic in degrees.
pub fn mean_obliquity(jd: JulianDay) -> f64 {
    let t = jd.centuries_since_j2000();
    23.439_291_111 - 0.013_004_167 * t - 0.000_000_163_9 * t * t
        + 0.000_000_503_6 * t * t * t
}

/// Ecliptic longitude rising on the eastern horizon.
///
/// `tan(Asc) = -cos(LST) / (sin(LST)·cos(eps) + tan(lat)·sin(eps))`, with
/// the quadrant chosen so the result lies east of the meridian.
pub fn ascendant(lst: f64, obliquity: f64, latitude: f64) -> f64 {
    let lst = lst.to_radians();
    let eps = obliquity.to_radians();
    let phi = latitude.to_radians();

    let asc = f64::atan2(
        lst.cos(),
        -(lst.sin() * eps.cos() + phi.tan() * eps.sin()),
    );
    normalize_degrees(asc.to_degrees())
}

/// Ecliptic longitude culminating on the meridian.
pub fn midheaven(lst: f64, obliquity: f64) -> f64 {
    let lst = lst.to_radians();
    let eps = obliquity.to_radians();
    normalize_degrees(f64::atan2(lst.sin(), lst.cos() * eps.cos()).to_degrees())
}

/// Fails with a domain error when the latitude is at a pole.
pub fn check_latitude(latitude: f64) -> Result<(), EngineError> {
    if 90.0 - latitude.abs() < POLE_TOLERANCE_DEG {
        return Err(EngineError::domain(format!(
            "houses are undefined at the poles (latitude {latitude})"
        )));
    }
    Ok(())
}

/// Ascendant, Midheaven and the twelve cusps for an instant and place.
pub fn compute_houses(
    jd: JulianDay,
    latitude: f64,
    longitude: f64,
    system: HouseSystem,
) -> Result<HouseFrame, EngineError> {
    check_latitude(latitude)?;

    let lst = local_sidereal_time(jd, longitude);
    let eps = mean_obliquity(jd);
    let asc = ensure_finite("ascendant", ascendant(lst, eps, latitude))?;

    let (cusps, mc) = match system {
        HouseSystem::Simplified => (equal_cusps(asc), normalize_degrees(asc + 270.0)),
        HouseSystem::Placidus => {
            let mc = midheaven(lst, eps);
            (placidus_cusps(asc, mc, lst, eps, latitude)?, mc)
        }
    };

    for (i, cusp) in cusps.iter().enumerate() {
        ensure_finite(&format!("cusp {}", i + 1), *cusp)?;
    }

    Ok(HouseFrame {
        system,
        cusps,
        ascendant: asc,
        midheaven: ensure_finite("midheaven", mc)?,
    })
}

/// Twelve 30° houses starting at `start`.
pub fn equal_cusps(start: f64) -> [f64; 12] {
    std::array::from_fn(|i| normalize_degrees(start + 30.0 * i as f64))
}

fn placidus_cusps(
    asc: f64,
    mc: f64,
    ramc: f64,
    obliquity: f64,
    latitude: f64,
) -> Result<[f64; 12], EngineError> {
    if latitude.abs() >= 90.0 - obliquity {
        return Err(EngineError::domain(format!(
            "Placidus houses are undefined beyond the polar circles (latitude {latitude})"
        )));
    }

    let ramc = ramc.to_radians();
    let eps = obliquity.to_radians();
    let phi = latitude.to_radians();

    let c11 = placidus_cusp(ramc, eps, phi, 1.0 / 3.0, true)?;
    let c12 = placidus_cusp(ramc, eps, phi, 2.0 / 3.0, true)?;
    let c2 = placidus_cusp(ramc, eps, phi, 2.0 / 3.0, false)?;
    let c3 = placidus_cusp(ramc, eps, phi, 1.0 / 3.0, false)?;

    let opposite = |lon: f64| normalize_degrees(lon + 180.0);
    Ok([
        asc,
        c2,
        c3,
        opposite(mc),
        opposite(c11),
        opposite(c12),
        opposite(asc),
        opposite(c2),
        opposite(c3),
        mc,
        c11,
        c12,
    ])
}

/// One intermediate Placidus cusp, in degrees.
///
/// Above the horizon the cusp sits `fraction` of its diurnal semi-arc east
/// of the meridian: `RA = RAMC + f·DSA`. Below it the cusp sits `fraction`
/// of its nocturnal semi-arc west of the lower meridian:
/// `RA = RAMC + 180° - f·NSA`. The declination depends on RA, so iterate.
fn placidus_cusp(
    ramc: f64,
    eps: f64,
    phi: f64,
    fraction: f64,
    diurnal: bool,
) -> Result<f64, EngineError> {
    let target = |semi_arc: f64| {
        if diurnal {
            ramc + fraction * semi_arc
        } else {
            ramc + PI - fraction * (PI - semi_arc)
        }
    };

    let mut ra = target(FRAC_PI_2);
    let mut converged = false;
    for _ in 0..PLACIDUS_MAX_ITERATIONS {
        let dec = (eps.tan() * ra.sin()).atan();
        let cos_h = -(phi.tan() * dec.tan());
        if cos_h.abs() > 1.0 {
            return Err(EngineError::domain(
                "Placidus cusp lies on a circumpolar part of the ecliptic",
            ));
        }
        let next = target(cos_h.acos());
        if (next - ra).abs() < PLACIDUS_TOLERANCE_RAD {
            ra = next;
            converged = true;
            break;
        }
        ra = next;
    }
    if !converged {
        return Err(EngineError::domain(
            "Placidus cusp iteration did not converge at this latitude",
        ));
    }

    Ok(normalize_degrees(
        f64::atan2(ra.sin(), ra.cos() * eps.cos()).to_degrees(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward_arc(from: f64, to: f64) -> f64 {
        normalize_degrees(to - from)
    }

    #[test]
    fn gmst_at_j2000() {
        let gmst = greenwich_mean_sidereal_time(JulianDay::J2000);
        assert!((gmst - 280.460_618_37).abs() < 1e-9);
    }

    #[test]
    fn gmst_meeus_example_12a() {
        // 1987 April 10, 0h UT: 13h10m46.3668s
        let gmst = greenwich_mean_sidereal_time(JulianDay::new(2_446_895.5));
        let expected = (13.0 + 10.0 / 60.0 + 46.3668 / 3600.0) * 15.0;
        assert!((gmst - expected).abs() < 1e-4, "gmst = {gmst}");
    }

    #[test]
    fn obliquity_at_j2000() {
        assert!((mean_obliquity(JulianDay::J2000) - 23.439_291).abs() < 1e-6);
    }

    #[test]
    fn aries_midheaven_puts_cancer_on_the_equator_ascendant() {
        let eps = 23.44;
        assert!((ascendant(0.0, eps, 0.0) - 90.0).abs() < 1e-9);
        assert!(midheaven(0.0, eps).abs() < 1e-9);
        // Six sidereal hours later Cancer culminates and Libra rises.
        assert!((ascendant(90.0, eps, 0.0) - 180.0).abs() < 1e-9);
        assert!((midheaven(90.0, eps) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn ascendant_is_east_of_midheaven() {
        for lat in [-60.0, -30.0, 0.0, 35.0, 51.5, 65.0] {
            for step in 0..24 {
                let lst = step as f64 * 15.0;
                let arc = forward_arc(midheaven(lst, 23.44), ascendant(lst, 23.44, lat));
                assert!(arc > 0.0 && arc < 180.0, "lat {lat} lst {lst}: arc {arc}");
            }
        }
    }

    #[test]
    fn simplified_houses_are_equal_from_ascendant() {
        let frame = compute_houses(JulianDay::J2000, 40.0, -74.0, HouseSystem::Simplified).unwrap();
        assert_eq!(frame.cusps[0], frame.ascendant);
        for i in 0..12 {
            let arc = forward_arc(frame.cusps[i], frame.cusps[(i + 1) % 12]);
            assert!((arc - 30.0).abs() < 1e-9);
        }
        assert!((forward_arc(frame.ascendant, frame.midheaven) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn pole_is_a_domain_error() {
        for lat in [90.0, -90.0] {
            for system in [HouseSystem::Simplified, HouseSystem::Placidus] {
                let err = compute_houses(JulianDay::J2000, lat, 0.0, system).unwrap_err();
                assert!(matches!(err, EngineError::Domain { .. }));
            }
        }
    }

    #[test]
    fn simplified_houses_work_inside_polar_circle() {
        let frame = compute_houses(JulianDay::J2000, 78.2, 15.6, HouseSystem::Simplified).unwrap();
        assert!(frame.cusps.iter().all(|c| (0.0..360.0).contains(c)));
    }

    #[test]
    fn placidus_refuses_polar_latitudes() {
        let err = compute_houses(JulianDay::J2000, 70.0, 0.0, HouseSystem::Placidus).unwrap_err();
        assert!(matches!(err, EngineError::Domain { .. }));
    }

    #[test]
    fn placidus_at_equator_trisects_right_ascension() {
        // At the equator every semi-arc is 90°, so cusp 11 sits at RA = RAMC + 30°.
        let eps = 23.44_f64;
        let cusps = placidus_cusps(ascendant(0.0, eps, 0.0), midheaven(0.0, eps), 0.0, eps, 0.0)
            .unwrap();
        let expected = f64::atan2(
            30f64.to_radians().sin(),
            30f64.to_radians().cos() * eps.to_radians().cos(),
        )
        .to_degrees();
        assert!((cusps[10] - expected).abs() < 1e-8, "cusp 11 = {}", cusps[10]);
        assert!((cusps[0] - 90.0).abs() < 1e-9);
        assert!(cusps[9].abs() < 1e-9);
    }

    #[test]
    fn placidus_cusps_run_forward_around_the_circle() {
        for lat in [-50.0, -20.0, 10.0, 40.7, 55.0] {
            let frame = compute_houses(
                JulianDay::new(2_448_000.25),
                lat,
                -3.7,
                HouseSystem::Placidus,
            )
            .unwrap();
            let total: f64 = (0..12)
                .map(|i| forward_arc(frame.cusps[i], frame.cusps[(i + 1) % 12]))
                .sum();
            assert!((total - 360.0).abs() < 1e-6, "lat {lat}: total {total}");
            assert_eq!(frame.cusps[0], frame.ascendant);
            assert_eq!(frame.cusps[9], frame.midheaven);
        }
    }
}
