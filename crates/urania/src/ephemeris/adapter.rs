//! Swiss Ephemeris backend (cargo feature `swisseph`).

use std::env;
use std::path::PathBuf;

use swisseph::swe::{calc_ut, houses_ex};
use swisseph::{AscMc, Cusp};

use crate::ephemeris::backend::EphemerisBackend;
use crate::ephemeris::houses::{check_latitude, compute_houses};
use crate::ephemeris::types::{normalize_degrees, Body, BodyPosition, HouseFrame, HouseSystem};
use crate::error::{ensure_finite, EngineError};
use crate::time::JulianDay;

// SEFLG_SWIEPH | SEFLG_SPEED
const FLAGS: i32 = 2 | 256;

const PLACIDUS: u8 = b'P';

/// Swiss Ephemeris ids happen to follow the canonical body order.
fn planet_code(body: Body) -> i32 {
    body.index() as i32
}

/// High-precision backend reading Swiss Ephemeris data files.
pub struct SwissEphemerisBackend {
    _ephemeris_path: PathBuf,
}

impl SwissEphemerisBackend {
    /// Create a backend with an optional ephemeris path; falls back to
    /// `SWISS_EPHEMERIS_PATH`, then `/usr/local/share/swisseph`.
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EngineError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/usr/local/share/swisseph"))
        });

        if !path.exists() {
            return Err(EngineError::internal(format!(
                "Swiss Ephemeris data not found at {}",
                path.display()
            )));
        }
        log::info!("using Swiss Ephemeris data at {}", path.display());

        Ok(Self {
            _ephemeris_path: path,
        })
    }

    fn body_position(&self, body: Body, jd: JulianDay) -> Result<BodyPosition, EngineError> {
        let result = calc_ut(jd.value(), planet_code(body) as u32, FLAGS as u32).map_err(|e| {
            EngineError::internal(format!(
                "Swiss Ephemeris failed for {} at JD {}: {}",
                body,
                jd.value(),
                e
            ))
        })?;

        let out = result.out;
        let longitude = ensure_finite("longitude", out[0])?;
        let speed = out[3];

        Ok(BodyPosition {
            body,
            longitude: normalize_degrees(longitude),
            retrograde: !body.is_luminary() && speed < 0.0,
        })
    }
}

impl EphemerisBackend for SwissEphemerisBackend {
    fn name(&self) -> &'static str {
        "swisseph"
    }

    fn body_positions(&self, jd: JulianDay) -> Result<[BodyPosition; 10], EngineError> {
        let mut positions = Vec::with_capacity(Body::ALL.len());
        for body in Body::ALL {
            positions.push(self.body_position(body, jd)?);
        }
        positions
            .try_into()
            .map_err(|_| EngineError::internal("expected ten body positions"))
    }

    fn houses(
        &self,
        jd: JulianDay,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<HouseFrame, EngineError> {
        if system == HouseSystem::Simplified {
            return compute_houses(jd, latitude, longitude, system);
        }
        check_latitude(latitude)?;

        let (c, a) = houses_ex(jd.value(), FLAGS, latitude, longitude, PLACIDUS as i32);
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let raw = [
            cusps.first, cusps.second, cusps.third, cusps.fourth,
            cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
            cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
        ];
        let mut out = [0.0; 12];
        for (i, cusp) in raw.iter().enumerate() {
            out[i] = normalize_degrees(ensure_finite("cusp", *cusp)?);
        }

        Ok(HouseFrame {
            system,
            cusps: out,
            ascendant: normalize_degrees(ensure_finite("ascendant", ascmc.ascendant)?),
            midheaven: normalize_degrees(ensure_finite("midheaven", ascmc.mc)?),
        })
    }
}
