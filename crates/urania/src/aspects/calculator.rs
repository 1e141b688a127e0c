use crate::aspects::types::{Aspect, AspectCore, AspectKind, AspectOrbs};
use crate::ephemeris::types::BodyPosition;

/// Orbs under this are reported as exact.
const EXACT_ORB: f64 = 0.1;

/// Aspect calculator
#[derive(Debug, Clone, Default)]
pub struct AspectCalculator {
    orbs: AspectOrbs,
}

impl AspectCalculator {
    /// Create a calculator with the given orb tolerances
    pub fn new(orbs: AspectOrbs) -> Self {
        Self { orbs }
    }

    pub fn orbs(&self) -> &AspectOrbs {
        &self.orbs
    }

    /// Aspects over every unordered pair of bodies, in chart order.
    pub fn compute_aspects(&self, bodies: &[BodyPosition]) -> Vec<Aspect> {
        let mut aspects = Vec::new();
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let (a, b) = (&bodies[i], &bodies[j]);
                if let Some(core) = self.calculate_aspect(a.longitude, b.longitude) {
                    aspects.push(Aspect::new(a.body, b.body, core));
                }
            }
        }
        aspects
    }

    /// First aspect, in priority order, whose window holds the separation.
    pub fn calculate_aspect(&self, lon1: f64, lon2: f64) -> Option<AspectCore> {
        let separation = angular_separation(lon1, lon2);

        AspectKind::ALL.into_iter().find_map(|kind| {
            let deviation = (separation - kind.angle()).abs();
            // Compare the reported (rounded) orb so it never exceeds the tolerance.
            let orb = round_orb(deviation);
            if orb <= self.orbs.for_kind(kind) {
                Some(AspectCore {
                    kind,
                    exact_angle: kind.angle(),
                    orb,
                    nature: kind.nature(),
                    is_exact: deviation < EXACT_ORB,
                })
            } else {
                None
            }
        })
    }
}

/// Shorter arc between two longitudes, in [0, 180].
pub fn angular_separation(lon1: f64, lon2: f64) -> f64 {
    let diff = (lon1 - lon2).abs() % 360.0;
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

/// Aspects among `bodies` using the default orbs.
pub fn detect_aspects(bodies: &[BodyPosition]) -> Vec<Aspect> {
    AspectCalculator::default().compute_aspects(bodies)
}

fn round_orb(orb: f64) -> f64 {
    (orb * 100.0).round() / 100.0
}
