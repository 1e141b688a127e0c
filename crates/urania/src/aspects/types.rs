use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ephemeris::types::Body;

/// The five major aspects, in detection priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

/// Fixed interpretive quality of an aspect kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectNature {
    Harmonic,
    Challenging,
    Neutral,
}

impl AspectKind {
    /// Priority order used when matching; the first hit wins.
    pub const ALL: [AspectKind; 5] = [
        AspectKind::Conjunction,
        AspectKind::Sextile,
        AspectKind::Square,
        AspectKind::Trine,
        AspectKind::Opposition,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::Sextile => "sextile",
            AspectKind::Square => "square",
            AspectKind::Trine => "trine",
            AspectKind::Opposition => "opposition",
        }
    }

    /// Exact angle in degrees.
    pub fn angle(self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::Sextile => 60.0,
            AspectKind::Square => 90.0,
            AspectKind::Trine => 120.0,
            AspectKind::Opposition => 180.0,
        }
    }

    pub fn nature(self) -> AspectNature {
        match self {
            AspectKind::Conjunction => AspectNature::Neutral,
            AspectKind::Sextile | AspectKind::Trine => AspectNature::Harmonic,
            AspectKind::Square | AspectKind::Opposition => AspectNature::Challenging,
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Orb tolerance per aspect kind, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AspectOrbs {
    pub conjunction: f64,
    pub sextile: f64,
    pub square: f64,
    pub trine: f64,
    pub opposition: f64,
}

impl Default for AspectOrbs {
    fn default() -> Self {
        Self {
            conjunction: 8.0,
            sextile: 6.0,
            square: 7.0,
            trine: 8.0,
            opposition: 8.0,
        }
    }
}

impl AspectOrbs {
    pub fn for_kind(&self, kind: AspectKind) -> f64 {
        match kind {
            AspectKind::Conjunction => self.conjunction,
            AspectKind::Sextile => self.sextile,
            AspectKind::Square => self.square,
            AspectKind::Trine => self.trine,
            AspectKind::Opposition => self.opposition,
        }
    }

    /// Each tolerance must be finite and within [0, 30).
    pub fn validate(&self) -> Result<(), String> {
        for kind in AspectKind::ALL {
            let orb = self.for_kind(kind);
            if !orb.is_finite() || !(0.0..30.0).contains(&orb) {
                return Err(format!("orb for {} must be within [0, 30), got {}", kind, orb));
            }
        }
        Ok(())
    }
}

/// Match found for one pair of longitudes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectCore {
    pub kind: AspectKind,
    /// Exact angle for this aspect (0, 60, 90, 120, 180)
    pub exact_angle: f64,
    /// Deviation from the exact angle, rounded to 0.01°
    pub orb: f64,
    pub nature: AspectNature,
    /// Whether the orb is under 0.1°
    pub is_exact: bool,
}

/// An aspect between two bodies; `first` precedes `second` in chart order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    pub first: Body,
    pub second: Body,
    pub kind: AspectKind,
    pub exact_angle: f64,
    pub orb: f64,
    pub nature: AspectNature,
    pub is_exact: bool,
}

impl Aspect {
    pub fn new(first: Body, second: Body, core: AspectCore) -> Self {
        Self {
            first,
            second,
            kind: core.kind,
            exact_angle: core.exact_angle,
            orb: core.orb,
            nature: core.nature,
            is_exact: core.is_exact,
        }
    }

    pub fn involves(&self, body: Body) -> bool {
        self.first == body || self.second == body
    }
}
