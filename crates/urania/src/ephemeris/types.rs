use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bring any angle into [0, 360).
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// The ten charted bodies, in canonical chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Body {
    pub const ALL: [Body; 10] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Body::Sun => "sun",
            Body::Moon => "moon",
            Body::Mercury => "mercury",
            Body::Venus => "venus",
            Body::Mars => "mars",
            Body::Jupiter => "jupiter",
            Body::Saturn => "saturn",
            Body::Uranus => "uranus",
            Body::Neptune => "neptune",
            Body::Pluto => "pluto",
        }
    }

    /// Position in [`Body::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_luminary(self) -> bool {
        matches!(self, Body::Sun | Body::Moon)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Body::ALL
            .iter()
            .copied()
            .find(|body| body.name() == lower)
            .ok_or_else(|| format!("Unknown body: {}", s))
    }
}

/// Geocentric ecliptic position of one body at the chart instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    pub body: Body,
    /// Ecliptic longitude in degrees, [0, 360)
    pub longitude: f64,
    /// Apparent backward motion as seen from Earth. The analytic backend
    /// reports planets at their mean longitude, which always increases, and
    /// derives this flag from the geocentric direction instead.
    pub retrograde: bool,
}

/// House division method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HouseSystem {
    /// Equal 30° houses from the Ascendant, MC taken as Asc + 270°.
    #[default]
    Simplified,
    /// Time-based semi-arc trisection with the MC from RAMC.
    Placidus,
}

impl HouseSystem {
    pub fn name(self) -> &'static str {
        match self {
            HouseSystem::Simplified => "simplified",
            HouseSystem::Placidus => "placidus",
        }
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HouseSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simplified" | "equal" => Ok(HouseSystem::Simplified),
            "placidus" => Ok(HouseSystem::Placidus),
            other => Err(format!(
                "Invalid house system: {}. Valid systems: [\"simplified\", \"placidus\"]",
                other
            )),
        }
    }
}

/// Angles and cusps for one instant and place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseFrame {
    pub system: HouseSystem,
    /// Cusp longitudes in house order; `cusps[0]` is the Ascendant.
    pub cusps: [f64; 12],
    pub ascendant: f64,
    pub midheaven: f64,
}

impl HouseFrame {
    pub fn descendant(&self) -> f64 {
        normalize_degrees(self.ascendant + 180.0)
    }

    pub fn imum_coeli(&self) -> f64 {
        normalize_degrees(self.midheaven + 180.0)
    }
}
