//! Tropical zodiac signs and their element/modality classification.
//!
//! Twelve 30° signs starting at 0° Aries. Element and modality are fixed
//! per sign; the table below is the only source of truth for both.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ephemeris::types::normalize_degrees;

pub const SIGN_WIDTH: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Cardinal,
    Fixed,
    Mutable,
}

impl Element {
    pub const ALL: [Element; 4] = [Element::Fire, Element::Earth, Element::Air, Element::Water];
}

impl Modality {
    pub const ALL: [Modality; 3] = [Modality::Cardinal, Modality::Fixed, Modality::Mutable];
}

#[derive(Debug, Clone, Copy)]
pub struct SignMeta {
    pub sign: Sign,
    pub name: &'static str,
    pub element: Element,
    pub modality: Modality,
}

pub const SIGNS: [SignMeta; 12] = [
    SignMeta { sign: Sign::Aries, name: "aries", element: Element::Fire, modality: Modality::Cardinal },
    SignMeta { sign: Sign::Taurus, name: "taurus", element: Element::Earth, modality: Modality::Fixed },
    SignMeta { sign: Sign::Gemini, name: "gemini", element: Element::Air, modality: Modality::Mutable },
    SignMeta { sign: Sign::Cancer, name: "cancer", element: Element::Water, modality: Modality::Cardinal },
    SignMeta { sign: Sign::Leo, name: "leo", element: Element::Fire, modality: Modality::Fixed },
    SignMeta { sign: Sign::Virgo, name: "virgo", element: Element::Earth, modality: Modality::Mutable },
    SignMeta { sign: Sign::Libra, name: "libra", element: Element::Air, modality: Modality::Cardinal },
    SignMeta { sign: Sign::Scorpio, name: "scorpio", element: Element::Water, modality: Modality::Fixed },
    SignMeta { sign: Sign::Sagittarius, name: "sagittarius", element: Element::Fire, modality: Modality::Mutable },
    SignMeta { sign: Sign::Capricorn, name: "capricorn", element: Element::Earth, modality: Modality::Cardinal },
    SignMeta { sign: Sign::Aquarius, name: "aquarius", element: Element::Air, modality: Modality::Fixed },
    SignMeta { sign: Sign::Pisces, name: "pisces", element: Element::Water, modality: Modality::Mutable },
];

impl Sign {
    pub const ALL: [Sign; 12] = [
        Sign::Aries,
        Sign::Taurus,
        Sign::Gemini,
        Sign::Cancer,
        Sign::Leo,
        Sign::Virgo,
        Sign::Libra,
        Sign::Scorpio,
        Sign::Sagittarius,
        Sign::Capricorn,
        Sign::Aquarius,
        Sign::Pisces,
    ];

    /// 0 for Aries through 11 for Pisces.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Sign {
        Sign::ALL[index % 12]
    }

    pub fn meta(self) -> &'static SignMeta {
        &SIGNS[self.index()]
    }

    pub fn name(self) -> &'static str {
        self.meta().name
    }

    pub fn element(self) -> Element {
        self.meta().element
    }

    pub fn modality(self) -> Modality {
        self.meta().modality
    }

    /// Longitude where the sign begins.
    pub fn start(self) -> f64 {
        self.index() as f64 * SIGN_WIDTH
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Sign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        SIGNS
            .iter()
            .find(|meta| meta.name == lower)
            .map(|meta| meta.sign)
            .ok_or_else(|| format!("Unknown sign: {}", s))
    }
}

/// Sign and degree within it for one longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignPlacement {
    pub sign: Sign,
    /// Degrees into the sign, [0, 30)
    pub degree: f64,
}

/// A longitude together with its derived sign placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub longitude: f64,
    pub sign: Sign,
    pub degree: f64,
}

impl Placement {
    pub fn from_longitude(longitude: f64) -> Self {
        let longitude = normalize_degrees(longitude);
        let SignPlacement { sign, degree } = sign_of(longitude);
        Self {
            longitude,
            sign,
            degree,
        }
    }

    pub fn sign_placement(&self) -> SignPlacement {
        SignPlacement {
            sign: self.sign,
            degree: self.degree,
        }
    }
}

/// Split a longitude into sign and degree-in-sign.
///
/// `sign.start() + degree` reproduces the normalized longitude exactly.
pub fn sign_of(longitude: f64) -> SignPlacement {
    let lon = normalize_degrees(longitude);
    let degree = lon % SIGN_WIDTH;
    // (lon - degree) is an exact multiple of 30, so this cannot land one sign off.
    let index = ((lon - degree) / SIGN_WIDTH).round() as usize;
    SignPlacement {
        sign: Sign::from_index(index),
        degree,
    }
}

pub fn signs_of_element(element: Element) -> Vec<Sign> {
    SIGNS
        .iter()
        .filter(|meta| meta.element == element)
        .map(|meta| meta.sign)
        .collect()
}

pub fn signs_of_modality(modality: Modality) -> Vec<Sign> {
    SIGNS
        .iter()
        .filter(|meta| meta.modality == modality)
        .map(|meta| meta.sign)
        .collect()
}
