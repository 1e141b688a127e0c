use serde::{Deserialize, Serialize};

use crate::aspects::Aspect;
use crate::ephemeris::{Body, HouseSystem};
use crate::time::JulianDay;
use crate::western::{Element, Modality, Placement, Sign};

/// Bumped whenever the serialized shape of [`ChartResult`] changes.
pub const SCHEMA_VERSION: u32 = 1;

/// A body with everything derived from its longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedBody {
    pub body: Body,
    pub longitude: f64,
    pub sign: Sign,
    pub degree: f64,
    pub retrograde: bool,
    /// 1-12
    pub house: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedCusp {
    /// 1-12
    pub house: u8,
    pub longitude: f64,
    pub sign: Sign,
    pub degree: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementTally {
    pub fire: u32,
    pub earth: u32,
    pub air: u32,
    pub water: u32,
}

impl ElementTally {
    pub fn add(&mut self, element: Element) {
        match element {
            Element::Fire => self.fire += 1,
            Element::Earth => self.earth += 1,
            Element::Air => self.air += 1,
            Element::Water => self.water += 1,
        }
    }

    pub fn get(&self, element: Element) -> u32 {
        match element {
            Element::Fire => self.fire,
            Element::Earth => self.earth,
            Element::Air => self.air,
            Element::Water => self.water,
        }
    }

    pub fn total(&self) -> u32 {
        self.fire + self.earth + self.air + self.water
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalityTally {
    pub cardinal: u32,
    pub fixed: u32,
    pub mutable: u32,
}

impl ModalityTally {
    pub fn add(&mut self, modality: Modality) {
        match modality {
            Modality::Cardinal => self.cardinal += 1,
            Modality::Fixed => self.fixed += 1,
            Modality::Mutable => self.mutable += 1,
        }
    }

    pub fn get(&self, modality: Modality) -> u32 {
        match modality {
            Modality::Cardinal => self.cardinal,
            Modality::Fixed => self.fixed,
            Modality::Mutable => self.mutable,
        }
    }

    pub fn total(&self) -> u32 {
        self.cardinal + self.fixed + self.mutable
    }
}

/// The complete natal chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartResult {
    pub schema_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub julian_day: JulianDay,
    pub house_system: HouseSystem,
    /// Ten bodies in canonical order
    pub bodies: Vec<PlacedBody>,
    /// Twelve cusps in house order
    pub houses: Vec<PlacedCusp>,
    pub ascendant: Placement,
    pub midheaven: Placement,
    pub descendant: Placement,
    pub imum_coeli: Placement,
    pub aspects: Vec<Aspect>,
    pub elements: ElementTally,
    pub modalities: ModalityTally,
}

impl ChartResult {
    pub fn body(&self, body: Body) -> Option<&PlacedBody> {
        self.bodies.iter().find(|placed| placed.body == body)
    }

    pub fn cusp(&self, house: u8) -> Option<&PlacedCusp> {
        self.houses.iter().find(|cusp| cusp.house == house)
    }

    pub fn aspects_of(&self, body: Body) -> impl Iterator<Item = &Aspect> {
        self.aspects.iter().filter(move |aspect| aspect.involves(body))
    }
}
