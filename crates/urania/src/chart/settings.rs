use serde::{Deserialize, Serialize};

use crate::aspects::AspectOrbs;
use crate::ephemeris::HouseSystem;
use crate::error::EngineError;

/// Tunables for a chart computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub house_system: HouseSystem,
    pub orbs: AspectOrbs,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            // Equal houses from the Ascendant; works at any non-polar latitude
            house_system: HouseSystem::Simplified,
            orbs: AspectOrbs::default(),
        }
    }
}

impl ChartSettings {
    pub fn validate(&self) -> Result<(), EngineError> {
        self.orbs
            .validate()
            .map_err(|message| EngineError::invalid("orbs", message))
    }
}
