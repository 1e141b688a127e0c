//! Turns a birth request into a full chart.

use crate::aspects::AspectCalculator;
use crate::chart::result::{
    ChartResult, ElementTally, ModalityTally, PlacedBody, PlacedCusp, SCHEMA_VERSION,
};
use crate::chart::settings::ChartSettings;
use crate::ephemeris::{AnalyticEphemeris, Body, BodyPosition, EphemerisBackend, HouseFrame};
use crate::error::{ensure_finite, EngineError};
use crate::input::BirthInput;
use crate::time::{to_julian_day, JulianDay};
use crate::western::{house_of, sign_of, Placement};

/// Bodies counted in the element and modality balance, alongside the Ascendant.
pub const PERSONAL_BODIES: [Body; 5] = [Body::Sun, Body::Moon, Body::Mercury, Body::Venus, Body::Mars];

/// Chart pipeline bound to one ephemeris backend.
pub struct ChartEngine<B = AnalyticEphemeris> {
    backend: B,
    settings: ChartSettings,
    aspects: AspectCalculator,
}

impl Default for ChartEngine<AnalyticEphemeris> {
    fn default() -> Self {
        Self::new(AnalyticEphemeris::new(), ChartSettings::default())
    }
}

impl<B: EphemerisBackend> ChartEngine<B> {
    pub fn new(backend: B, settings: ChartSettings) -> Self {
        let aspects = AspectCalculator::new(settings.orbs);
        Self {
            backend,
            settings,
            aspects,
        }
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Computes the chart, or fails as a whole on the first error.
    pub fn compute(&self, input: &BirthInput) -> Result<ChartResult, EngineError> {
        self.settings.validate()?;

        let jd = to_julian_day(input)?;
        let positions = self.backend.body_positions(jd)?;
        for position in &positions {
            ensure_finite(position.body.name(), position.longitude)?;
        }
        let frame = self.backend.houses(
            jd,
            input.latitude,
            input.longitude,
            self.settings.house_system,
        )?;

        let chart = self.assemble(input, jd, &positions, &frame);
        log::debug!(
            "computed chart at JD {:.5} with {} backend: asc {:.2}, {} aspects",
            jd.value(),
            self.backend.name(),
            frame.ascendant,
            chart.aspects.len()
        );
        Ok(chart)
    }

    fn assemble(
        &self,
        input: &BirthInput,
        jd: JulianDay,
        positions: &[BodyPosition; 10],
        frame: &HouseFrame,
    ) -> ChartResult {
        let bodies: Vec<PlacedBody> = positions
            .iter()
            .map(|position| {
                let placement = sign_of(position.longitude);
                PlacedBody {
                    body: position.body,
                    longitude: position.longitude,
                    sign: placement.sign,
                    degree: placement.degree,
                    retrograde: position.retrograde,
                    house: house_of(position.longitude, &frame.cusps),
                }
            })
            .collect();

        let houses = frame
            .cusps
            .iter()
            .enumerate()
            .map(|(i, cusp)| {
                let placement = sign_of(*cusp);
                PlacedCusp {
                    house: (i + 1) as u8,
                    longitude: *cusp,
                    sign: placement.sign,
                    degree: placement.degree,
                }
            })
            .collect();

        let ascendant = Placement::from_longitude(frame.ascendant);
        let (elements, modalities) = tally(&bodies, &ascendant);

        ChartResult {
            schema_version: SCHEMA_VERSION,
            name: input.name.clone(),
            julian_day: jd,
            house_system: frame.system,
            aspects: self.aspects.compute_aspects(positions),
            bodies,
            houses,
            ascendant,
            midheaven: Placement::from_longitude(frame.midheaven),
            descendant: Placement::from_longitude(frame.descendant()),
            imum_coeli: Placement::from_longitude(frame.imum_coeli()),
            elements,
            modalities,
        }
    }
}

/// Element and modality counts over the personal bodies plus the Ascendant.
pub fn tally(bodies: &[PlacedBody], ascendant: &Placement) -> (ElementTally, ModalityTally) {
    let mut elements = ElementTally::default();
    let mut modalities = ModalityTally::default();

    let signs = bodies
        .iter()
        .filter(|placed| PERSONAL_BODIES.contains(&placed.body))
        .map(|placed| placed.sign)
        .chain(std::iter::once(ascendant.sign));
    for sign in signs {
        elements.add(sign.element());
        modalities.add(sign.modality());
    }
    (elements, modalities)
}

/// One-shot chart with the analytic ephemeris and default settings.
pub fn compute_chart(input: &BirthInput) -> Result<ChartResult, EngineError> {
    ChartEngine::<AnalyticEphemeris>::default().compute(input)
}
