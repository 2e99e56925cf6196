//! Six-fold planetary strength (Shadbala) for the sapta grahas.

pub mod components;
pub mod types;

pub use types::{
    KalaDetail, ShadbalaReport, ShadbalaRequest, SthanaDetail, StrengthBreakdown, StrengthComponents,
    StrengthRating,
};

use crate::aspects::{AspectCalculator, OrbTable};
use crate::chart::{NatalChart, Planet, SAPTA_GRAHAS};
use crate::config::RequiredStrengthTable;
use crate::error::{EngineError, EngineResult};
use chrono::{DateTime, Utc};
use components::DayPhase;
use std::collections::BTreeMap;

/// Computes Shadbala for a chart at a reference moment.
///
/// The engine holds only configuration; `compute` never mutates its inputs and
/// returns the same report for the same chart and moment.
#[derive(Debug, Clone, Default)]
pub struct ShadbalaEngine {
    required: RequiredStrengthTable,
    calculator: AspectCalculator,
}

impl ShadbalaEngine {
    pub fn new(required: RequiredStrengthTable, orbs: OrbTable) -> EngineResult<Self> {
        required.validate()?;
        orbs.validate()?;
        Ok(Self {
            required,
            calculator: AspectCalculator::new(orbs),
        })
    }

    pub fn from_config(config: &crate::config::EngineConfig) -> EngineResult<Self> {
        Self::new(config.shadbala.required_rupas.clone(), config.orbs.clone())
    }

    pub fn compute(&self, chart: &NatalChart, reference_datetime: DateTime<Utc>) -> EngineResult<ShadbalaReport> {
        chart.validate_sapta_grahas().map_err(|e| match e {
            EngineError::MissingPlanet { planet } => {
                EngineError::invalid_chart(format!("chart is missing {}", planet))
            }
            other => other,
        })?;
        log::debug!(
            "Computing shadbala for {} planets at {}",
            chart.planets.len(),
            reference_datetime
        );

        let elongation = chart.lunar_elongation()?;
        // Day, night and weekday all follow the reference moment
        let phase = DayPhase::at(reference_datetime, &chart.location);
        let weekday = components::vedic_weekday(reference_datetime, &chart.location);

        let mut planets = BTreeMap::new();
        for planet in SAPTA_GRAHAS {
            let breakdown = self.breakdown(chart, planet, phase, weekday, elongation)?;
            planets.insert(planet, breakdown);
        }

        let ranking_key = |b: &StrengthBreakdown| (b.percent_of_required, components::naisargika_bala(b.planet));
        let compare = |a: &&StrengthBreakdown, b: &&StrengthBreakdown| {
            let (ka, kb) = (ranking_key(*a), ranking_key(*b));
            ka.0.total_cmp(&kb.0).then(ka.1.total_cmp(&kb.1))
        };
        let strongest = planets
            .values()
            .max_by(compare)
            .map(|b| b.planet)
            .ok_or_else(|| EngineError::invalid_chart("no planets to rank"))?;
        let weakest = planets
            .values()
            .min_by(compare)
            .map(|b| b.planet)
            .ok_or_else(|| EngineError::invalid_chart("no planets to rank"))?;
        let average_percent =
            planets.values().map(|b| b.percent_of_required).sum::<f64>() / planets.len() as f64;

        Ok(ShadbalaReport {
            reference_datetime,
            planets,
            strongest,
            weakest,
            average_percent,
        })
    }

    pub fn compute_request(&self, request: &ShadbalaRequest) -> EngineResult<ShadbalaReport> {
        self.compute(&request.natal_chart, request.reference_datetime)
    }

    fn breakdown(
        &self,
        chart: &NatalChart,
        planet: Planet,
        phase: DayPhase,
        weekday: chrono::Weekday,
        elongation: f64,
    ) -> EngineResult<StrengthBreakdown> {
        let position = chart.position(planet)?;
        let house = chart.house_of(position.longitude);

        let sthana_detail = components::sthana_bala(planet, position.longitude, house);
        let kala_detail = components::kala_bala(planet, phase, weekday, elongation);
        let strength = StrengthComponents {
            sthana: sthana_detail.total,
            dig: components::dig_bala(planet, house),
            kala: kala_detail.total,
            chesta: components::chesta_bala(planet, position.speed),
            naisargika: components::naisargika_bala(planet),
            drik: components::drik_bala(planet, chart, &self.calculator, elongation),
        };

        let required_rupas = self
            .required
            .required_rupas(planet)
            .ok_or_else(|| EngineError::invalid_config(format!("required rupas missing for {}", planet)))?;
        let total = strength.total();
        let total_rupas = total / 60.0;
        let percent_of_required = total_rupas / required_rupas * 100.0;

        Ok(StrengthBreakdown {
            planet,
            components: strength,
            total,
            total_rupas,
            required_rupas,
            percent_of_required,
            rating: StrengthRating::from_percent(percent_of_required),
            house,
            sthana_detail,
            kala_detail,
        })
    }
}
