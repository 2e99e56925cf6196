//! Transit analysis: aspects from transiting to natal planets, natal-house
//! placement of each transiting planet, and upcoming sign changes.

pub mod forecast;
pub mod types;

pub use types::{
    HouseTransit, MotionDirection, SignChangeEvent, TransitPlanet, TransitReport, TransitRequest,
};

use crate::aspects::{AspectCalculator, OrbTable};
use crate::chart::{NatalChart, Planet, PlanetPosition};
use crate::config::{EngineConfig, TransitConfig};
use crate::ephemeris::{EphemerisProvider, LinearEphemeris};
use crate::error::{EngineError, EngineResult};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct TransitEngine {
    calculator: AspectCalculator,
    config: TransitConfig,
}

impl TransitEngine {
    pub fn new(orbs: OrbTable, config: TransitConfig) -> EngineResult<Self> {
        orbs.validate()?;
        config.validate()?;
        Ok(Self {
            calculator: AspectCalculator::new(orbs),
            config,
        })
    }

    pub fn from_config(config: &EngineConfig) -> EngineResult<Self> {
        Self::new(config.orbs.clone(), config.transit.clone())
    }

    pub fn default_horizon_days(&self) -> i64 {
        self.config.default_horizon_days
    }

    /// Transit report, forecasting sign changes by extrapolating each transit
    /// position at its recorded speed.
    pub fn compute(
        &self,
        natal: &NatalChart,
        transit_datetime: DateTime<Utc>,
        transit_positions: &[PlanetPosition],
        horizon_days: Option<i64>,
    ) -> EngineResult<TransitReport> {
        let ephemeris = LinearEphemeris::from_positions(transit_datetime, transit_positions.iter().cloned());
        self.compute_with_ephemeris(natal, transit_datetime, transit_positions, horizon_days, &ephemeris)
    }

    /// Transit report with sign changes sampled from the given ephemeris.
    pub fn compute_with_ephemeris(
        &self,
        natal: &NatalChart,
        transit_datetime: DateTime<Utc>,
        transit_positions: &[PlanetPosition],
        horizon_days: Option<i64>,
        ephemeris: &dyn EphemerisProvider,
    ) -> EngineResult<TransitReport> {
        let horizon_days = horizon_days.unwrap_or(self.config.default_horizon_days);
        if horizon_days <= 0 || horizon_days > self.config.max_horizon_days {
            return Err(EngineError::OutOfRangeHorizon {
                horizon_days,
                max_days: self.config.max_horizon_days,
            });
        }
        natal.validate(&[])?;
        let transit = index_positions(transit_positions)?;
        log::debug!(
            "Computing transits of {} planets against {} natal planets, horizon {} days",
            transit.len(),
            natal.planets.len(),
            horizon_days
        );

        let mut significant_aspects = self.calculator.aspects_between(&transit, &natal.planets);
        significant_aspects.sort_by(|a, b| {
            a.orb
                .total_cmp(&b.orb)
                .then(a.transit_planet.cmp(&b.transit_planet))
                .then(a.natal_planet.cmp(&b.natal_planet))
        });

        let mut transit_planets = BTreeMap::new();
        let mut house_transits = Vec::with_capacity(transit.len());
        for (planet, position) in &transit {
            let house = natal.house_of(position.longitude);
            house_transits.push(HouseTransit {
                planet: *planet,
                house,
                sign: position.sign,
            });
            transit_planets.insert(
                *planet,
                TransitPlanet {
                    position: position.clone(),
                    natal_house: house,
                },
            );
        }

        let upcoming_sign_changes = forecast::forecast_sign_changes(
            ephemeris,
            transit.keys().copied(),
            transit_datetime,
            horizon_days,
            &self.config,
        )?;

        Ok(TransitReport {
            transit_datetime,
            horizon_days,
            transit_planets,
            significant_aspects,
            house_transits,
            upcoming_sign_changes,
        })
    }

    pub fn compute_request(&self, request: &TransitRequest) -> EngineResult<TransitReport> {
        self.compute(
            &request.natal_chart,
            request.transit_datetime,
            &request.transit_positions,
            request.horizon_days,
        )
    }
}

fn index_positions(positions: &[PlanetPosition]) -> EngineResult<BTreeMap<Planet, PlanetPosition>> {
    let mut indexed = BTreeMap::new();
    for position in positions {
        if !position.is_finite() {
            return Err(EngineError::invalid_chart(format!(
                "transit position for {} is not finite",
                position.planet
            )));
        }
        if indexed.insert(position.planet, position.clone()).is_some() {
            return Err(EngineError::invalid_chart(format!(
                "transit position for {} given twice",
                position.planet
            )));
        }
    }
    Ok(indexed)
}
