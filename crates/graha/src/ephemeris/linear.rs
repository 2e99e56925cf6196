use crate::chart::{Location, NatalChart, Planet, PlanetPosition};
use crate::ephemeris::provider::{ChartProvider, EphemerisProvider};
use crate::error::{EngineError, EngineResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Mean rotation of the ascendant and house cusps, in degrees per day.
pub const SIDEREAL_ROTATION_DEG_PER_DAY: f64 = 360.985_647_366_29;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// A linearised sky anchored on one chart.
///
/// Planets advance at their recorded daily speed, the ascendant and cusps turn
/// at the sidereal rate. Stations are not modelled, so this is only accurate
/// over spans short relative to each planet's synodic period.
#[derive(Debug, Clone)]
pub struct LinearEphemeris {
    epoch: DateTime<Utc>,
    ascendant: f64,
    cusps: [f64; 12],
    planets: BTreeMap<Planet, PlanetPosition>,
}

impl LinearEphemeris {
    /// Anchor on a full chart; its birth time is the epoch.
    pub fn from_chart(chart: &NatalChart) -> Self {
        Self {
            epoch: chart.birth_time,
            ascendant: chart.ascendant,
            cusps: chart.cusps,
            planets: chart.planets.clone(),
        }
    }

    /// Anchor on bare planet positions at an epoch; houses are unused.
    pub fn from_positions(epoch: DateTime<Utc>, positions: impl IntoIterator<Item = PlanetPosition>) -> Self {
        Self {
            epoch,
            ascendant: 0.0,
            cusps: [0.0; 12],
            planets: positions.into_iter().map(|p| (p.planet, p)).collect(),
        }
    }

    pub fn epoch(&self) -> DateTime<Utc> {
        self.epoch
    }

    fn days_since_epoch(&self, datetime: DateTime<Utc>) -> f64 {
        (datetime - self.epoch).num_milliseconds() as f64 / MILLIS_PER_DAY
    }

    /// Chart at another moment from the anchored sky.
    pub fn chart_at_sync(&self, birth_datetime: DateTime<Utc>, location: &Location) -> EngineResult<NatalChart> {
        let days = self.days_since_epoch(birth_datetime);
        let rotation = SIDEREAL_ROTATION_DEG_PER_DAY * days;
        let positions = self
            .planets
            .keys()
            .map(|planet| self.position_at(*planet, birth_datetime))
            .collect::<EngineResult<Vec<_>>>()?;
        Ok(NatalChart::new(
            self.ascendant + rotation,
            positions,
            self.cusps.map(|c| c + rotation),
            birth_datetime,
            *location,
        ))
    }
}

impl EphemerisProvider for LinearEphemeris {
    fn position_at(&self, planet: Planet, datetime: DateTime<Utc>) -> EngineResult<PlanetPosition> {
        let anchor = self
            .planets
            .get(&planet)
            .ok_or(EngineError::MissingPlanet { planet })?;
        let days = self.days_since_epoch(datetime);
        let mut position = PlanetPosition::new(planet, anchor.longitude + anchor.speed * days, anchor.speed);
        position.retrograde = anchor.retrograde;
        Ok(position)
    }
}

#[async_trait]
impl ChartProvider for LinearEphemeris {
    async fn chart_at(&self, birth_datetime: DateTime<Utc>, location: &Location) -> EngineResult<NatalChart> {
        self.chart_at_sync(birth_datetime, location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::equal_house_cusps;
    use approx::assert_abs_diff_eq;
    use chrono::{Duration, TimeZone};

    fn anchor() -> NatalChart {
        NatalChart::new(
            0.0,
            vec![
                PlanetPosition::new(Planet::Sun, 100.0, 1.0),
                PlanetPosition::new(Planet::Rahu, 50.0, -0.053),
            ],
            equal_house_cusps(0.0),
            Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap(),
            Location::new(0.0, 0.0, 0),
        )
    }

    #[test]
    fn test_planets_advance_linearly() {
        let eph = LinearEphemeris::from_chart(&anchor());
        let later = eph.epoch() + Duration::days(10);
        let sun = eph.position_at(Planet::Sun, later).unwrap();
        assert_abs_diff_eq!(sun.longitude, 110.0, epsilon = 1e-9);
        let rahu = eph.position_at(Planet::Rahu, later).unwrap();
        assert_abs_diff_eq!(rahu.longitude, 49.47, epsilon = 1e-9);
        assert!(rahu.retrograde);
    }

    #[test]
    fn test_ascendant_rotates_with_time() {
        let eph = LinearEphemeris::from_chart(&anchor());
        let later = eph.epoch() + Duration::minutes(4);
        let chart = eph.chart_at_sync(later, &Location::new(0.0, 0.0, 0)).unwrap();
        // Four minutes turn the ascendant by about one degree
        assert_abs_diff_eq!(chart.ascendant, 1.0027, epsilon = 1e-3);
        assert_abs_diff_eq!(chart.cusps[3], 91.0027, epsilon = 1e-3);
        assert_eq!(chart.birth_time, later);
    }

    #[test]
    fn test_missing_planet_is_reported() {
        let eph = LinearEphemeris::from_chart(&anchor());
        let err = eph.position_at(Planet::Moon, eph.epoch()).unwrap_err();
        assert_eq!(err, EngineError::MissingPlanet { planet: Planet::Moon });
    }
}
