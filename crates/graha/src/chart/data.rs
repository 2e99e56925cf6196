use crate::chart::planet::{Planet, SAPTA_GRAHAS};
use crate::error::{EngineError, EngineResult};
use crate::geometry::{degree_in_sign, house_of, normalize_degrees, sign_of};
use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Geographic location of a chart, with the civil UTC offset in force.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
    /// Civil offset from UTC in minutes (e.g. 330 for IST).
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl Location {
    pub fn new(lat: f64, lon: f64, utc_offset_minutes: i32) -> Self {
        Self {
            lat,
            lon,
            utc_offset_minutes,
        }
    }

    /// Fixed offset for local-time conversions; falls back to UTC when the
    /// stored offset is outside chrono's ±24 h range.
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60)).unwrap_or(Utc.fix())
    }
}

/// A planet's position at one instant.
///
/// Built through [`PlanetPosition::new`], which normalizes the longitude and
/// derives sign, degree and retrograde state; deserialization goes through the
/// same constructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPlanetPosition")]
pub struct PlanetPosition {
    pub planet: Planet,
    /// Longitude in degrees (0-360)
    pub longitude: f64,
    /// Sign index (0 = Aries)
    pub sign: u8,
    pub degree_in_sign: f64,
    pub retrograde: bool,
    /// Speed in longitude (degrees per day)
    pub speed: f64,
}

#[derive(Deserialize)]
struct RawPlanetPosition {
    planet: Planet,
    longitude: f64,
    #[serde(default)]
    speed: f64,
    #[serde(default)]
    retrograde: Option<bool>,
}

impl From<RawPlanetPosition> for PlanetPosition {
    fn from(raw: RawPlanetPosition) -> Self {
        let mut position = PlanetPosition::new(raw.planet, raw.longitude, raw.speed);
        if let Some(retrograde) = raw.retrograde {
            position.retrograde = retrograde;
        }
        position
    }
}

impl PlanetPosition {
    pub fn new(planet: Planet, longitude: f64, speed: f64) -> Self {
        let lon = normalize_degrees(longitude);
        Self {
            planet,
            longitude: lon,
            sign: sign_of(lon),
            degree_in_sign: degree_in_sign(lon),
            retrograde: speed < 0.0,
            speed,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.longitude.is_finite() && self.speed.is_finite()
    }
}

/// The fixed set of positions and house cusps at a birth moment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NatalChart {
    pub ascendant: f64,
    pub planets: BTreeMap<Planet, PlanetPosition>,
    /// House cusps 1..12, in order
    pub cusps: [f64; 12],
    pub birth_time: DateTime<Utc>,
    pub location: Location,
}

impl NatalChart {
    pub fn new(
        ascendant: f64,
        positions: impl IntoIterator<Item = PlanetPosition>,
        cusps: [f64; 12],
        birth_time: DateTime<Utc>,
        location: Location,
    ) -> Self {
        Self {
            ascendant: normalize_degrees(ascendant),
            planets: positions.into_iter().map(|p| (p.planet, p)).collect(),
            cusps: cusps.map(normalize_degrees),
            birth_time,
            location,
        }
    }

    pub fn position(&self, planet: Planet) -> EngineResult<&PlanetPosition> {
        self.planets
            .get(&planet)
            .ok_or(EngineError::MissingPlanet { planet })
    }

    /// House (1..=12) of a longitude against this chart's cusps.
    pub fn house_of(&self, longitude: f64) -> u8 {
        house_of(longitude, &self.cusps)
    }

    /// House occupied by a planet of this chart.
    pub fn house_of_planet(&self, planet: Planet) -> EngineResult<u8> {
        Ok(self.house_of(self.position(planet)?.longitude))
    }

    /// Sign on the cusp of a house (1..=12).
    pub fn cusp_sign(&self, house: u8) -> u8 {
        let index = usize::from(house.clamp(1, 12) - 1);
        sign_of(self.cusps[index])
    }

    /// Checks that all numbers are finite and, when `required` is given,
    /// that each listed planet is present.
    pub fn validate(&self, required: &[Planet]) -> EngineResult<()> {
        if !self.ascendant.is_finite() {
            return Err(EngineError::invalid_chart("ascendant is not a finite number"));
        }
        if let Some(index) = self.cusps.iter().position(|c| !c.is_finite()) {
            return Err(EngineError::invalid_chart(format!(
                "cusp {} is not a finite number",
                index + 1
            )));
        }
        for (planet, position) in &self.planets {
            if position.planet != *planet {
                return Err(EngineError::invalid_chart(format!(
                    "position keyed as {} describes {}",
                    planet, position.planet
                )));
            }
            if !position.is_finite() {
                return Err(EngineError::invalid_chart(format!(
                    "{} has a non-finite longitude or speed",
                    planet
                )));
            }
        }
        for planet in required {
            self.position(*planet)?;
        }
        Ok(())
    }

    pub fn validate_sapta_grahas(&self) -> EngineResult<()> {
        self.validate(&SAPTA_GRAHAS)
    }

    /// Moon-Sun elongation in [0, 360); below 180 the Moon is waxing.
    pub fn lunar_elongation(&self) -> EngineResult<f64> {
        let moon = self.position(Planet::Moon)?;
        let sun = self.position(Planet::Sun)?;
        Ok(normalize_degrees(moon.longitude - sun.longitude))
    }
}
