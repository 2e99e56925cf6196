use crate::aspects::Aspect;
use crate::chart::{NatalChart, Planet, PlanetPosition};
use crate::geometry::sign_name;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionDirection {
    Direct,
    Retrograde,
}

/// A planet crossing a sign boundary within the forecast horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignChangeEvent {
    pub planet: Planet,
    pub from_sign: u8,
    pub to_sign: u8,
    pub crossing_time: DateTime<Utc>,
    pub direction: MotionDirection,
}

impl SignChangeEvent {
    pub fn from_sign_name(&self) -> &'static str {
        sign_name(self.from_sign)
    }

    pub fn to_sign_name(&self) -> &'static str {
        sign_name(self.to_sign)
    }

    /// The reverse crossing of the same boundary.
    pub fn reverses(&self, other: &SignChangeEvent) -> bool {
        self.planet == other.planet
            && self.from_sign == other.to_sign
            && self.to_sign == other.from_sign
            && self.direction != other.direction
    }
}

/// A transiting planet with the natal house it currently occupies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitPlanet {
    pub position: PlanetPosition,
    pub natal_house: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseTransit {
    pub planet: Planet,
    pub house: u8,
    pub sign: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitReport {
    pub transit_datetime: DateTime<Utc>,
    pub horizon_days: i64,
    pub transit_planets: BTreeMap<Planet, TransitPlanet>,
    /// Sorted by orb, tightest first
    pub significant_aspects: Vec<Aspect>,
    pub house_transits: Vec<HouseTransit>,
    /// Sorted by crossing time
    pub upcoming_sign_changes: Vec<SignChangeEvent>,
}

/// JSON request shape for a transit computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitRequest {
    pub natal_chart: NatalChart,
    pub transit_datetime: DateTime<Utc>,
    pub transit_positions: Vec<PlanetPosition>,
    #[serde(default)]
    pub horizon_days: Option<i64>,
}
