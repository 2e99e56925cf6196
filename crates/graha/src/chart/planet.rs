use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The nine grahas.
///
/// Ordering follows the traditional weekday sequence followed by the lunar nodes,
/// which is also the iteration order of every per-planet map in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Planet {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    Rahu,
    Ketu,
}

pub const ALL_PLANETS: [Planet; 9] = [
    Planet::Sun,
    Planet::Moon,
    Planet::Mars,
    Planet::Mercury,
    Planet::Jupiter,
    Planet::Venus,
    Planet::Saturn,
    Planet::Rahu,
    Planet::Ketu,
];

/// The seven classical grahas, excluding the lunar nodes.
pub const SAPTA_GRAHAS: [Planet; 7] = [
    Planet::Sun,
    Planet::Moon,
    Planet::Mars,
    Planet::Mercury,
    Planet::Jupiter,
    Planet::Venus,
    Planet::Saturn,
];

impl Planet {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "sun",
            Self::Moon => "moon",
            Self::Mars => "mars",
            Self::Mercury => "mercury",
            Self::Jupiter => "jupiter",
            Self::Venus => "venus",
            Self::Saturn => "saturn",
            Self::Rahu => "rahu",
            Self::Ketu => "ketu",
        }
    }

    /// 0-based index into [`ALL_PLANETS`].
    pub const fn index(self) -> usize {
        match self {
            Self::Sun => 0,
            Self::Moon => 1,
            Self::Mars => 2,
            Self::Mercury => 3,
            Self::Jupiter => 4,
            Self::Venus => 5,
            Self::Saturn => 6,
            Self::Rahu => 7,
            Self::Ketu => 8,
        }
    }

    pub const fn is_node(self) -> bool {
        matches!(self, Self::Rahu | Self::Ketu)
    }

    pub const fn is_luminary(self) -> bool {
        matches!(self, Self::Sun | Self::Moon)
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPlanet(pub String);

impl fmt::Display for UnknownPlanet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown planet '{}'", self.0)
    }
}

impl std::error::Error for UnknownPlanet {}

impl FromStr for Planet {
    type Err = UnknownPlanet;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ALL_PLANETS
            .iter()
            .copied()
            .find(|planet| planet.name() == lower)
            .ok_or(UnknownPlanet(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planet_round_trips_through_name() {
        for planet in ALL_PLANETS {
            assert_eq!(planet.name().parse::<Planet>(), Ok(planet));
            assert_eq!(ALL_PLANETS[planet.index()], planet);
        }
        assert!("Pluto".parse::<Planet>().is_err());
        assert_eq!("  Venus ".parse::<Planet>(), Ok(Planet::Venus));
    }
}
