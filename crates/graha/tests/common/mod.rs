#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use graha::geometry::equal_house_cusps;
use graha::{Location, NatalChart, Planet, PlanetPosition};

pub fn delhi() -> Location {
    Location::new(28.6139, 77.2090, 330)
}

pub fn birth_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1990, 1, 9, 23, 0, 0).unwrap()
}

pub fn sapta_positions() -> Vec<PlanetPosition> {
    vec![
        PlanetPosition::new(Planet::Sun, 275.0, 1.019),
        PlanetPosition::new(Planet::Moon, 45.0, 13.2),
        PlanetPosition::new(Planet::Mars, 300.0, 0.70),
        PlanetPosition::new(Planet::Mercury, 265.0, 1.30),
        PlanetPosition::new(Planet::Jupiter, 95.0, -0.10),
        PlanetPosition::new(Planet::Venus, 310.0, 1.20),
        PlanetPosition::new(Planet::Saturn, 290.0, 0.11),
    ]
}

/// Night birth (04:30 in Delhi), ascendant 10° Cancer.
pub fn sample_chart() -> NatalChart {
    let mut positions = sapta_positions();
    positions.push(PlanetPosition::new(Planet::Rahu, 300.0, -0.053));
    positions.push(PlanetPosition::new(Planet::Ketu, 120.0, -0.053));
    NatalChart::new(100.0, positions, equal_house_cusps(100.0), birth_time(), delhi())
}

/// Same sky without the lunar nodes.
pub fn sapta_chart() -> NatalChart {
    NatalChart::new(100.0, sapta_positions(), equal_house_cusps(100.0), birth_time(), delhi())
}

pub fn natal_at(positions: &[(Planet, f64)]) -> NatalChart {
    NatalChart::new(
        0.0,
        positions.iter().map(|(planet, lon)| PlanetPosition::new(*planet, *lon, 0.0)),
        equal_house_cusps(0.0),
        birth_time(),
        delhi(),
    )
}
