pub mod data;
pub mod planet;

pub use data::{Location, NatalChart, PlanetPosition};
pub use planet::{Planet, UnknownPlanet, ALL_PLANETS, SAPTA_GRAHAS};
