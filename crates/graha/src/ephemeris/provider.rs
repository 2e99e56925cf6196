use crate::chart::{Location, NatalChart, Planet, PlanetPosition};
use crate::error::EngineResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Builds a natal chart for a birth moment and place.
///
/// Rectification calls this once per birth-time candidate, concurrently, so
/// implementations must be shareable across tasks.
#[async_trait]
pub trait ChartProvider: Send + Sync {
    async fn chart_at(&self, birth_datetime: DateTime<Utc>, location: &Location) -> EngineResult<NatalChart>;
}

/// Position of one planet at an arbitrary moment, used to sample motion
/// forward when forecasting sign changes.
pub trait EphemerisProvider: Send + Sync {
    fn position_at(&self, planet: Planet, datetime: DateTime<Utc>) -> EngineResult<PlanetPosition>;
}
