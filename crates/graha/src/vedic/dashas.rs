//! Vimshottari dasha lookup.
//!
//! Dashas are time periods ruled by planets, seeded from the Moon's nakshatra
//! at birth. Only the lords active at one date are resolved here; building a
//! full timeline is left to dedicated dasha services.

use crate::chart::{NatalChart, Planet};
use crate::error::{EngineError, EngineResult};
use crate::vedic::nakshatra::nakshatra_of;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const VIMSHOTTARI_TOTAL_YEARS: f64 = 120.0;
pub const VIMSHOTTARI_YEAR_DAYS: f64 = 365.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashaLevel {
    Mahadasha,
    Antardasha,
    Pratyantardasha,
}

pub const DEPTH_LEVELS: [DashaLevel; 3] = [
    DashaLevel::Mahadasha,
    DashaLevel::Antardasha,
    DashaLevel::Pratyantardasha,
];

const VIMSHOTTARI_SEQUENCE: [(Planet, f64); 9] = [
    (Planet::Ketu, 7.0),
    (Planet::Venus, 20.0),
    (Planet::Sun, 6.0),
    (Planet::Moon, 10.0),
    (Planet::Mars, 7.0),
    (Planet::Rahu, 18.0),
    (Planet::Jupiter, 16.0),
    (Planet::Saturn, 19.0),
    (Planet::Mercury, 17.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashaLord {
    pub level: DashaLevel,
    pub planet: Planet,
}

/// Lords ruling each dasha level at one date, outermost first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveDasha {
    pub date: DateTime<Utc>,
    pub lords: Vec<DashaLord>,
}

impl ActiveDasha {
    pub fn lord(&self, level: DashaLevel) -> Option<Planet> {
        self.lords.iter().find(|l| l.level == level).map(|l| l.planet)
    }
}

/// Resolves the dasha lords active for a chart at a date.
#[async_trait]
pub trait DashaProvider: Send + Sync {
    async fn active_lords(&self, chart: &NatalChart, date: DateTime<Utc>) -> EngineResult<ActiveDasha>;
}

fn sequence_index(planet: Planet) -> EngineResult<usize> {
    VIMSHOTTARI_SEQUENCE
        .iter()
        .position(|(p, _)| *p == planet)
        .ok_or_else(|| EngineError::provider(format!("{} has no vimshottari period", planet)))
}

/// Locate the sub-period containing `elapsed` years of a period of
/// `span_years` whose sub-sequence starts at `start_index`.
///
/// Returns the sub-period's sequence index, the years elapsed inside it and
/// its own length in years.
fn locate(start_index: usize, span_years: f64, elapsed: f64) -> (usize, f64, f64) {
    let mut remaining = elapsed;
    let mut last = (start_index, 0.0, 0.0);
    for offset in 0..VIMSHOTTARI_SEQUENCE.len() {
        let index = (start_index + offset) % VIMSHOTTARI_SEQUENCE.len();
        let length = span_years * VIMSHOTTARI_SEQUENCE[index].1 / VIMSHOTTARI_TOTAL_YEARS;
        if remaining < length {
            return (index, remaining.max(0.0), length);
        }
        remaining -= length;
        last = (index, length, length);
    }
    // Rounding at the very end of the span
    last
}

/// Vimshottari lords (maha, antar, pratyantar) active at `date`.
pub fn vimshottari_active_lords(moon_longitude: f64, birth: DateTime<Utc>, date: DateTime<Utc>) -> EngineResult<ActiveDasha> {
    let moon = nakshatra_of(moon_longitude);
    let first = sequence_index(moon.record.lord)?;
    let first_years = VIMSHOTTARI_SEQUENCE[first].1;

    // Years since the (pre-birth) start of the birth mahadasha
    let since_birth = (date - birth).num_milliseconds() as f64 / 86_400_000.0 / VIMSHOTTARI_YEAR_DAYS;
    let elapsed = first_years * moon.progress + since_birth;
    if elapsed < 0.0 {
        return Err(EngineError::provider(format!(
            "date {} precedes the birth dasha",
            date
        )));
    }
    let elapsed = elapsed % VIMSHOTTARI_TOTAL_YEARS;

    let (maha, maha_elapsed, maha_years) = locate(first, VIMSHOTTARI_TOTAL_YEARS, elapsed);
    let (antar, antar_elapsed, antar_years) = locate(maha, maha_years, maha_elapsed);
    let (pratyantar, _, _) = locate(antar, antar_years, antar_elapsed);

    let lords = DEPTH_LEVELS
        .iter()
        .zip([maha, antar, pratyantar])
        .map(|(level, index)| DashaLord {
            level: *level,
            planet: VIMSHOTTARI_SEQUENCE[index].0,
        })
        .collect();
    Ok(ActiveDasha { date, lords })
}

/// Reference [`DashaProvider`] computing Vimshottari lords from the chart's Moon.
#[derive(Debug, Clone, Copy, Default)]
pub struct VimshottariDashaProvider;

impl VimshottariDashaProvider {
    pub fn new() -> Self {
        Self
    }

    pub fn active_lords_sync(&self, chart: &NatalChart, date: DateTime<Utc>) -> EngineResult<ActiveDasha> {
        let moon = chart.position(Planet::Moon)?;
        vimshottari_active_lords(moon.longitude, chart.birth_time, date)
    }
}

#[async_trait]
impl DashaProvider for VimshottariDashaProvider {
    async fn active_lords(&self, chart: &NatalChart, date: DateTime<Utc>) -> EngineResult<ActiveDasha> {
        self.active_lords_sync(chart, date)
    }
}
