//! Engine configuration.
//!
//! Every section deserializes with defaults for missing keys, so an empty
//! document yields [`EngineConfig::default`]. Call [`EngineConfig::validate`]
//! before handing a loaded config to an engine.

use crate::aspects::OrbTable;
use crate::chart::{Planet, SAPTA_GRAHAS};
use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub orbs: OrbTable,
    pub shadbala: ShadbalaConfig,
    pub transit: TransitConfig,
    pub rectification: RectificationConfig,
}

impl EngineConfig {
    pub fn validate(&self) -> EngineResult<()> {
        self.orbs.validate()?;
        self.shadbala.required_rupas.validate()?;
        self.transit.validate()?;
        self.rectification.validate()?;
        Ok(())
    }
}

/// Minimum strength, in rupas, each sapta graha needs to count as adequate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequiredStrengthTable(BTreeMap<Planet, f64>);

impl Default for RequiredStrengthTable {
    fn default() -> Self {
        Self(BTreeMap::from([
            (Planet::Sun, 6.5),
            (Planet::Moon, 6.0),
            (Planet::Mars, 5.0),
            (Planet::Mercury, 7.0),
            (Planet::Jupiter, 6.5),
            (Planet::Venus, 5.5),
            (Planet::Saturn, 5.0),
        ]))
    }
}

impl RequiredStrengthTable {
    pub fn new(entries: impl IntoIterator<Item = (Planet, f64)>) -> Self {
        Self(entries.into_iter().collect())
    }

    pub fn required_rupas(&self, planet: Planet) -> Option<f64> {
        self.0.get(&planet).copied()
    }

    pub fn validate(&self) -> EngineResult<()> {
        for planet in SAPTA_GRAHAS {
            match self.required_rupas(planet) {
                Some(value) if value.is_finite() && value > 0.0 => {}
                Some(value) => {
                    return Err(EngineError::invalid_config(format!(
                        "required rupas for {} must be positive, got {}",
                        planet, value
                    )))
                }
                None => {
                    return Err(EngineError::invalid_config(format!(
                        "required rupas missing for {}",
                        planet
                    )))
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadbalaConfig {
    pub required_rupas: RequiredStrengthTable,
}

/// Sampling intervals for the sign-change forecast, in hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingHours {
    pub moon: f64,
    /// Sun, Mercury, Venus and Mars
    pub inner: f64,
    /// Jupiter, Saturn and the lunar nodes
    pub outer: f64,
}

impl Default for SamplingHours {
    fn default() -> Self {
        Self {
            moon: 6.0,
            inner: 24.0,
            outer: 48.0,
        }
    }
}

impl SamplingHours {
    /// Longest intervals that keep one sample's motion well inside a sign, so
    /// no boundary crossing is aliased: 24 h for the Moon, 10 days for the
    /// inner planets and 30 days for the slow movers.
    pub const MAX_MOON: f64 = 24.0;
    pub const MAX_INNER: f64 = 240.0;
    pub const MAX_OUTER: f64 = 720.0;

    pub fn for_planet(&self, planet: Planet) -> f64 {
        match planet {
            Planet::Moon => self.moon,
            Planet::Sun | Planet::Mercury | Planet::Venus | Planet::Mars => self.inner,
            Planet::Jupiter | Planet::Saturn | Planet::Rahu | Planet::Ketu => self.outer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitConfig {
    pub default_horizon_days: i64,
    pub max_horizon_days: i64,
    pub sampling_hours: SamplingHours,
    /// Opposite crossings of one boundary closer than this are dropped as noise.
    pub oscillation_window_hours: f64,
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            default_horizon_days: 30,
            max_horizon_days: 3650,
            sampling_hours: SamplingHours::default(),
            oscillation_window_hours: 12.0,
        }
    }
}

impl TransitConfig {
    pub fn validate(&self) -> EngineResult<()> {
        if self.max_horizon_days <= 0 {
            return Err(EngineError::invalid_config("transit.max_horizon_days must be positive"));
        }
        if self.default_horizon_days <= 0 || self.default_horizon_days > self.max_horizon_days {
            return Err(EngineError::invalid_config(format!(
                "transit.default_horizon_days must be in 1..={}",
                self.max_horizon_days
            )));
        }
        let hours = &self.sampling_hours;
        for (name, value, max) in [
            ("moon", hours.moon, SamplingHours::MAX_MOON),
            ("inner", hours.inner, SamplingHours::MAX_INNER),
            ("outer", hours.outer, SamplingHours::MAX_OUTER),
        ] {
            if !value.is_finite() || value <= 0.0 || value > max {
                return Err(EngineError::invalid_config(format!(
                    "transit.sampling_hours.{} must be in (0, {}], got {}",
                    name, max, value
                )));
            }
        }
        if !self.oscillation_window_hours.is_finite() || self.oscillation_window_hours < 0.0 {
            return Err(EngineError::invalid_config(
                "transit.oscillation_window_hours must be zero or positive",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectificationConfig {
    pub step_minutes: u32,
    pub min_window_minutes: u32,
    pub max_window_minutes: u32,
    /// Ceiling on candidates × anchors evaluated in one request.
    pub max_evaluations: usize,
    pub max_concurrency: usize,
    /// Wall-clock budget for a whole request; unbounded when absent.
    pub time_budget_ms: Option<u64>,
    /// Confidence one perfectly matching anchor of full significance adds;
    /// matches compound as 1 - Π(1 - e·s·c).
    pub evidence_per_anchor: f64,
}

impl Default for RectificationConfig {
    fn default() -> Self {
        Self {
            step_minutes: 2,
            min_window_minutes: 5,
            max_window_minutes: 120,
            max_evaluations: 10_000,
            max_concurrency: 8,
            time_budget_ms: None,
            evidence_per_anchor: 0.15,
        }
    }
}

impl RectificationConfig {
    /// Upper bound for both the window and the step, one day either side.
    pub const WINDOW_LIMIT_MINUTES: u32 = 1440;

    pub fn validate(&self) -> EngineResult<()> {
        if self.step_minutes == 0 || self.step_minutes > Self::WINDOW_LIMIT_MINUTES {
            return Err(EngineError::invalid_config(format!(
                "rectification.step_minutes must be in 1..={}",
                Self::WINDOW_LIMIT_MINUTES
            )));
        }
        if self.max_window_minutes > Self::WINDOW_LIMIT_MINUTES {
            return Err(EngineError::invalid_config(format!(
                "rectification.max_window_minutes must be at most {}",
                Self::WINDOW_LIMIT_MINUTES
            )));
        }
        if self.min_window_minutes > self.max_window_minutes {
            return Err(EngineError::invalid_config(
                "rectification.min_window_minutes exceeds max_window_minutes",
            ));
        }
        if self.max_evaluations == 0 {
            return Err(EngineError::invalid_config("rectification.max_evaluations must be positive"));
        }
        if self.max_concurrency == 0 {
            return Err(EngineError::invalid_config("rectification.max_concurrency must be positive"));
        }
        if !(self.evidence_per_anchor > 0.0 && self.evidence_per_anchor <= 1.0) {
            return Err(EngineError::invalid_config(
                "rectification.evidence_per_anchor must be in (0, 1]",
            ));
        }
        Ok(())
    }
}
