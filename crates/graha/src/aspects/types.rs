use crate::chart::Planet;
use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Major aspect types, ordered by exact angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

/// Aspect kinds in ascending order of exact angle.
pub const ASPECT_KINDS: [AspectKind; 5] = [
    AspectKind::Conjunction,
    AspectKind::Sextile,
    AspectKind::Square,
    AspectKind::Trine,
    AspectKind::Opposition,
];

impl AspectKind {
    /// Exact angle for this aspect (0, 60, 90, 120, 180)
    pub const fn exact_angle(self) -> f64 {
        match self {
            Self::Conjunction => 0.0,
            Self::Sextile => 60.0,
            Self::Square => 90.0,
            Self::Trine => 120.0,
            Self::Opposition => 180.0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Conjunction => "conjunction",
            Self::Sextile => "sextile",
            Self::Square => "square",
            Self::Trine => "trine",
            Self::Opposition => "opposition",
        }
    }
}

/// Strength band of an aspect, from its orb relative to the maximum orb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthBand {
    VeryStrong,
    Strong,
    Moderate,
    Weak,
}

impl StrengthBand {
    /// Band for an orb: ≤25% of max very strong, ≤50% strong, ≤75% moderate, else weak.
    pub fn from_orb(orb: f64, max_orb: f64) -> Self {
        if max_orb <= 0.0 {
            return Self::VeryStrong;
        }
        let ratio = orb / max_orb;
        if ratio <= 0.25 {
            Self::VeryStrong
        } else if ratio <= 0.5 {
            Self::Strong
        } else if ratio <= 0.75 {
            Self::Moderate
        } else {
            Self::Weak
        }
    }

    /// Weight used when an aspect feeds a score (Drik Bala).
    pub const fn weight(self) -> f64 {
        match self {
            Self::VeryStrong => 1.0,
            Self::Strong => 0.75,
            Self::Moderate => 0.5,
            Self::Weak => 0.25,
        }
    }
}

/// Maximum orb per aspect type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrbTable(BTreeMap<AspectKind, f64>);

pub const MAX_CONFIGURABLE_ORB: f64 = 15.0;

impl Default for OrbTable {
    fn default() -> Self {
        Self(BTreeMap::from([
            (AspectKind::Conjunction, 8.0),
            (AspectKind::Sextile, 6.0),
            (AspectKind::Square, 7.0),
            (AspectKind::Trine, 7.0),
            (AspectKind::Opposition, 8.0),
        ]))
    }
}

impl OrbTable {
    pub fn new(orbs: impl IntoIterator<Item = (AspectKind, f64)>) -> Self {
        Self(orbs.into_iter().collect())
    }

    /// Max orb for a kind; kinds missing from the table never match.
    pub fn max_orb(&self, kind: AspectKind) -> Option<f64> {
        self.0.get(&kind).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AspectKind, f64)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    /// Every kind present, each orb finite and in (0, 15].
    pub fn validate(&self) -> EngineResult<()> {
        for kind in ASPECT_KINDS {
            let orb = self.max_orb(kind).ok_or_else(|| {
                EngineError::invalid_config(format!("orb table has no entry for {}", kind.name()))
            })?;
            if !orb.is_finite() || orb <= 0.0 || orb > MAX_CONFIGURABLE_ORB {
                return Err(EngineError::invalid_config(format!(
                    "orb for {} must be in (0, {}], got {}",
                    kind.name(),
                    MAX_CONFIGURABLE_ORB,
                    orb
                )));
            }
        }
        Ok(())
    }
}

/// A matched aspect between two longitudes, before planets are attached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectCore {
    pub kind: AspectKind,
    pub exact_angle: f64,
    /// Measured angular separation (0-180)
    pub separation: f64,
    /// Deviation from the exact angle
    pub orb: f64,
    pub max_orb: f64,
    pub strength: StrengthBand,
    /// Relative motion is bringing the pair closer to exact
    pub is_applying: bool,
}

/// An aspect from a transiting (or aspecting) planet to a natal planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    pub transit_planet: Planet,
    pub natal_planet: Planet,
    #[serde(rename = "type")]
    pub kind: AspectKind,
    pub exact_angle: f64,
    pub separation: f64,
    pub orb: f64,
    pub max_orb: f64,
    pub strength: StrengthBand,
    pub is_applying: bool,
}

impl Aspect {
    pub fn from_core(transit_planet: Planet, natal_planet: Planet, core: AspectCore) -> Self {
        Self {
            transit_planet,
            natal_planet,
            kind: core.kind,
            exact_angle: core.exact_angle,
            separation: core.separation,
            orb: core.orb,
            max_orb: core.max_orb,
            strength: core.strength,
            is_applying: core.is_applying,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        assert_eq!(StrengthBand::from_orb(0.0, 8.0), StrengthBand::VeryStrong);
        assert_eq!(StrengthBand::from_orb(2.0, 8.0), StrengthBand::VeryStrong);
        assert_eq!(StrengthBand::from_orb(2.01, 8.0), StrengthBand::Strong);
        assert_eq!(StrengthBand::from_orb(4.0, 8.0), StrengthBand::Strong);
        assert_eq!(StrengthBand::from_orb(6.0, 8.0), StrengthBand::Moderate);
        assert_eq!(StrengthBand::from_orb(8.0, 8.0), StrengthBand::Weak);
    }

    #[test]
    fn test_default_orb_table_is_valid() {
        assert!(OrbTable::default().validate().is_ok());
        let partial = OrbTable::new([(AspectKind::Conjunction, 8.0)]);
        assert!(partial.validate().is_err());
        let too_wide = OrbTable::new(ASPECT_KINDS.map(|k| (k, 20.0)));
        assert!(too_wide.validate().is_err());
    }

    #[test]
    fn test_orb_table_deserializes_from_names() {
        let table: OrbTable = serde_json::from_str(
            r#"{"conjunction":8,"sextile":6,"square":7,"trine":7,"opposition":8}"#,
        )
        .unwrap();
        assert_eq!(table, OrbTable::default());
    }
}
