use crate::chart::{NatalChart, Planet};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sthana Bala sub-terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SthanaDetail {
    pub uchcha: f64,
    /// Own sign or moolatrikona bonus
    pub own_sign: f64,
    /// Friend / neutral / enemy of the sign ruler
    pub relationship: f64,
    pub kendradi: f64,
    pub total: f64,
}

/// Kala Bala sub-terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KalaDetail {
    pub is_day: bool,
    pub weekday_lord: Planet,
    pub nathonnatha: f64,
    pub paksha: f64,
    pub vara: f64,
    pub tribhaga: f64,
    pub total: f64,
}

/// The six components, in shashtiamsas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrengthComponents {
    pub sthana: f64,
    pub dig: f64,
    pub kala: f64,
    pub chesta: f64,
    pub naisargika: f64,
    pub drik: f64,
}

impl StrengthComponents {
    pub fn total(&self) -> f64 {
        self.sthana + self.dig + self.kala + self.chesta + self.naisargika + self.drik
    }

    pub fn all_non_negative(&self) -> bool {
        [self.sthana, self.dig, self.kala, self.chesta, self.naisargika, self.drik]
            .iter()
            .all(|v| *v >= 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthRating {
    VeryWeak,
    Weak,
    Moderate,
    Strong,
    VeryStrong,
    Exceptional,
}

impl StrengthRating {
    pub fn from_percent(percent: f64) -> Self {
        if percent >= 150.0 {
            Self::Exceptional
        } else if percent >= 125.0 {
            Self::VeryStrong
        } else if percent >= 100.0 {
            Self::Strong
        } else if percent >= 75.0 {
            Self::Moderate
        } else if percent >= 50.0 {
            Self::Weak
        } else {
            Self::VeryWeak
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthBreakdown {
    pub planet: Planet,
    pub components: StrengthComponents,
    /// Sum of the six components, in shashtiamsas
    pub total: f64,
    pub total_rupas: f64,
    pub required_rupas: f64,
    pub percent_of_required: f64,
    pub rating: StrengthRating,
    pub house: u8,
    pub sthana_detail: SthanaDetail,
    pub kala_detail: KalaDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadbalaReport {
    pub reference_datetime: DateTime<Utc>,
    pub planets: BTreeMap<Planet, StrengthBreakdown>,
    pub strongest: Planet,
    pub weakest: Planet,
    pub average_percent: f64,
}

impl ShadbalaReport {
    pub fn get(&self, planet: Planet) -> Option<&StrengthBreakdown> {
        self.planets.get(&planet)
    }
}

/// JSON request shape for a strength computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShadbalaRequest {
    pub natal_chart: NatalChart,
    pub reference_datetime: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bands() {
        assert_eq!(StrengthRating::from_percent(114.83), StrengthRating::Strong);
        assert_eq!(StrengthRating::from_percent(150.0), StrengthRating::Exceptional);
        assert_eq!(StrengthRating::from_percent(149.99), StrengthRating::VeryStrong);
        assert_eq!(StrengthRating::from_percent(99.9), StrengthRating::Moderate);
        assert_eq!(StrengthRating::from_percent(50.0), StrengthRating::Weak);
        assert_eq!(StrengthRating::from_percent(49.0), StrengthRating::VeryWeak);
    }
}
