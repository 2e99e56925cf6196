//! Event significators and dasha-lord correlation.

use crate::chart::{NatalChart, Planet};
use crate::dignities::{natural_friendship, sign_ruler, Friendship};
use crate::rectification::types::EventType;
use crate::vedic::{ActiveDasha, DashaLevel, DashaLord};

pub const SIGNIFICATOR_PLANET: f64 = 1.0;
pub const HOUSE_LORD: f64 = 0.75;
pub const HOUSE_OCCUPANT: f64 = 0.5;
pub const SIGNIFICATOR_FRIEND: f64 = 0.25;

/// Planets and houses classically tied to a life event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Significators {
    pub planets: &'static [Planet],
    pub houses: &'static [u8],
}

pub const fn significators(event: EventType) -> Significators {
    use Planet::*;

    match event {
        EventType::Marriage => Significators {
            planets: &[Venus, Jupiter],
            houses: &[7, 2],
        },
        EventType::Divorce => Significators {
            planets: &[Saturn, Mars, Rahu],
            houses: &[7, 6, 12],
        },
        EventType::Childbirth => Significators {
            planets: &[Jupiter],
            houses: &[5],
        },
        EventType::JobStart => Significators {
            planets: &[Saturn, Sun, Mercury],
            houses: &[10, 6],
        },
        EventType::Promotion => Significators {
            planets: &[Sun, Jupiter, Saturn],
            houses: &[10, 11],
        },
        EventType::JobLoss => Significators {
            planets: &[Saturn, Rahu, Mars],
            houses: &[10, 12, 8],
        },
        EventType::BusinessStart => Significators {
            planets: &[Mercury, Jupiter],
            houses: &[7, 10, 11],
        },
        EventType::Education => Significators {
            planets: &[Mercury, Jupiter],
            houses: &[4, 5, 9],
        },
        EventType::Relocation => Significators {
            planets: &[Moon, Rahu],
            houses: &[4, 12],
        },
        EventType::ForeignTravel => Significators {
            planets: &[Rahu, Moon],
            houses: &[9, 12],
        },
        EventType::PropertyPurchase => Significators {
            planets: &[Mars, Venus, Moon],
            houses: &[4],
        },
        EventType::Accident => Significators {
            planets: &[Mars, Saturn, Rahu],
            houses: &[8, 6],
        },
        EventType::Illness => Significators {
            planets: &[Saturn, Sun, Ketu],
            houses: &[6, 8],
        },
        EventType::DeathOfParent => Significators {
            planets: &[Sun, Moon, Saturn],
            houses: &[9, 4],
        },
    }
}

/// Weight of each dasha level before renormalisation.
pub const fn level_weight(level: DashaLevel) -> f64 {
    match level {
        DashaLevel::Mahadasha => 0.5,
        DashaLevel::Antardasha => 0.3,
        DashaLevel::Pratyantardasha => 0.2,
    }
}

/// How strongly one dasha lord signifies the event in a given chart (0..=1).
///
/// The best applicable tier wins: significator planet, lord of a significator
/// house, occupant of a significator house, natural friend of a significator
/// planet.
pub fn lord_correlation(lord: Planet, significators: &Significators, chart: &NatalChart) -> f64 {
    if significators.planets.contains(&lord) {
        return SIGNIFICATOR_PLANET;
    }
    if significators
        .houses
        .iter()
        .any(|house| sign_ruler(chart.cusp_sign(*house)) == lord)
    {
        return HOUSE_LORD;
    }
    if let Ok(house) = chart.house_of_planet(lord) {
        if significators.houses.contains(&house) {
            return HOUSE_OCCUPANT;
        }
    }
    if significators
        .planets
        .iter()
        .any(|sig| natural_friendship(*sig, lord) == Friendship::Friend)
    {
        return SIGNIFICATOR_FRIEND;
    }
    0.0
}

/// Level-weighted correlation of the active lords with an event, renormalised
/// over the levels present. Returns the correlation and the lords that matched.
pub fn dasha_correlation(active: &ActiveDasha, event: EventType, chart: &NatalChart) -> (f64, Vec<DashaLord>) {
    let sigs = significators(event);
    let mut weighted = 0.0;
    let mut weight_sum = 0.0;
    let mut matched = Vec::new();
    for lord in &active.lords {
        let weight = level_weight(lord.level);
        let tier = lord_correlation(lord.planet, &sigs, chart);
        weighted += weight * tier;
        weight_sum += weight;
        if tier > 0.0 {
            matched.push(*lord);
        }
    }
    if weight_sum <= 0.0 {
        return (0.0, matched);
    }
    ((weighted / weight_sum).clamp(0.0, 1.0), matched)
}
