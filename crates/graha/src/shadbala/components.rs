//! The six strength components, one free function per sub-term.
//!
//! All values are in shashtiamsas (1/60 rupa). Functions are defined for the
//! sapta grahas; the lunar nodes score zero wherever a table has no entry.

use crate::aspects::AspectCalculator;
use crate::chart::{Location, NatalChart, Planet};
use crate::dignities::{
    exaltation_degree, is_in_moolatrikona, is_own_sign, natural_friendship, nature, sign_ruler,
    Friendship, Nature,
};
use crate::geometry::{angular_separation, house_distance, normalize_degrees, sign_of};
use crate::shadbala::types::{KalaDetail, SthanaDetail};
use chrono::{DateTime, Datelike, Duration, Timelike, Utc, Weekday};

pub const OWN_SIGN_BONUS: f64 = 30.0;
pub const FRIEND_SIGN_BONUS: f64 = 15.0;
pub const VARA_BALA: f64 = 45.0;
pub const TRIBHAGA_BALA: f64 = 60.0;
pub const NATHONNATHA_BALA: f64 = 60.0;
pub const LUMINARY_CHESTA: f64 = 60.0;

/// Uchcha Bala: 60 * (1 - distance_from_exaltation / 180).
pub fn uchcha_bala(planet: Planet, longitude: f64) -> f64 {
    match exaltation_degree(planet) {
        Some(exalt) => 60.0 * (1.0 - angular_separation(longitude, exalt) / 180.0),
        None => 0.0,
    }
}

/// Kendradi Bala: kendra (1,4,7,10) = 60, panapara (2,5,8,11) = 30, apoklima = 15.
pub fn kendradi_bala(house: u8) -> f64 {
    match house {
        1 | 4 | 7 | 10 => 60.0,
        2 | 5 | 8 | 11 => 30.0,
        _ => 15.0,
    }
}

/// Relationship term towards the occupied sign's ruler; zero in own sign.
pub fn sign_relationship_bala(planet: Planet, longitude: f64) -> f64 {
    let sign = sign_of(longitude);
    if is_own_sign(planet, sign) {
        return 0.0;
    }
    match natural_friendship(planet, sign_ruler(sign)) {
        Friendship::Friend => FRIEND_SIGN_BONUS,
        Friendship::Neutral => 0.0,
        Friendship::Enemy => -FRIEND_SIGN_BONUS,
    }
}

/// Sthana (positional) bala with its sub-terms; the total is clamped at zero.
pub fn sthana_bala(planet: Planet, longitude: f64, house: u8) -> SthanaDetail {
    let uchcha = uchcha_bala(planet, longitude);
    let own_sign = if is_own_sign(planet, sign_of(longitude)) || is_in_moolatrikona(planet, longitude) {
        OWN_SIGN_BONUS
    } else {
        0.0
    };
    let relationship = sign_relationship_bala(planet, longitude);
    let kendradi = kendradi_bala(house);
    SthanaDetail {
        uchcha,
        own_sign,
        relationship,
        kendradi,
        total: (uchcha + own_sign + relationship + kendradi).max(0.0),
    }
}

/// House in which each graha gains full directional strength.
pub const fn dig_bala_house(planet: Planet) -> Option<u8> {
    match planet {
        Planet::Sun | Planet::Mars => Some(10),
        Planet::Moon | Planet::Venus => Some(4),
        Planet::Mercury | Planet::Jupiter => Some(1),
        Planet::Saturn => Some(7),
        Planet::Rahu | Planet::Ketu => None,
    }
}

/// Dig Bala: 60 * (1 - d/6), d = circular house distance from the strong house.
pub fn dig_bala(planet: Planet, house: u8) -> f64 {
    match dig_bala_house(planet) {
        Some(strong) => 60.0 * (1.0 - f64::from(house_distance(house, strong)) / 6.0),
        None => 0.0,
    }
}

/// Sunrise in local civil time; sunset falls twelve hours later.
pub const SUNRISE_HOUR: i64 = 6;

/// Day or night at the reference moment, with the elapsed fraction of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayPhase {
    pub is_day: bool,
    /// 0.0 at sunrise (or sunset for night), 1.0 at the end of the period.
    pub fraction: f64,
}

impl DayPhase {
    /// Derived from the local time at `location`: the twelve hours after
    /// sunrise are daytime.
    pub fn at(moment: DateTime<Utc>, location: &Location) -> Self {
        let local = moment.with_timezone(&location.offset());
        let hours = f64::from(local.num_seconds_from_midnight()) / 3600.0;
        let since_sunrise = (hours - SUNRISE_HOUR as f64).rem_euclid(24.0);
        if since_sunrise < 12.0 {
            Self {
                is_day: true,
                fraction: since_sunrise / 12.0,
            }
        } else {
            Self {
                is_day: false,
                fraction: (since_sunrise - 12.0) / 12.0,
            }
        }
    }

    /// Third of the day or night (0, 1 or 2).
    pub fn third(&self) -> usize {
        ((self.fraction * 3.0).floor() as usize).min(2)
    }
}

/// Nathonnatha: diurnal grahas strong by day, nocturnal by night, Mercury always.
pub fn nathonnatha_bala(planet: Planet, phase: DayPhase) -> f64 {
    let strong = match planet {
        Planet::Sun | Planet::Jupiter | Planet::Venus => phase.is_day,
        Planet::Moon | Planet::Mars | Planet::Saturn => !phase.is_day,
        Planet::Mercury => true,
        Planet::Rahu | Planet::Ketu => false,
    };
    if strong {
        NATHONNATHA_BALA
    } else {
        0.0
    }
}

/// Paksha: only the Moon and Venus respond to the lunar phase.
///
/// The phase angle is the Moon-Sun separation (0-180). Waxing yields a third
/// of it, waning a sixth.
pub fn paksha_bala(planet: Planet, lunar_elongation: f64) -> f64 {
    if !matches!(planet, Planet::Moon | Planet::Venus) {
        return 0.0;
    }
    let elongation = normalize_degrees(lunar_elongation);
    let phase_angle = angular_separation(elongation, 0.0);
    if elongation < 180.0 {
        phase_angle / 3.0
    } else {
        phase_angle / 6.0
    }
}

pub fn weekday_lord(weekday: Weekday) -> Planet {
    match weekday {
        Weekday::Sun => Planet::Sun,
        Weekday::Mon => Planet::Moon,
        Weekday::Tue => Planet::Mars,
        Weekday::Wed => Planet::Mercury,
        Weekday::Thu => Planet::Jupiter,
        Weekday::Fri => Planet::Venus,
        Weekday::Sat => Planet::Saturn,
    }
}

/// Vedic weekday of a moment: the civil weekday at `location`, with the
/// hours before sunrise counted to the previous day.
pub fn vedic_weekday(moment: DateTime<Utc>, location: &Location) -> Weekday {
    let local = moment.with_timezone(&location.offset());
    (local - Duration::hours(SUNRISE_HOUR)).weekday()
}

/// Vara Bala: 45 for the lord of the weekday.
pub fn vara_bala(planet: Planet, weekday: Weekday) -> f64 {
    if weekday_lord(weekday) == planet {
        VARA_BALA
    } else {
        0.0
    }
}

/// Tribhaga: Jupiter always; Mercury, Sun, Saturn rule the day thirds and
/// Moon, Venus, Mars the night thirds.
pub fn tribhaga_bala(planet: Planet, phase: DayPhase) -> f64 {
    const DAY_THIRDS: [Planet; 3] = [Planet::Mercury, Planet::Sun, Planet::Saturn];
    const NIGHT_THIRDS: [Planet; 3] = [Planet::Moon, Planet::Venus, Planet::Mars];

    if planet == Planet::Jupiter {
        return TRIBHAGA_BALA;
    }
    let ruler = if phase.is_day {
        DAY_THIRDS[phase.third()]
    } else {
        NIGHT_THIRDS[phase.third()]
    };
    if ruler == planet {
        TRIBHAGA_BALA
    } else {
        0.0
    }
}

pub fn kala_bala(planet: Planet, phase: DayPhase, weekday: Weekday, lunar_elongation: f64) -> KalaDetail {
    let nathonnatha = nathonnatha_bala(planet, phase);
    let paksha = paksha_bala(planet, lunar_elongation);
    let vara = vara_bala(planet, weekday);
    let tribhaga = tribhaga_bala(planet, phase);
    KalaDetail {
        is_day: phase.is_day,
        weekday_lord: weekday_lord(weekday),
        nathonnatha,
        paksha,
        vara,
        tribhaga,
        total: nathonnatha + paksha + vara + tribhaga,
    }
}

/// Mean daily motion (deg/day) of the non-luminary sapta grahas.
pub const fn mean_motion(planet: Planet) -> Option<f64> {
    match planet {
        Planet::Mars => Some(0.5240),
        Planet::Mercury | Planet::Venus => Some(0.9856),
        Planet::Jupiter => Some(0.0831),
        Planet::Saturn => Some(0.0335),
        Planet::Sun | Planet::Moon | Planet::Rahu | Planet::Ketu => None,
    }
}

/// Chesta Bala: 30 at mean speed, rising to 60 when stationary or retrograde,
/// falling to 0 at twice the mean. Luminaries are fixed at 60.
pub fn chesta_bala(planet: Planet, speed: f64) -> f64 {
    if planet.is_luminary() {
        return LUMINARY_CHESTA;
    }
    match mean_motion(planet) {
        Some(mean) => (30.0 * (2.0 - speed / mean)).clamp(0.0, 60.0),
        None => 0.0,
    }
}

/// Naisargika (natural) Bala, in shashtiamsas.
pub const fn naisargika_bala(planet: Planet) -> f64 {
    match planet {
        Planet::Sun => 60.0,
        Planet::Moon => 51.43,
        Planet::Venus => 42.86,
        Planet::Jupiter => 34.29,
        Planet::Mercury => 25.71,
        Planet::Mars => 17.14,
        Planet::Saturn => 8.57,
        Planet::Rahu | Planet::Ketu => 0.0,
    }
}

/// Drik Bala: 30 + 15 * (benefic aspect weight - malefic aspect weight), clamped to [0, 60].
///
/// Every other graha in the chart is a potential source.
pub fn drik_bala(planet: Planet, chart: &NatalChart, calculator: &AspectCalculator, lunar_elongation: f64) -> f64 {
    let Some(target) = chart.planets.get(&planet) else {
        return 0.0;
    };
    let mut net = 0.0;
    for (source, position) in &chart.planets {
        if *source == planet {
            continue;
        }
        let Some(aspect) =
            calculator.calculate_aspect(position.longitude, target.longitude, position.speed, target.speed)
        else {
            continue;
        };
        let weight = aspect.strength.weight();
        match nature(*source, lunar_elongation) {
            Nature::Benefic => net += weight,
            Nature::Malefic => net -= weight,
        }
    }
    (30.0 + 15.0 * net).clamp(0.0, 60.0)
}
