//! Classical dignity tables: sign rulers, exaltation points, own signs,
//! moolatrikona ranges, natural friendship and benefic/malefic nature.
//!
//! Rahu and Ketu rule no sign, have no exaltation point here and are
//! neutral towards every graha.

use crate::chart::Planet;
use crate::geometry::{degree_in_sign, normalize_degrees, sign_of};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dignity {
    Exalted,
    Moolatrikona,
    OwnSign,
    FriendSign,
    NeutralSign,
    EnemySign,
    Debilitated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Friendship {
    Friend,
    Neutral,
    Enemy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nature {
    Benefic,
    Malefic,
}

/// Traditional ruler of a sign (0 = Aries).
pub const fn sign_ruler(sign: u8) -> Planet {
    match sign % 12 {
        0 | 7 => Planet::Mars,
        1 | 6 => Planet::Venus,
        2 | 5 => Planet::Mercury,
        3 => Planet::Moon,
        4 => Planet::Sun,
        8 | 11 => Planet::Jupiter,
        _ => Planet::Saturn,
    }
}

/// Ruler of the sign containing a longitude.
pub fn sign_ruler_from_longitude(longitude: f64) -> Planet {
    sign_ruler(sign_of(longitude))
}

/// Exact exaltation point (sidereal longitude) of a sapta graha.
pub const fn exaltation_degree(planet: Planet) -> Option<f64> {
    match planet {
        Planet::Sun => Some(10.0),
        Planet::Moon => Some(33.0),
        Planet::Mars => Some(298.0),
        Planet::Mercury => Some(165.0),
        Planet::Jupiter => Some(95.0),
        Planet::Venus => Some(357.0),
        Planet::Saturn => Some(200.0),
        Planet::Rahu | Planet::Ketu => None,
    }
}

/// Exact debilitation point, opposite the exaltation point.
pub fn debilitation_degree(planet: Planet) -> Option<f64> {
    exaltation_degree(planet).map(|e| normalize_degrees(e + 180.0))
}

pub const fn own_signs(planet: Planet) -> &'static [u8] {
    match planet {
        Planet::Sun => &[4],
        Planet::Moon => &[3],
        Planet::Mars => &[0, 7],
        Planet::Mercury => &[2, 5],
        Planet::Jupiter => &[8, 11],
        Planet::Venus => &[1, 6],
        Planet::Saturn => &[9, 10],
        Planet::Rahu | Planet::Ketu => &[],
    }
}

/// Moolatrikona as (sign, start degree, end degree) within the sign.
pub const fn moolatrikona_range(planet: Planet) -> Option<(u8, f64, f64)> {
    match planet {
        Planet::Sun => Some((4, 0.0, 20.0)),
        Planet::Moon => Some((1, 3.0, 30.0)),
        Planet::Mars => Some((0, 0.0, 12.0)),
        Planet::Mercury => Some((5, 15.0, 20.0)),
        Planet::Jupiter => Some((8, 0.0, 10.0)),
        Planet::Venus => Some((6, 0.0, 15.0)),
        Planet::Saturn => Some((10, 0.0, 20.0)),
        Planet::Rahu | Planet::Ketu => None,
    }
}

pub fn is_own_sign(planet: Planet, sign: u8) -> bool {
    own_signs(planet).contains(&(sign % 12))
}

pub fn is_in_moolatrikona(planet: Planet, longitude: f64) -> bool {
    match moolatrikona_range(planet) {
        Some((sign, start, end)) => {
            let degree = degree_in_sign(longitude);
            sign_of(longitude) == sign && degree >= start && degree < end
        }
        None => false,
    }
}

/// Natural (naisargika) friendship of `planet` towards `other`.
pub const fn natural_friendship(planet: Planet, other: Planet) -> Friendship {
    use Friendship::*;
    use Planet::*;

    match (planet, other) {
        (Rahu | Ketu, _) | (_, Rahu | Ketu) => Neutral,
        (a, b) if a as u8 == b as u8 => Friend,

        (Sun, Moon | Mars | Jupiter) => Friend,
        (Sun, Venus | Saturn) => Enemy,
        (Sun, _) => Neutral,

        (Moon, Sun | Mercury) => Friend,
        (Moon, _) => Neutral,

        (Mars, Sun | Moon | Jupiter) => Friend,
        (Mars, Mercury) => Enemy,
        (Mars, _) => Neutral,

        (Mercury, Sun | Venus) => Friend,
        (Mercury, Moon) => Enemy,
        (Mercury, _) => Neutral,

        (Jupiter, Sun | Moon | Mars) => Friend,
        (Jupiter, Mercury | Venus) => Enemy,
        (Jupiter, _) => Neutral,

        (Venus, Mercury | Saturn) => Friend,
        (Venus, Sun | Moon) => Enemy,
        (Venus, _) => Neutral,

        (Saturn, Mercury | Venus) => Friend,
        (Saturn, Sun | Moon | Mars) => Enemy,
        (Saturn, _) => Neutral,
    }
}

/// Benefic/malefic nature; the Moon is benefic while waxing.
///
/// `lunar_elongation` is Moon minus Sun in degrees.
pub fn nature(planet: Planet, lunar_elongation: f64) -> Nature {
    match planet {
        Planet::Jupiter | Planet::Venus | Planet::Mercury => Nature::Benefic,
        Planet::Moon => {
            if normalize_degrees(lunar_elongation) < 180.0 {
                Nature::Benefic
            } else {
                Nature::Malefic
            }
        }
        Planet::Sun | Planet::Mars | Planet::Saturn | Planet::Rahu | Planet::Ketu => {
            Nature::Malefic
        }
    }
}

/// Dignity of a planet at a longitude, strongest classification first.
///
/// Exaltation and debilitation are sign-wide; the exact points only matter to
/// the continuous uchcha term of Sthana Bala.
pub fn dignity_of(planet: Planet, longitude: f64) -> Dignity {
    let sign = sign_of(longitude);
    if let Some(exalt) = exaltation_degree(planet) {
        if sign_of(exalt) == sign {
            return Dignity::Exalted;
        }
        if sign_of(exalt + 180.0) == sign {
            return Dignity::Debilitated;
        }
    }
    if is_in_moolatrikona(planet, longitude) {
        return Dignity::Moolatrikona;
    }
    if is_own_sign(planet, sign) {
        return Dignity::OwnSign;
    }
    match natural_friendship(planet, sign_ruler(sign)) {
        Friendship::Friend => Dignity::FriendSign,
        Friendship::Neutral => Dignity::NeutralSign,
        Friendship::Enemy => Dignity::EnemySign,
    }
}
