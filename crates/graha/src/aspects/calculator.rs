use crate::aspects::types::{Aspect, AspectCore, AspectKind, OrbTable, StrengthBand, ASPECT_KINDS};
use crate::chart::{Planet, PlanetPosition};
use crate::geometry::{angular_separation, signed_separation};
use std::collections::BTreeMap;

/// Aspect calculator over a fixed orb table.
#[derive(Debug, Clone, Default)]
pub struct AspectCalculator {
    orbs: OrbTable,
}

impl AspectCalculator {
    pub fn new(orbs: OrbTable) -> Self {
        Self { orbs }
    }

    pub fn orbs(&self) -> &OrbTable {
        &self.orbs
    }

    /// Find the aspect formed by two longitudes, if any.
    ///
    /// When the separation falls inside more than one orb the aspect with the
    /// smallest orb wins; equal orbs resolve to the lower exact angle.
    pub fn calculate_aspect(&self, lon1: f64, lon2: f64, speed1: f64, speed2: f64) -> Option<AspectCore> {
        let separation = angular_separation(lon1, lon2);

        let mut best: Option<(AspectKind, f64, f64)> = None;
        for kind in ASPECT_KINDS {
            let Some(max_orb) = self.orbs.max_orb(kind) else {
                continue;
            };
            let orb = (separation - kind.exact_angle()).abs();
            if orb > max_orb {
                continue;
            }
            match best {
                Some((_, best_orb, _)) if orb >= best_orb => {}
                _ => best = Some((kind, orb, max_orb)),
            }
        }

        best.map(|(kind, orb, max_orb)| AspectCore {
            kind,
            exact_angle: kind.exact_angle(),
            separation,
            orb,
            max_orb,
            strength: StrengthBand::from_orb(orb, max_orb),
            is_applying: is_aspect_applying(lon1, lon2, speed1, speed2, kind.exact_angle(), separation),
        })
    }

    /// Aspects from each planet of `from` to each planet of `to`.
    ///
    /// A planet aspecting its own natal place is a valid pair. Output order is
    /// `from` planet order, then `to` planet order.
    pub fn aspects_between(
        &self,
        from: &BTreeMap<Planet, PlanetPosition>,
        to: &BTreeMap<Planet, PlanetPosition>,
    ) -> Vec<Aspect> {
        let mut aspects = Vec::new();
        for (from_planet, from_pos) in from {
            for (to_planet, to_pos) in to {
                if let Some(core) = self.calculate_aspect(
                    from_pos.longitude,
                    to_pos.longitude,
                    from_pos.speed,
                    to_pos.speed,
                ) {
                    aspects.push(Aspect::from_core(*from_planet, *to_planet, core));
                }
            }
        }
        aspects
    }

    /// Aspects among the planets of a single chart, each unordered pair once.
    pub fn aspects_within(&self, planets: &BTreeMap<Planet, PlanetPosition>) -> Vec<Aspect> {
        let positions: Vec<&PlanetPosition> = planets.values().collect();
        let mut aspects = Vec::new();
        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                let (a, b) = (positions[i], positions[j]);
                if let Some(core) = self.calculate_aspect(a.longitude, b.longitude, a.speed, b.speed) {
                    aspects.push(Aspect::from_core(a.planet, b.planet, core));
                }
            }
        }
        aspects
    }
}

/// Determine if an aspect is applying (approaching exact) or separating.
fn is_aspect_applying(
    lon1: f64,
    lon2: f64,
    speed1: f64,
    speed2: f64,
    aspect_angle: f64,
    current_angle: f64,
) -> bool {
    let relative_speed = speed1 - speed2;

    // Too slow to call; treat as applying only when not yet past exact
    if relative_speed.abs() < 0.01 {
        return current_angle < aspect_angle + 0.5;
    }

    let signed_diff = signed_separation(lon2, lon1);
    let current_distance = (current_angle - aspect_angle).abs();

    // Project forward a tenth of a day
    let future_signed_diff = signed_separation(0.0, signed_diff + relative_speed * 0.1);
    let future_distance = (future_signed_diff.abs() - aspect_angle).abs();

    future_distance < current_distance
}
