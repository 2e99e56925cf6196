mod common;

use approx::assert_abs_diff_eq;
use graha::aspects::ASPECT_KINDS;
use graha::{AspectCalculator, AspectKind, OrbTable, Planet, PlanetPosition, StrengthBand};
use std::collections::BTreeMap;

fn positions(entries: &[(Planet, f64)]) -> BTreeMap<Planet, PlanetPosition> {
    entries
        .iter()
        .map(|(planet, lon)| (*planet, PlanetPosition::new(*planet, *lon, 0.0)))
        .collect()
}

#[test]
fn test_calculate_aspect_conjunction() {
    let calculator = AspectCalculator::default();
    let aspect = calculator.calculate_aspect(100.0, 102.0, 1.0, 1.0).unwrap();
    assert_eq!(aspect.kind, AspectKind::Conjunction);
    assert!(aspect.orb <= 8.0);
}

#[test]
fn test_calculate_aspect_opposition() {
    let calculator = AspectCalculator::default();
    let aspect = calculator.calculate_aspect(100.0, 278.0, 1.0, 1.0).unwrap();
    assert_eq!(aspect.kind, AspectKind::Opposition);
    assert_abs_diff_eq!(aspect.orb, 2.0, epsilon = 1e-9);
}

#[test]
fn test_identical_longitudes_are_very_strong_conjunction() {
    let calculator = AspectCalculator::default();
    for lon in [0.0, 123.4, 359.99] {
        let aspect = calculator.calculate_aspect(lon, lon, 0.0, 0.0).unwrap();
        assert_eq!(aspect.kind, AspectKind::Conjunction);
        assert_eq!(aspect.strength, StrengthBand::VeryStrong);
        assert_abs_diff_eq!(aspect.orb, 0.0);
    }
}

#[test]
fn test_square_across_aries_point() {
    let calculator = AspectCalculator::default();
    let aspect = calculator.calculate_aspect(2.0, 272.0, 0.0, 0.0).unwrap();
    assert_eq!(aspect.kind, AspectKind::Square);
    assert_abs_diff_eq!(aspect.orb, 0.0, epsilon = 1e-9);
}

#[test]
fn test_orb_never_exceeds_max() {
    let calculator = AspectCalculator::default();
    let mut lon = 0.0;
    while lon < 360.0 {
        if let Some(aspect) = calculator.calculate_aspect(0.0, lon, 0.0, 0.0) {
            assert!(aspect.orb >= 0.0);
            assert!(aspect.orb <= aspect.max_orb, "orb {} at {}", aspect.orb, lon);
            assert_eq!(aspect.max_orb, calculator.orbs().max_orb(aspect.kind).unwrap());
        }
        lon += 0.25;
    }
}

#[test]
fn test_custom_orbs_narrow_detection() {
    let tight = AspectCalculator::new(OrbTable::new(ASPECT_KINDS.map(|k| (k, 1.0))));
    assert!(tight.calculate_aspect(0.0, 93.0, 0.0, 0.0).is_none());
    let aspect = tight.calculate_aspect(0.0, 90.6, 0.0, 0.0).unwrap();
    assert_eq!(aspect.strength, StrengthBand::Moderate);
}

#[test]
fn test_aspects_between_sets() {
    let calculator = AspectCalculator::default();
    let transit = positions(&[(Planet::Mars, 2.0), (Planet::Saturn, 200.0)]);
    let natal = positions(&[(Planet::Sun, 92.0), (Planet::Moon, 20.0)]);
    let aspects = calculator.aspects_between(&transit, &natal);

    // Mars-Sun square, Saturn-Moon opposition; Mars-Moon (18°) and Saturn-Sun (108°) are outside orbs
    assert_eq!(aspects.len(), 2);
    assert_eq!(aspects[0].transit_planet, Planet::Mars);
    assert_eq!(aspects[0].natal_planet, Planet::Sun);
    assert_eq!(aspects[0].kind, AspectKind::Square);
    assert_eq!(aspects[1].kind, AspectKind::Opposition);
}

#[test]
fn test_aspects_within_chart_counts_each_pair_once() {
    let calculator = AspectCalculator::default();
    let chart = common::sample_chart();
    let aspects = calculator.aspects_within(&chart.planets);
    for (i, a) in aspects.iter().enumerate() {
        assert_ne!(a.transit_planet, a.natal_planet);
        for b in &aspects[i + 1..] {
            let same = (a.transit_planet, a.natal_planet) == (b.transit_planet, b.natal_planet)
                || (a.transit_planet, a.natal_planet) == (b.natal_planet, b.transit_planet);
            assert!(!same);
        }
    }
    // Rahu and Ketu are always opposite
    assert!(aspects.iter().any(|a| a.transit_planet == Planet::Rahu
        && a.natal_planet == Planet::Ketu
        && a.kind == AspectKind::Opposition));
}

#[test]
fn test_aspect_serializes_with_type_field() {
    let calculator = AspectCalculator::default();
    let transit = positions(&[(Planet::Mars, 2.0)]);
    let natal = positions(&[(Planet::Sun, 92.0)]);
    let aspects = calculator.aspects_between(&transit, &natal);
    let json = serde_json::to_value(&aspects[0]).unwrap();
    assert_eq!(json["type"], "square");
    assert_eq!(json["strength"], "very_strong");
    assert_eq!(json["transit_planet"], "mars");
}
