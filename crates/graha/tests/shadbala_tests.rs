mod common;

use approx::assert_abs_diff_eq;
use chrono::{DateTime, Utc};
use common::{birth_time, sample_chart};
use graha::config::RequiredStrengthTable;
use graha::{
    EngineError, OrbTable, Planet, ShadbalaEngine, StrengthRating, SAPTA_GRAHAS,
};

fn utc(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc)
}

#[test]
fn test_totals_are_sum_of_non_negative_components() {
    let engine = ShadbalaEngine::default();
    let report = engine.compute(&sample_chart(), birth_time()).unwrap();

    assert_eq!(report.planets.len(), 7);
    for planet in SAPTA_GRAHAS {
        let b = report.get(planet).unwrap();
        assert!(b.components.all_non_negative(), "{planet} has a negative component");
        assert_abs_diff_eq!(b.total, b.components.total(), epsilon = 1e-9);
        assert_abs_diff_eq!(b.total_rupas, b.total / 60.0, epsilon = 1e-9);
        assert_abs_diff_eq!(
            b.percent_of_required,
            b.total_rupas / b.required_rupas * 100.0,
            epsilon = 1e-9
        );
        assert_eq!(b.rating, StrengthRating::from_percent(b.percent_of_required));
    }
    assert!(report.get(Planet::Rahu).is_none());
}

#[test]
fn test_sthana_and_dig_values() {
    let report = ShadbalaEngine::default()
        .compute(&sample_chart(), birth_time())
        .unwrap();

    // Jupiter exactly exalted in Cancer, a friend's sign, in the 12th house
    let jupiter = report.get(Planet::Jupiter).unwrap();
    assert_abs_diff_eq!(jupiter.sthana_detail.uchcha, 60.0, epsilon = 1e-9);
    assert_abs_diff_eq!(jupiter.sthana_detail.relationship, 15.0);
    assert_abs_diff_eq!(jupiter.sthana_detail.kendradi, 15.0);
    assert_abs_diff_eq!(jupiter.components.sthana, 90.0, epsilon = 1e-9);
    assert_eq!(jupiter.house, 12);

    // Sun in the 6th house, four houses from the 10th
    let sun = report.get(Planet::Sun).unwrap();
    assert_eq!(sun.house, 6);
    assert_abs_diff_eq!(sun.components.dig, 20.0, epsilon = 1e-9);
    assert_abs_diff_eq!(sun.components.chesta, 60.0);
    assert_abs_diff_eq!(sun.components.naisargika, 60.0);
}

#[test]
fn test_kala_at_night_before_dawn() {
    // 04:30 local on a Wednesday, before sunrise: the last third of Tuesday night
    let report = ShadbalaEngine::default()
        .compute(&sample_chart(), birth_time())
        .unwrap();

    let moon = report.get(Planet::Moon).unwrap();
    assert!(!moon.kala_detail.is_day);
    assert_eq!(moon.kala_detail.weekday_lord, Planet::Mars);
    assert_abs_diff_eq!(moon.kala_detail.nathonnatha, 60.0);
    assert_abs_diff_eq!(moon.kala_detail.paksha, 130.0 / 3.0, epsilon = 1e-9);
    assert_abs_diff_eq!(moon.kala_detail.tribhaga, 0.0);

    let mars = report.get(Planet::Mars).unwrap();
    assert_abs_diff_eq!(mars.kala_detail.vara, 45.0);
    assert_abs_diff_eq!(mars.kala_detail.tribhaga, 60.0);
    assert_abs_diff_eq!(mars.components.kala, 165.0, epsilon = 1e-9);

    let sun = report.get(Planet::Sun).unwrap();
    assert_abs_diff_eq!(sun.components.kala, 0.0);
}

#[test]
fn test_kala_follows_reference_moment() {
    let engine = ShadbalaEngine::default();
    let chart = sample_chart();
    let natal = engine.compute(&chart, birth_time()).unwrap();

    // Wednesday 2024-05-15, 11:00 and 12:00 in Delhi
    for reference in ["2024-05-15T05:30:00Z", "2024-05-15T06:30:00Z"] {
        let report = engine.compute(&chart, utc(reference)).unwrap();
        let sun = report.get(Planet::Sun).unwrap();
        assert!(sun.kala_detail.is_day, "{reference}");
        assert_eq!(sun.kala_detail.weekday_lord, Planet::Mercury, "{reference}");
        assert_abs_diff_eq!(sun.kala_detail.nathonnatha, 60.0);
        assert_abs_diff_eq!(sun.kala_detail.tribhaga, 60.0);
        assert_abs_diff_eq!(report.get(Planet::Mercury).unwrap().kala_detail.vara, 45.0);
        assert_abs_diff_eq!(report.get(Planet::Mars).unwrap().kala_detail.vara, 0.0);

        // Only the temporal component moves with the reference moment
        let natal_sun = natal.get(Planet::Sun).unwrap();
        assert_abs_diff_eq!(sun.components.sthana, natal_sun.components.sthana, epsilon = 1e-9);
        assert_abs_diff_eq!(sun.components.dig, natal_sun.components.dig, epsilon = 1e-9);
    }

    // 05:30 in Delhi, before sunrise: still Tuesday
    let pre_dawn = engine.compute(&chart, utc("2024-05-15T00:00:00Z")).unwrap();
    let moon = pre_dawn.get(Planet::Moon).unwrap();
    assert!(!moon.kala_detail.is_day);
    assert_eq!(moon.kala_detail.weekday_lord, Planet::Mars);
}

#[test]
fn test_percent_rises_with_total_at_fixed_requirement() {
    let engine = ShadbalaEngine::default();
    let mut samples = Vec::new();
    for speed in [1.2, 0.9, 0.7, 0.5, 0.3, 0.0, -0.2] {
        let mut chart = sample_chart();
        chart.planets.get_mut(&Planet::Mars).unwrap().speed = speed;
        let report = engine.compute(&chart, birth_time()).unwrap();
        let mars = report.get(Planet::Mars).unwrap();
        assert_abs_diff_eq!(mars.required_rupas, 5.0);
        samples.push((mars.total, mars.percent_of_required));
    }

    samples.sort_by(|a, b| a.0.total_cmp(&b.0));
    assert!(samples.first().unwrap().0 < samples.last().unwrap().0);
    assert!(samples.windows(2).all(|w| w[0].1 <= w[1].1));
}

#[test]
fn test_strongest_and_weakest() {
    let report = ShadbalaEngine::default()
        .compute(&sample_chart(), birth_time())
        .unwrap();
    let strongest = report.get(report.strongest).unwrap().percent_of_required;
    let weakest = report.get(report.weakest).unwrap().percent_of_required;
    for b in report.planets.values() {
        assert!(b.percent_of_required <= strongest);
        assert!(b.percent_of_required >= weakest);
    }
    let mean = report.planets.values().map(|b| b.percent_of_required).sum::<f64>() / 7.0;
    assert_abs_diff_eq!(report.average_percent, mean, epsilon = 1e-9);
}

#[test]
fn test_higher_requirement_lowers_percent() {
    let chart = sample_chart();
    let base = ShadbalaEngine::default().compute(&chart, birth_time()).unwrap();

    let mut table: Vec<_> = SAPTA_GRAHAS.iter().map(|p| (*p, 6.0)).collect();
    table[0].1 = 12.0;
    let strict = ShadbalaEngine::new(RequiredStrengthTable::new(table), OrbTable::default())
        .unwrap()
        .compute(&chart, birth_time())
        .unwrap();

    let sun_base = base.get(Planet::Sun).unwrap();
    let sun_strict = strict.get(Planet::Sun).unwrap();
    assert_abs_diff_eq!(sun_base.total, sun_strict.total, epsilon = 1e-9);
    assert!(sun_strict.percent_of_required < sun_base.percent_of_required);
}

#[test]
fn test_missing_planet_is_invalid_chart() {
    let mut chart = sample_chart();
    chart.planets.remove(&Planet::Saturn);
    let err = ShadbalaEngine::default().compute(&chart, birth_time()).unwrap_err();
    assert!(matches!(err, EngineError::InvalidChartData { .. }));
}

#[test]
fn test_non_finite_input_is_invalid_chart() {
    let mut chart = sample_chart();
    chart.planets.get_mut(&Planet::Venus).unwrap().speed = f64::INFINITY;
    let err = ShadbalaEngine::default().compute(&chart, birth_time()).unwrap_err();
    assert!(err.is_invalid_chart());

    let mut chart = sample_chart();
    chart.cusps[0] = f64::NAN;
    assert!(ShadbalaEngine::default().compute(&chart, birth_time()).is_err());
}

#[test]
fn test_invalid_required_table_rejected() {
    let table = RequiredStrengthTable::new(SAPTA_GRAHAS.map(|p| (p, 0.0)));
    assert!(ShadbalaEngine::new(table, OrbTable::default()).is_err());
}

#[test]
fn test_compute_is_deterministic() {
    let engine = ShadbalaEngine::default();
    let a = engine.compute(&sample_chart(), birth_time()).unwrap();
    let b = engine.compute(&sample_chart(), birth_time()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_rating_for_known_percent() {
    assert_eq!(StrengthRating::from_percent(114.83), StrengthRating::Strong);
}
