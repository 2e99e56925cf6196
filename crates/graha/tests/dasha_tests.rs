mod common;

use chrono::Duration;
use common::{birth_time, sample_chart};
use graha::vedic::dashas::VIMSHOTTARI_YEAR_DAYS;
use graha::vedic::nakshatra_of;
use graha::{DashaLevel, DashaProvider, Planet, VimshottariDashaProvider};

fn years(n: f64) -> Duration {
    Duration::milliseconds((n * VIMSHOTTARI_YEAR_DAYS * 86_400_000.0) as i64)
}

#[test]
fn test_birth_moon_nakshatra() {
    // Moon at 15° Taurus sits in Rohini, ruled by the Moon
    let placement = nakshatra_of(45.0);
    assert_eq!(placement.record.id, "rohini");
    assert_eq!(placement.record.lord, Planet::Moon);
    assert_eq!(placement.pada, 2);
}

#[tokio::test]
async fn test_lords_at_birth() {
    // 3.75 of the Moon's 10 years have run: Jupiter antardasha
    let provider = VimshottariDashaProvider::new();
    let active = provider.active_lords(&sample_chart(), birth_time()).await.unwrap();
    assert_eq!(active.date, birth_time());
    assert_eq!(active.lord(DashaLevel::Mahadasha), Some(Planet::Moon));
    assert_eq!(active.lord(DashaLevel::Antardasha), Some(Planet::Jupiter));
    assert_eq!(active.lords.len(), 3);
}

#[tokio::test]
async fn test_mahadasha_sequence_after_balance() {
    let provider = VimshottariDashaProvider::new();
    let chart = sample_chart();
    let cases = [
        (6.0, Planet::Moon),
        (6.5, Planet::Mars),
        (13.5, Planet::Rahu),
        (31.5, Planet::Jupiter),
    ];
    for (after, expected) in cases {
        let active = provider
            .active_lords(&chart, birth_time() + years(after))
            .await
            .unwrap();
        assert_eq!(active.lord(DashaLevel::Mahadasha), Some(expected), "{after} years");
    }
}

#[tokio::test]
async fn test_first_antardasha_shares_mahadasha_lord() {
    // Mars mahadasha begins 6.25 years after birth
    let provider = VimshottariDashaProvider::new();
    let active = provider
        .active_lords(&sample_chart(), birth_time() + years(6.26))
        .await
        .unwrap();
    assert_eq!(active.lord(DashaLevel::Mahadasha), Some(Planet::Mars));
    assert_eq!(active.lord(DashaLevel::Antardasha), Some(Planet::Mars));
    assert_eq!(active.lord(DashaLevel::Pratyantardasha), Some(Planet::Mars));
}

#[tokio::test]
async fn test_chart_without_moon_is_error() {
    let mut chart = sample_chart();
    chart.planets.remove(&Planet::Moon);
    let provider = VimshottariDashaProvider::new();
    assert!(provider.active_lords(&chart, birth_time()).await.is_err());
}

#[tokio::test]
async fn test_date_before_birth_dasha_is_error() {
    let provider = VimshottariDashaProvider::new();
    let result = provider
        .active_lords(&sample_chart(), birth_time() - years(5.0))
        .await;
    assert!(result.is_err());

    // Inside the pre-birth portion of the birth mahadasha is still resolvable
    let active = provider
        .active_lords(&sample_chart(), birth_time() - years(1.0))
        .await
        .unwrap();
    assert_eq!(active.lord(DashaLevel::Mahadasha), Some(Planet::Moon));
}
