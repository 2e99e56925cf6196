//! Sign-change forecasting by forward sampling.
//!
//! Each planet is sampled at its own interval. Between two samples the motion
//! is taken as the shortest signed rotation, every 30-degree boundary inside
//! that rotation is one crossing, and its time is interpolated linearly.

use crate::chart::Planet;
use crate::config::TransitConfig;
use crate::ephemeris::EphemerisProvider;
use crate::error::{EngineError, EngineResult};
use crate::geometry::{signed_separation, SIGN_SPAN};
use crate::transit::types::{MotionDirection, SignChangeEvent};
use chrono::{DateTime, Duration, Utc};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Crossings of every sign boundary between two longitudes, as
/// (fraction of the step, from sign, to sign, direction), in the order the
/// planet meets them.
pub fn boundary_crossings(from_lon: f64, to_lon: f64) -> Vec<(f64, u8, u8, MotionDirection)> {
    let delta = signed_separation(from_lon, to_lon);
    if delta == 0.0 {
        return Vec::new();
    }
    let start = from_lon;
    let end = from_lon + delta;
    let (lo, hi) = if delta > 0.0 { (start, end) } else { (end, start) };

    // Boundaries b = k * 30 with lo < b <= hi
    let first = (lo / SIGN_SPAN).floor() as i64 + 1;
    let last = (hi / SIGN_SPAN).floor() as i64;
    if first > last {
        return Vec::new();
    }

    let to_sign = |k: i64| k.rem_euclid(12) as u8;
    let mut crossings: Vec<_> = (first..=last)
        .map(|k| {
            let boundary = k as f64 * SIGN_SPAN;
            let fraction = (boundary - start) / delta;
            if delta > 0.0 {
                (fraction, to_sign(k - 1), to_sign(k), MotionDirection::Direct)
            } else {
                (fraction, to_sign(k), to_sign(k - 1), MotionDirection::Retrograde)
            }
        })
        .collect();
    if delta < 0.0 {
        crossings.reverse();
    }
    crossings
}

/// Sample one planet over `(start, end]` and return its crossings in time order.
pub fn planet_sign_changes(
    ephemeris: &dyn EphemerisProvider,
    planet: Planet,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    sampling_hours: f64,
) -> EngineResult<Vec<SignChangeEvent>> {
    let step_ms = (sampling_hours * MILLIS_PER_HOUR).round() as i64;
    if step_ms <= 0 {
        return Err(EngineError::invalid_config(format!(
            "sampling interval for {} must be positive",
            planet
        )));
    }
    let step = Duration::milliseconds(step_ms);

    let mut events = Vec::new();
    let mut t_prev = start;
    let mut lon_prev = ephemeris.position_at(planet, t_prev)?.longitude;

    while t_prev < end {
        let t_next = (t_prev + step).min(end);
        let lon_next = ephemeris.position_at(planet, t_next)?.longitude;
        let span_ms = (t_next - t_prev).num_milliseconds() as f64;

        for (fraction, from_sign, to_sign, direction) in boundary_crossings(lon_prev, lon_next) {
            let crossing_time = t_prev + Duration::milliseconds((fraction * span_ms).round() as i64);
            if crossing_time <= start || crossing_time > end {
                continue;
            }
            events.push(SignChangeEvent {
                planet,
                from_sign,
                to_sign,
                crossing_time,
                direction,
            });
        }

        t_prev = t_next;
        lon_prev = lon_next;
    }
    Ok(events)
}

/// Drop pairs of opposite crossings of the same boundary that happen within
/// `window_hours` of each other. Longer-lived re-crossings are kept.
pub fn cancel_oscillations(events: Vec<SignChangeEvent>, window_hours: f64) -> Vec<SignChangeEvent> {
    let window_ms = (window_hours * MILLIS_PER_HOUR).round() as i64;
    let mut kept: Vec<SignChangeEvent> = Vec::with_capacity(events.len());
    for event in events {
        let cancels = kept.last().is_some_and(|last| {
            last.reverses(&event)
                && (event.crossing_time - last.crossing_time).num_milliseconds() <= window_ms
        });
        if cancels {
            kept.pop();
        } else {
            kept.push(event);
        }
    }
    kept
}

/// Forecast sign changes for a set of planets over `(start, start + horizon_days]`,
/// ordered by crossing time, then planet.
pub fn forecast_sign_changes(
    ephemeris: &dyn EphemerisProvider,
    planets: impl IntoIterator<Item = Planet>,
    start: DateTime<Utc>,
    horizon_days: i64,
    config: &TransitConfig,
) -> EngineResult<Vec<SignChangeEvent>> {
    let end = start + Duration::days(horizon_days);
    let mut all = Vec::new();
    for planet in planets {
        let hours = config.sampling_hours.for_planet(planet);
        let raw = planet_sign_changes(ephemeris, planet, start, end, hours)?;
        let raw_count = raw.len();
        let kept = cancel_oscillations(raw, config.oscillation_window_hours);
        if kept.len() != raw_count {
            log::debug!(
                "Dropped {} oscillating crossings for {}",
                raw_count - kept.len(),
                planet
            );
        }
        all.extend(kept);
    }
    all.sort_by(|a, b| a.crossing_time.cmp(&b.crossing_time).then(a.planet.cmp(&b.planet)));
    Ok(all)
}
