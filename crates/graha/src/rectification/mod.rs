//! Birth-time rectification.
//!
//! Candidate birth times are laid out at a fixed step around the approximate
//! time. Each candidate gets its own chart, every event anchor is checked
//! against the dasha lords active at its date, and the candidates are ranked
//! by the significance-weighted correlation.

pub mod significators;
pub mod types;

pub use significators::{dasha_correlation, significators, Significators};
pub use types::{
    Candidate, EventAnchor, EventMatch, EventType, PartialReason, RectificationRequest,
    RectificationResult, MAX_SIGNIFICANCE, MIN_SIGNIFICANCE,
};

use crate::chart::Location;
use crate::config::{EngineConfig, RectificationConfig};
use crate::ephemeris::ChartProvider;
use crate::error::{EngineError, EngineResult};
use crate::vedic::DashaProvider;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

pub const TOP_CANDIDATES: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct RectificationEngine {
    config: RectificationConfig,
}

impl RectificationEngine {
    pub fn new(config: RectificationConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn from_config(config: &EngineConfig) -> EngineResult<Self> {
        Self::new(config.rectification.clone())
    }

    pub fn config(&self) -> &RectificationConfig {
        &self.config
    }

    /// Candidate offsets in minutes, ascending: every multiple of the step
    /// within the window, centred on the approximate time.
    pub fn candidate_offsets(&self, window_minutes: u32) -> EngineResult<Vec<i32>> {
        let window = i32::try_from(window_minutes).map_err(|_| EngineError::OutOfRangeWindow {
            window_minutes,
            min: self.config.min_window_minutes,
            max: self.config.max_window_minutes,
        })?;
        let step = i32::try_from(self.config.step_minutes)
            .map_err(|_| EngineError::invalid_config("rectification.step_minutes is too large"))?;
        let steps = window / step;
        Ok((-steps..=steps).map(|k| k * step).collect())
    }

    /// Confidence from the matched anchors: `1 - Π(1 - e·s·c)`, where `s` is
    /// the significance as a share of [`MAX_SIGNIFICANCE`] and `c` the
    /// correlation. One perfect anchor yields `e`; each further match closes
    /// part of the remaining gap, so a match never lowers it.
    pub fn confidence(&self, matches: &[EventMatch]) -> f64 {
        let e = self.config.evidence_per_anchor;
        let remaining: f64 = matches
            .iter()
            .map(|m| {
                let share = f64::from(m.significance.min(MAX_SIGNIFICANCE)) / f64::from(MAX_SIGNIFICANCE);
                1.0 - e * share * m.correlation.clamp(0.0, 1.0)
            })
            .product();
        (1.0 - remaining).clamp(0.0, 1.0)
    }

    fn validate_request(&self, request: &RectificationRequest) -> EngineResult<Vec<i32>> {
        let window = request.window_minutes;
        if window < self.config.min_window_minutes || window > self.config.max_window_minutes {
            return Err(EngineError::OutOfRangeWindow {
                window_minutes: window,
                min: self.config.min_window_minutes,
                max: self.config.max_window_minutes,
            });
        }
        if request.event_anchors.is_empty() {
            return Err(EngineError::InsufficientEventAnchors);
        }

        let offsets = self.candidate_offsets(window)?;
        let first = offsets.first().copied().unwrap_or(0);
        let earliest = request.approx_datetime + Duration::minutes(i64::from(first));
        for (index, anchor) in request.event_anchors.iter().enumerate() {
            if !(MIN_SIGNIFICANCE..=MAX_SIGNIFICANCE).contains(&anchor.significance) {
                return Err(EngineError::InvalidEventAnchor {
                    index,
                    message: format!(
                        "significance {} outside {}..={}",
                        anchor.significance, MIN_SIGNIFICANCE, MAX_SIGNIFICANCE
                    ),
                });
            }
            if anchor.event_date < earliest {
                return Err(EngineError::InvalidEventAnchor {
                    index,
                    message: format!("event date {} precedes the earliest birth candidate", anchor.event_date),
                });
            }
        }
        Ok(offsets)
    }

    /// Rank birth-time candidates around `request.approx_datetime`.
    pub async fn rectify(
        &self,
        request: &RectificationRequest,
        chart_provider: Arc<dyn ChartProvider>,
        dasha_provider: Arc<dyn DashaProvider>,
    ) -> EngineResult<RectificationResult> {
        let offsets = self.validate_request(request)?;
        let total_candidates = offsets.len();
        let anchor_count = request.event_anchors.len();
        let mut partial_reasons = Vec::new();
        log::debug!(
            "Rectifying {} ±{} min: {} candidates, {} anchors",
            request.approx_datetime,
            request.window_minutes,
            total_candidates,
            anchor_count
        );

        let offsets = if total_candidates.saturating_mul(anchor_count) > self.config.max_evaluations {
            let allowed = self.config.max_evaluations / anchor_count;
            if allowed == 0 {
                return Err(EngineError::ComputationBudgetExceeded {
                    message: format!(
                        "{} anchors exceed the ceiling of {} evaluations",
                        anchor_count, self.config.max_evaluations
                    ),
                });
            }
            log::warn!(
                "Evaluation ceiling {} reached; evaluating {} of {} candidates nearest the approximate time",
                self.config.max_evaluations,
                allowed,
                total_candidates
            );
            partial_reasons.push(PartialReason::EvaluationCeiling);
            nearest_offsets(offsets, allowed)
        } else {
            offsets
        };

        let anchors = Arc::new(request.event_anchors.clone());
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency));
        let mut join_set = JoinSet::new();
        for offset in offsets {
            let time = request.approx_datetime + Duration::minutes(i64::from(offset));
            let location = request.location;
            let anchors = Arc::clone(&anchors);
            let semaphore = Arc::clone(&semaphore);
            let chart_provider = Arc::clone(&chart_provider);
            let dasha_provider = Arc::clone(&dasha_provider);
            join_set.spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                let scored = evaluate_candidate(
                    offset,
                    time,
                    &location,
                    &anchors,
                    chart_provider.as_ref(),
                    dasha_provider.as_ref(),
                )
                .await;
                (offset, scored)
            });
        }

        let deadline = self
            .config
            .time_budget_ms
            .map(|ms| tokio::time::Instant::now() + std::time::Duration::from_millis(ms));
        let mut completed = Vec::new();
        let mut failures: Vec<(i32, EngineError)> = Vec::new();
        let mut timed_out = false;
        loop {
            let next = match deadline {
                Some(deadline) => match tokio::time::timeout_at(deadline, join_set.join_next()).await {
                    Ok(next) => next,
                    Err(_) => {
                        timed_out = true;
                        join_set.abort_all();
                        break;
                    }
                },
                None => join_set.join_next().await,
            };
            let Some(joined) = next else {
                break;
            };
            match joined {
                Ok((_, Ok(candidate))) => completed.push(candidate),
                Ok((offset, Err(err))) => {
                    log::warn!("Dropping candidate at {:+} min: {}", offset, err);
                    failures.push((offset, err));
                }
                Err(join_err) if join_err.is_cancelled() => {}
                Err(join_err) => {
                    log::warn!("Candidate task failed: {}", join_err);
                    failures.push((i32::MAX, EngineError::provider(join_err.to_string())));
                }
            }
        }

        if timed_out {
            log::warn!(
                "Time budget expired with {} of {} candidates evaluated",
                completed.len(),
                total_candidates
            );
            partial_reasons.push(PartialReason::TimeBudget);
        }
        if completed.is_empty() {
            if timed_out {
                return Err(EngineError::ComputationBudgetExceeded {
                    message: "time budget expired before any candidate completed".to_string(),
                });
            }
            // Report the failure nearest the approximate time
            return Err(failures
                .into_iter()
                .min_by_key(|(offset, _)| (offset.unsigned_abs(), *offset))
                .map(|(_, err)| err)
                .unwrap_or(EngineError::ComputationBudgetExceeded {
                    message: "no candidates were evaluated".to_string(),
                }));
        }
        if !failures.is_empty() {
            partial_reasons.push(PartialReason::ProviderFailures);
        }

        let evaluated_candidates = completed.len();
        for candidate in &mut completed {
            candidate.confidence = self.confidence(&candidate.event_matches);
        }
        rank_candidates(&mut completed);
        completed.truncate(TOP_CANDIDATES);

        let best = &completed[0];
        log::info!(
            "Rectified to {} ({:+} min), score {:.3}, confidence {:.1}%",
            best.time,
            best.offset_minutes,
            best.score,
            best.confidence * 100.0
        );

        Ok(RectificationResult {
            rectified_time: best.time,
            offset_minutes: best.offset_minutes,
            confidence: best.confidence,
            confidence_percent: best.confidence * 100.0,
            partial: !partial_reasons.is_empty(),
            top_candidates: completed,
            partial_reasons,
            evaluated_candidates,
            total_candidates,
        })
    }
}

/// Score one candidate: build its chart, then correlate each anchor with the
/// dasha lords active at the event date.
pub async fn evaluate_candidate(
    offset_minutes: i32,
    time: DateTime<Utc>,
    location: &Location,
    anchors: &[EventAnchor],
    chart_provider: &dyn ChartProvider,
    dasha_provider: &dyn DashaProvider,
) -> EngineResult<Candidate> {
    let chart = chart_provider.chart_at(time, location).await?;
    let mut score = 0.0;
    let mut event_matches = Vec::new();
    for (anchor_index, anchor) in anchors.iter().enumerate() {
        let active = dasha_provider.active_lords(&chart, anchor.event_date).await?;
        let (correlation, matched_lords) = dasha_correlation(&active, anchor.event_type, &chart);
        let contribution = f64::from(anchor.significance) * correlation;
        score += contribution;
        if correlation > 0.0 {
            event_matches.push(EventMatch {
                anchor_index,
                event_type: anchor.event_type,
                event_date: anchor.event_date,
                significance: anchor.significance,
                correlation,
                contribution,
                matched_lords,
            });
        }
    }
    Ok(Candidate {
        offset_minutes,
        time,
        chart,
        score,
        confidence: 0.0,
        event_matches,
    })
}

/// Keep the `count` offsets closest to zero (earlier first on ties), ascending.
fn nearest_offsets(mut offsets: Vec<i32>, count: usize) -> Vec<i32> {
    offsets.sort_by_key(|offset| (offset.unsigned_abs(), *offset));
    offsets.truncate(count);
    offsets.sort_unstable();
    offsets
}

/// Score descending, then closer to the approximate time, then earlier.
fn rank_candidates(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then(a.offset_minutes.unsigned_abs().cmp(&b.offset_minutes.unsigned_abs()))
            .then(a.offset_minutes.cmp(&b.offset_minutes))
    });
}
