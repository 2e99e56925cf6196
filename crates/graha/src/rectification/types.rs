use crate::chart::{Location, NatalChart};
use crate::vedic::DashaLord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Life events usable as rectification anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Marriage,
    Divorce,
    Childbirth,
    JobStart,
    Promotion,
    JobLoss,
    BusinessStart,
    Education,
    Relocation,
    ForeignTravel,
    PropertyPurchase,
    Accident,
    Illness,
    DeathOfParent,
}

pub const MIN_SIGNIFICANCE: u8 = 1;
pub const MAX_SIGNIFICANCE: u8 = 5;

/// A dated life event with a user-assigned significance (1-5).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventAnchor {
    pub event_type: EventType,
    pub event_date: DateTime<Utc>,
    pub significance: u8,
    #[serde(default)]
    pub note: String,
}

impl EventAnchor {
    pub fn new(event_type: EventType, event_date: DateTime<Utc>, significance: u8) -> Self {
        Self {
            event_type,
            event_date,
            significance,
            note: String::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }
}

/// An anchor whose active dasha lords correlate with its event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMatch {
    pub anchor_index: usize,
    pub event_type: EventType,
    pub event_date: DateTime<Utc>,
    pub significance: u8,
    /// Level-weighted correlation, 0..=1
    pub correlation: f64,
    /// significance * correlation
    pub contribution: f64,
    pub matched_lords: Vec<DashaLord>,
}

/// One evaluated birth-time candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub offset_minutes: i32,
    pub time: DateTime<Utc>,
    pub chart: NatalChart,
    pub score: f64,
    pub confidence: f64,
    pub event_matches: Vec<EventMatch>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartialReason {
    /// Candidates x anchors exceeded the evaluation ceiling
    EvaluationCeiling,
    /// The wall-clock budget expired
    TimeBudget,
    /// Some candidates were dropped after provider errors
    ProviderFailures,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectificationRequest {
    pub approx_datetime: DateTime<Utc>,
    pub window_minutes: u32,
    pub location: Location,
    pub event_anchors: Vec<EventAnchor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectificationResult {
    pub rectified_time: DateTime<Utc>,
    pub offset_minutes: i32,
    /// 0..=1
    pub confidence: f64,
    pub confidence_percent: f64,
    /// Best first, at most three
    pub top_candidates: Vec<Candidate>,
    pub partial: bool,
    pub partial_reasons: Vec<PartialReason>,
    pub evaluated_candidates: usize,
    pub total_candidates: usize,
}
