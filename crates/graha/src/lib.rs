//! Deterministic planetary timing and strength engines.
//!
//! - [`shadbala::ShadbalaEngine`]: six-fold strength of the sapta grahas.
//! - [`transit::TransitEngine`]: transit-to-natal aspects, house transits and
//!   sign-change forecasts.
//! - [`rectification::RectificationEngine`]: ranks birth-time candidates by how
//!   well the active dasha lords explain a set of life events.
//!
//! Chart construction and dasha lookup are injected through
//! [`ephemeris::ChartProvider`], [`ephemeris::EphemerisProvider`] and
//! [`vedic::DashaProvider`]; linear and Vimshottari reference implementations
//! are included.

pub mod aspects;
pub mod chart;
pub mod config;
pub mod dignities;
pub mod ephemeris;
pub mod error;
pub mod geometry;
pub mod rectification;
pub mod shadbala;
pub mod transit;
pub mod vedic;

pub use aspects::{Aspect, AspectCalculator, AspectKind, OrbTable, StrengthBand};
pub use chart::{Location, NatalChart, Planet, PlanetPosition, ALL_PLANETS, SAPTA_GRAHAS};
pub use config::{EngineConfig, RequiredStrengthTable};
pub use ephemeris::{ChartProvider, EphemerisProvider, LinearEphemeris};
pub use error::{EngineError, EngineResult};
pub use rectification::{
    Candidate, EventAnchor, EventType, PartialReason, RectificationEngine, RectificationRequest,
    RectificationResult,
};
pub use shadbala::{ShadbalaEngine, ShadbalaReport, ShadbalaRequest, StrengthBreakdown, StrengthRating};
pub use transit::{SignChangeEvent, TransitEngine, TransitReport, TransitRequest};
pub use vedic::{ActiveDasha, DashaLevel, DashaLord, DashaProvider, VimshottariDashaProvider};
