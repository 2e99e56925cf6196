use crate::chart::Planet;
use thiserror::Error;

/// Errors surfaced by the strength, transit and rectification engines.
///
/// None of these are retried inside the engines; retry policy belongs to the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid chart data: {message}")]
    InvalidChartData { message: String },
    #[error("Missing position for {planet} in chart")]
    MissingPlanet { planet: Planet },
    #[error("Forecast horizon of {horizon_days} days is out of range (expected 1..={max_days})")]
    OutOfRangeHorizon { horizon_days: i64, max_days: i64 },
    #[error("Rectification window of {window_minutes} minutes is out of range (expected {min}..={max})")]
    OutOfRangeWindow { window_minutes: u32, min: u32, max: u32 },
    #[error("Rectification needs at least one event anchor")]
    InsufficientEventAnchors,
    #[error("Invalid event anchor #{index}: {message}")]
    InvalidEventAnchor { index: usize, message: String },
    #[error("Computation budget exceeded before any candidate completed: {message}")]
    ComputationBudgetExceeded { message: String },
    #[error("Invalid engine configuration: {message}")]
    InvalidConfiguration { message: String },
    #[error("Provider failure: {message}")]
    Provider { message: String },
}

impl EngineError {
    pub fn invalid_chart(message: impl Into<String>) -> Self {
        Self::InvalidChartData {
            message: message.into(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    /// True for every flavour of malformed or incomplete chart input.
    pub fn is_invalid_chart(&self) -> bool {
        matches!(self, Self::InvalidChartData { .. } | Self::MissingPlanet { .. })
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
