use crate::config::ConfigError;
use crate::ranking::validation::{ListingValidationError, QueryValidationError};
use crate::telemetry::TelemetryError;
use std::fmt;

/// Failures surfaced by binaries that feed the engine.
///
/// The engine's scorers are total; everything here happens before or after them.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Decode(serde_json::Error),
    Query(QueryValidationError),
    Listing(ListingValidationError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Decode(err) => write!(f, "invalid json payload: {}", err),
            AppError::Query(err) => write!(f, "invalid search query: {}", err),
            AppError::Listing(err) => write!(f, "invalid listing: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Decode(err) => Some(err),
            AppError::Query(err) => Some(err),
            AppError::Listing(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}

impl From<QueryValidationError> for AppError {
    fn from(value: QueryValidationError) -> Self {
        Self::Query(value)
    }
}

impl From<ListingValidationError> for AppError {
    fn from(value: ListingValidationError) -> Self {
        Self::Listing(value)
    }
}
