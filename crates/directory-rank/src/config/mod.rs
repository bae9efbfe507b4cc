use std::env;
use std::fmt;

use crate::ranking::FeaturedPlacementConfig;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for binaries driving the engine.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub placement: FeaturedPlacementConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let defaults = FeaturedPlacementConfig::default();
        let max_featured = match env::var("RANKING_FEATURED_MAX") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidFeaturedMax { value: raw })?,
            Err(_) => defaults.max_featured,
        };
        let positions = match env::var("RANKING_FEATURED_POSITIONS") {
            Ok(raw) => parse_positions(&raw)?,
            Err(_) => defaults.positions,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            placement: FeaturedPlacementConfig::new(max_featured, positions),
        })
    }
}

/// Parse a comma-separated list of 1-indexed result positions.
pub fn parse_positions(raw: &str) -> Result<Vec<usize>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.parse::<usize>() {
            Ok(position) if position >= 1 => Ok(position),
            _ => Err(ConfigError::InvalidFeaturedPosition {
                value: entry.to_string(),
            }),
        })
        .collect()
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidFeaturedMax { value: String },
    InvalidFeaturedPosition { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidFeaturedMax { value } => write!(
                f,
                "RANKING_FEATURED_MAX must be a non-negative integer (found '{value}')"
            ),
            ConfigError::InvalidFeaturedPosition { value } => write!(
                f,
                "RANKING_FEATURED_POSITIONS entries must be integers >= 1 (found '{value}')"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
