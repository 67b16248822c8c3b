use std::env;
use std::fmt;

use chrono::NaiveDate;

use crate::matching::{MatchFilters, MatchingConfig, RecommendationLevel, ScoreWeights};

/// Distinguishes runtime behavior for different stages of the tool.
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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub matching: MatchingSettings,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );
        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let defaults = ScoreWeights::default();
        let weights = ScoreWeights {
            eligibility: parse_var("MATCH_WEIGHT_ELIGIBILITY")?.unwrap_or(defaults.eligibility),
            competition: parse_var("MATCH_WEIGHT_COMPETITION")?.unwrap_or(defaults.competition),
            priority: parse_var("MATCH_WEIGHT_PRIORITY")?.unwrap_or(defaults.priority),
            regional: parse_var("MATCH_WEIGHT_REGIONAL")?.unwrap_or(defaults.regional),
        };
        if let Some((name, value)) = [
            ("MATCH_WEIGHT_ELIGIBILITY", weights.eligibility),
            ("MATCH_WEIGHT_COMPETITION", weights.competition),
            ("MATCH_WEIGHT_PRIORITY", weights.priority),
            ("MATCH_WEIGHT_REGIONAL", weights.regional),
        ]
        .into_iter()
        .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            return Err(ConfigError::InvalidValue {
                name,
                value: value.to_string(),
            });
        }

        let filters = MatchFilters {
            only_eligible: parse_bool("MATCH_ONLY_ELIGIBLE")?.unwrap_or(false),
            min_recommendation: parse_var::<RecommendationLevel>("MATCH_MIN_RECOMMENDATION")?,
            max_results: parse_var("MATCH_MAX_RESULTS")?,
        };
        let income_year = parse_var("MATCH_INCOME_YEAR")?;

        Ok(Self {
            environment,
            matching: MatchingSettings {
                weights,
                filters,
                income_year,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Matching knobs that come from the environment; the evaluation date does not.
#[derive(Debug, Clone)]
pub struct MatchingSettings {
    pub weights: ScoreWeights,
    pub filters: MatchFilters,
    pub income_year: Option<i32>,
}

impl MatchingSettings {
    pub fn matching_config(&self, as_of: NaiveDate) -> MatchingConfig {
        MatchingConfig {
            weights: self.weights,
            filters: self.filters.clone(),
            income_year: self.income_year,
            ..MatchingConfig::new(as_of)
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

fn parse_var<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { name, value: raw }),
        Err(_) => Ok(None),
    }
}

fn parse_bool(name: &'static str) -> Result<Option<bool>, ConfigError> {
    match env::var(name) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            _ => Err(ConfigError::InvalidValue { name, value: raw }),
        },
        Err(_) => Ok(None),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { name, value } => {
                write!(f, "{name} has an invalid value '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
