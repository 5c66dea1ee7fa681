//! Session configuration loaded from the environment.
//!
//! Accounting constants (VAT rate, handling surcharge, balance tolerance) are
//! fixed in the engine and deliberately absent here.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use libro_core::RECONCILIATION_TOLERANCE;
use libro_core::amount::parse_strict;
use libro_observability::{LogFormat, ParseLogFormatError};

pub const COMPANY_NAME_VAR: &str = "LIBRO_COMPANY_NAME";
pub const LOG_FORMAT_VAR: &str = "LIBRO_LOG_FORMAT";
pub const RECONCILIATION_TOLERANCE_VAR: &str = "LIBRO_RECONCILIATION_TOLERANCE";

const DEFAULT_COMPANY_NAME: &str = "GameVerse Studios";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("LIBRO_LOG_FORMAT: {0}")]
    LogFormat(#[from] ParseLogFormatError),

    #[error("LIBRO_RECONCILIATION_TOLERANCE: invalid tolerance {value:?}: {reason}")]
    Tolerance { value: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionConfig {
    /// Heading printed on reports.
    pub company_name: String,
    pub log_format: LogFormat,
    /// Allowed gap between a cash count and the amount it is checked against.
    pub reconciliation_tolerance: Decimal,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            company_name: DEFAULT_COMPANY_NAME.to_string(),
            log_format: LogFormat::default(),
            reconciliation_tolerance: RECONCILIATION_TOLERANCE,
        }
    }
}

impl SessionConfig {
    /// Read `LIBRO_*` variables; unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`SessionConfig::from_env`] over an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(name) = lookup(COMPANY_NAME_VAR).filter(|v| !v.trim().is_empty()) {
            config.company_name = name.trim().to_string();
        }

        if let Some(format) = lookup(LOG_FORMAT_VAR) {
            config.log_format = format.parse()?;
        }

        if let Some(raw) = lookup(RECONCILIATION_TOLERANCE_VAR) {
            let tolerance = parse_strict(&raw).map_err(|e| ConfigError::Tolerance {
                value: raw.clone(),
                reason: e.to_string(),
            })?;
            if tolerance.is_sign_negative() && !tolerance.is_zero() {
                return Err(ConfigError::Tolerance {
                    value: raw,
                    reason: "must not be negative".to_string(),
                });
            }
            config.reconciliation_tolerance = tolerance;
        }

        Ok(config)
    }
}
