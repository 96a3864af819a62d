use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::i18n::Language;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Validation(String),
}

/// Timings and limits of the core. The shell may override these when it
/// creates the model (tests shorten nothing; timers are driven by effects).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub default_language: Language,
    pub splash_ms: u64,
    pub page_transition_ms: u64,
    pub login_delay_ms: u64,
    pub scan_tick_ms: u64,
    pub scan_step_percent: u8,
    pub db_sync_tick_ms: u64,
    pub db_sync_step_percent: u8,
    pub max_emergency_contacts: usize,
    pub phone_country_prefix: String,
    pub phone_digits: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_language: Language::English,
            splash_ms: 2_000,
            page_transition_ms: 300,
            login_delay_ms: 1_500,
            scan_tick_ms: 300,
            scan_step_percent: 10,
            db_sync_tick_ms: 600,
            db_sync_step_percent: 20,
            max_emergency_contacts: 5,
            phone_country_prefix: "+91".into(),
            phone_digits: 10,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan_step_percent == 0 || self.scan_step_percent > 100 {
            return Err(ConfigError::Validation(
                "scan_step_percent must be in 1..=100".into(),
            ));
        }
        if self.db_sync_step_percent == 0 || self.db_sync_step_percent > 100 {
            return Err(ConfigError::Validation(
                "db_sync_step_percent must be in 1..=100".into(),
            ));
        }
        if self.max_emergency_contacts == 0 {
            return Err(ConfigError::Validation(
                "max_emergency_contacts must be > 0".into(),
            ));
        }
        if self.phone_digits == 0 {
            return Err(ConfigError::Validation("phone_digits must be > 0".into()));
        }
        if !self.phone_country_prefix.starts_with('+') {
            return Err(ConfigError::Validation(
                "phone_country_prefix must start with '+'".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_step() {
        let config = AppConfig {
            scan_step_percent: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_prefix_without_plus() {
        let config = AppConfig {
            phone_country_prefix: "91".into(),
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn default_language_reads_as_code() {
        let mut value = serde_json::to_value(AppConfig::default()).unwrap();
        assert_eq!(value["default_language"], "en");
        value["default_language"] = "te".into();
        let parsed: AppConfig = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.default_language, Language::Telugu);
    }
}
