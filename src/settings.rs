//! Configuration Module
//! Layered settings: built-in defaults, optional `econ_monitor.toml`, then
//! `ECON_MONITOR_*` environment variables.

use serde::Deserialize;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use thiserror::Error;

/// Optional settings file looked up in the working directory.
pub const CONFIG_FILE: &str = "econ_monitor";
/// Prefix for environment overrides, e.g. `ECON_MONITOR_TRADE_DATA_PATH`.
pub const ENV_PREFIX: &str = "ECON_MONITOR";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Runtime settings for both reports.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// ISO3 code queried at the indicator source.
    pub country_code: String,
    /// Display name used in titles and the flow diagram's centre node.
    pub country_label: String,
    pub inflation_indicator: String,
    pub unemployment_indicator: String,
    pub start_year: i32,
    pub end_year: i32,
    pub api_base_url: String,
    pub trade_data_path: PathBuf,
    /// Publication credited for the trade file, shown under the flow diagram.
    pub trade_source_label: String,
    pub trade_source_url: String,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            country_code: "IND".to_string(),
            country_label: "India".to_string(),
            inflation_indicator: "FP.CPI.TOTL.ZG".to_string(),
            unemployment_indicator: "SL.UEM.TOTL.ZS".to_string(),
            start_year: 2000,
            end_year: 2023,
            api_base_url: "https://api.worldbank.org/v2".to_string(),
            trade_data_path: PathBuf::from("rbi_data.csv"),
            trade_source_label:
                "RBI Database on Indian Economy (DBIE): Handbook of Statistics, Tables 116 & 118"
                    .to_string(),
            trade_source_url: "https://cims.rbi.org.in/".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from defaults, the optional file and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let settings = config::Config::builder()
            .set_default("country_code", defaults.country_code)?
            .set_default("country_label", defaults.country_label)?
            .set_default("inflation_indicator", defaults.inflation_indicator)?
            .set_default("unemployment_indicator", defaults.unemployment_indicator)?
            .set_default("start_year", i64::from(defaults.start_year))?
            .set_default("end_year", i64::from(defaults.end_year))?
            .set_default("api_base_url", defaults.api_base_url)?
            .set_default(
                "trade_data_path",
                defaults.trade_data_path.to_string_lossy().to_string(),
            )?
            .set_default("trade_source_label", defaults.trade_source_label)?
            .set_default("trade_source_url", defaults.trade_source_url)?
            .set_default("log_level", defaults.log_level)?
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Check cross-field constraints the deserializer cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_year > self.end_year {
            return Err(ConfigError::Validation(format!(
                "start_year ({}) is after end_year ({})",
                self.start_year, self.end_year
            )));
        }
        let required = [
            ("country_code", &self.country_code),
            ("inflation_indicator", &self.inflation_indicator),
            ("unemployment_indicator", &self.unemployment_indicator),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{} must not be empty", name)));
            }
        }
        Ok(())
    }

    /// Inclusive year window queried for both indicators.
    pub fn years(&self) -> RangeInclusive<i32> {
        self.start_year..=self.end_year
    }
}
