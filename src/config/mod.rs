//! Configuration management for PriceCalc
//!
//! Loads from YAML files + environment variables via .env

mod types;

pub use types::*;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub defaults: DefaultsConfig,
    pub sample: SampleConfig,
    pub persistence: PersistenceConfig,
    pub logging: LoggingConfig,
}

/// Calculator values used on first start and after a reset
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultsConfig {
    /// Gateway fee percentages per method
    pub mada_fee: f64,
    pub visa_fee: f64,
    pub stc_fee: f64,
    pub tabby_fee: f64,
    pub tamara_fee: f64,
    /// Fixed fee per transaction
    pub fixed_fee: f64,
    /// VAT percent
    pub vat_rate: f64,
    pub mada_cap_enabled: bool,
    pub mada_cap: f64,
    pub cogs: f64,
    pub shipping: f64,
    pub target_profit: f64,
    /// "single" or "mix"
    pub payment_mode: String,
    pub single_method: String,
    /// Volume shares in percent
    pub mada_share: f64,
    pub visa_share: f64,
    pub stc_share: f64,
    pub tabby_share: f64,
    pub tamara_share: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            mada_fee: 1.0,
            visa_fee: 2.2,
            stc_fee: 1.3,
            tabby_fee: 3.5,
            tamara_fee: 3.5,
            fixed_fee: 1.0,
            vat_rate: 15.0,
            mada_cap_enabled: false,
            mada_cap: 200.0,
            cogs: 0.0,
            shipping: 0.0,
            target_profit: 0.0,
            payment_mode: "single".to_string(),
            single_method: "mada".to_string(),
            mada_share: 40.0,
            visa_share: 30.0,
            stc_share: 10.0,
            tabby_share: 10.0,
            tamara_share: 10.0,
        }
    }
}

/// Example product loaded by the `sample` command
#[derive(Debug, Clone, Deserialize)]
pub struct SampleConfig {
    pub cogs: f64,
    pub shipping: f64,
    pub target_profit: f64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            cogs: 100.0,
            shipping: 20.0,
            target_profit: 50.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersistenceConfig {
    /// Remember the last inputs between runs
    pub enabled: bool,
    /// Data directory
    pub data_dir: String,
    /// File holding the last inputs
    pub file_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset
    pub level: String,
    /// Emit JSON log lines
    pub json: bool,
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        // Load .env file first
        dotenvy::dotenv().ok();

        let d = DefaultsConfig::default();
        let s = SampleConfig::default();

        let config = Config::builder()
            // Calculator defaults
            .set_default("defaults.mada_fee", d.mada_fee)?
            .set_default("defaults.visa_fee", d.visa_fee)?
            .set_default("defaults.stc_fee", d.stc_fee)?
            .set_default("defaults.tabby_fee", d.tabby_fee)?
            .set_default("defaults.tamara_fee", d.tamara_fee)?
            .set_default("defaults.fixed_fee", d.fixed_fee)?
            .set_default("defaults.vat_rate", d.vat_rate)?
            .set_default("defaults.mada_cap_enabled", d.mada_cap_enabled)?
            .set_default("defaults.mada_cap", d.mada_cap)?
            .set_default("defaults.cogs", d.cogs)?
            .set_default("defaults.shipping", d.shipping)?
            .set_default("defaults.target_profit", d.target_profit)?
            .set_default("defaults.payment_mode", d.payment_mode)?
            .set_default("defaults.single_method", d.single_method)?
            .set_default("defaults.mada_share", d.mada_share)?
            .set_default("defaults.visa_share", d.visa_share)?
            .set_default("defaults.stc_share", d.stc_share)?
            .set_default("defaults.tabby_share", d.tabby_share)?
            .set_default("defaults.tamara_share", d.tamara_share)?
            // Sample product
            .set_default("sample.cogs", s.cogs)?
            .set_default("sample.shipping", s.shipping)?
            .set_default("sample.target_profit", s.target_profit)?
            // Persistence defaults
            .set_default("persistence.enabled", true)?
            .set_default("persistence.data_dir", "./data")?
            .set_default("persistence.file_name", "pricing_calculator.json")?
            // Logging defaults
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // Override with environment variables (PRICECALC__*)
            .add_source(Environment::with_prefix("PRICECALC").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        Ok(app_config)
    }

    /// Short summary for logging
    pub fn digest(&self) -> String {
        format!(
            "mode={} method={} vat={:.2}% cap={} persistence={} data_dir={}",
            self.defaults.payment_mode,
            self.defaults.single_method,
            self.defaults.vat_rate,
            if self.defaults.mada_cap_enabled {
                format!("{:.2}", self.defaults.mada_cap)
            } else {
                "off".to_string()
            },
            self.persistence.enabled,
            self.persistence.data_dir
        )
    }
}

impl std::fmt::Display for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.digest())
    }
}
