//! Configuration management for the BMI widget runtime
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: BMI__)

use crate::error::{RuntimeError, RuntimeResult};
use bmi_widget_shared::debounce::{MAX_DEBOUNCE_WINDOW, MIN_DEBOUNCE_WINDOW};
use bmi_widget_shared::{Gender, Settings, UnitSystem};
use config::builder::{ConfigBuilder, DefaultState};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Runtime configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    pub debounce: DebounceConfig,
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Input debounce configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebounceConfig {
    /// Quiet period before an input change is recalculated
    pub window_ms: u64,
}

/// Initial toggle selections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub unit: UnitSystem,
    pub gender: Gender,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of pretty output
    pub json: bool,
    /// Overrides the default `EnvFilter` directives when set
    #[serde(default)]
    pub filter: Option<String>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            debounce: DebounceConfig {
                window_ms: MAX_DEBOUNCE_WINDOW.as_millis() as u64,
            },
            defaults: DefaultsConfig {
                unit: UnitSystem::Metric,
                gender: Gender::Male,
            },
            logging: LoggingConfig::default(),
        }
    }
}

impl WidgetConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with BMI__ prefix
    pub fn load() -> RuntimeResult<Self> {
        // Load environment variables from .env file
        dotenvy::dotenv().ok();

        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let builder = Self::defaults()?
            // Load from environment-specific config file
            .add_source(config::File::with_name(&config_file).required(false))
            // Override with environment variables (BMI__ prefix)
            // e.g., BMI__DEBOUNCE__WINDOW_MS=150 sets debounce.window_ms
            .add_source(config::Environment::with_prefix("BMI").separator("__"));

        Self::from_builder(builder)
    }

    /// Builder seeded with the in-code defaults
    fn defaults() -> RuntimeResult<ConfigBuilder<DefaultState>> {
        let defaults = config::Config::try_from(&WidgetConfig::default())?;
        Ok(config::Config::builder().add_source(defaults))
    }

    /// Build, deserialize and validate
    fn from_builder(builder: ConfigBuilder<DefaultState>) -> RuntimeResult<Self> {
        let config: WidgetConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the widget cannot honor
    pub fn validate(&self) -> Result<(), RuntimeError> {
        let window = self.debounce_window();
        if window < MIN_DEBOUNCE_WINDOW || window > MAX_DEBOUNCE_WINDOW {
            return Err(RuntimeError::InvalidDebounceWindow(self.debounce.window_ms));
        }
        Ok(())
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce.window_ms)
    }

    /// Initial settings for a new widget session
    pub fn settings(&self) -> Settings {
        Settings::new(self.defaults.unit, self.defaults.gender)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}
