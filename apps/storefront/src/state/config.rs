//! # Configuration State
//!
//! Store branding, currency display and the coupon table, loaded at startup.
//!
//! ## Configuration Sources (later overrides earlier)
//! 1. Defaults (this file)
//! 2. Config file (`storefront.toml`, or the `--config` path)
//! 3. Environment variables (`STOREFRONT_*`)
//!
//! ## Config File Format
//! ```toml
//! store_name = "RestoShop Indiranagar"
//! currency_symbol = "₹"
//!
//! [[coupons]]
//! code = "WELCOME10"
//! kind = "percent"
//! value = 1000          # basis points
//! label = "WELCOME10 (10% off)"
//!
//! [[coupons]]
//! code = "SAVE100"
//! kind = "flat"
//! value = 10000         # paise
//! ```
//!
//! Configuration is read-only after startup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use storefront_core::coupon::builtin_rules;
use storefront_core::money::Money;
use storefront_core::{CatalogError, CouponBook, CouponRule};
use thiserror::Error;
use tracing::{debug, info};

/// Result type alias for config loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Why a configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file exists but could not be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML or has the wrong shape.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A coupon rule failed validation.
    #[error("Invalid coupon table: {0}")]
    Coupons(#[from] CatalogError),

    /// Any other invalid value.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Store name (navbar and receipts)
    pub store_name: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places shown. Amounts are always held in paise
    /// (two digits) and rescaled for display.
    pub currency_decimals: u8,

    /// Coupon table offered to customers
    pub coupons: Vec<CouponRule>,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Store: "RestoShop"
    /// - Currency: INR (₹), 2 decimals
    /// - Coupons: WELCOME10, FOODIE20, SAVE100
    fn default() -> Self {
        ConfigState {
            store_name: "RestoShop".to_string(),
            currency_code: "INR".to_string(),
            currency_symbol: "\u{20b9}".to_string(),
            currency_decimals: 2,
            coupons: builtin_rules(),
        }
    }
}

impl ConfigState {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// An explicit `config_path` that does not exist is an error; a missing
    /// file at the platform default location just means defaults.
    pub fn load(config_path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML document. Missing keys keep their defaults.
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading storefront config from file");
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::Invalid("store_name must not be empty".into()));
        }

        if self.currency_decimals > 4 {
            return Err(ConfigError::Invalid(format!(
                "currency_decimals must be at most 4, got {}",
                self.currency_decimals
            )));
        }

        self.coupon_book()?;
        Ok(())
    }

    /// Builds the validated coupon table.
    pub fn coupon_book(&self) -> ConfigResult<CouponBook> {
        Ok(CouponBook::new(self.coupons.clone())?)
    }

    /// Applies environment variable overrides.
    ///
    /// ## Environment Variables
    /// - `STOREFRONT_STORE_NAME`
    /// - `STOREFRONT_CURRENCY_SYMBOL`
    /// - `STOREFRONT_CURRENCY_CODE`
    fn apply_env_overrides(&mut self) {
        if let Ok(name) = std::env::var("STOREFRONT_STORE_NAME") {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store_name = name;
        }

        if let Ok(symbol) = std::env::var("STOREFRONT_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Ok(code) = std::env::var("STOREFRONT_CURRENCY_CODE") {
            self.currency_code = code;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "restoshop", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    /// Formats an amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    /// use storefront_lib::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(29900)), "₹299.00");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let cents = amount.cents();
        let decimals = u32::from(self.currency_decimals);

        // rescale from paise; fewer than two digits rounds half away from zero
        let scaled = if decimals >= 2 {
            cents * 10_i64.pow(decimals - 2)
        } else {
            let step = 10_i64.pow(2 - decimals);
            let rounded = (cents.abs() + step / 2) / step;
            if cents < 0 { -rounded } else { rounded }
        };

        let divisor = 10_i64.pow(decimals);
        let whole = scaled / divisor;
        let frac = (scaled % divisor).abs();

        format!(
            "{}{}{}",
            if scaled < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = usize::from(self.currency_decimals)
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}
