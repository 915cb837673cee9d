use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub shortener: ShortenerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_backend")]
    pub backend: String,
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

/// Pricing knobs, handed to the pricing service explicitly rather than
/// read from process-wide state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Surcharge fraction applied to orders due within 24 hours, e.g. 0.20
    #[serde(default = "default_urgent_order_allowance")]
    pub urgent_order_allowance: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortenerConfig {
    /// Base URL of the external shortening service API
    #[serde(default = "default_shortener_api_base")]
    pub api_base: String,
    /// Long URL the short links resolve to (bot deep link)
    #[serde(default = "default_bot_link")]
    pub bot_link: String,
    /// Bearer token for the shortening service, empty when unauthenticated
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_shortener_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file path; empty or absent means stdout
    #[serde(default)]
    pub file: Option<String>,
    /// "plain" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_storage_backend() -> String {
    "sqlite".to_string()
}

fn default_database_url() -> String {
    "bakecake.db".to_string()
}

fn default_urgent_order_allowance() -> Decimal {
    // 20% surcharge
    Decimal::new(20, 2)
}

fn default_shortener_api_base() -> String {
    "https://api-ssl.bitly.com/v4".to_string()
}

fn default_bot_link() -> String {
    "https://t.me/bakecake_bot".to_string()
}

fn default_shortener_timeout_secs() -> u64 {
    2
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "plain".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            database_url: default_database_url(),
        }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            urgent_order_allowance: default_urgent_order_allowance(),
        }
    }
}

impl Default for ShortenerConfig {
    fn default() -> Self {
        Self {
            api_base: default_shortener_api_base(),
            bot_link: default_bot_link(),
            token: String::new(),
            timeout_secs: default_shortener_timeout_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file with environment variable fallback
    pub fn load() -> Self {
        let mut config = Self::load_from_file();
        config.override_with_env();
        config
    }

    fn load_from_file() -> Self {
        let config_paths = [
            "bakecake.toml",
            "config.toml",
            "config/bakecake.toml",
            "/etc/bakecake/config.toml",
        ];

        for path in &config_paths {
            if Path::new(path).exists() {
                debug!("Loading config from: {}", path);
                match fs::read_to_string(path) {
                    Ok(content) => match toml::from_str::<Config>(&content) {
                        Ok(config) => {
                            debug!("Successfully loaded config from: {}", path);
                            return config;
                        }
                        Err(e) => {
                            warn!("Failed to parse config file {}: {}", path, e);
                        }
                    },
                    Err(e) => {
                        warn!("Failed to read config file {}: {}", path, e);
                    }
                }
            }
        }

        debug!("No config file found, using defaults");
        Self::default()
    }

    fn override_with_env(&mut self) {
        // Storage config
        if let Ok(backend) = env::var("STORAGE_BACKEND") {
            self.storage.backend = backend;
        }
        if let Ok(database_url) = env::var("DATABASE_URL") {
            self.storage.database_url = database_url;
        }

        // Pricing config
        if let Ok(allowance) = env::var("URGENT_ORDER_ALLOWANCE") {
            match Decimal::from_str(&allowance) {
                Ok(value) => self.pricing.urgent_order_allowance = value,
                Err(e) => warn!("Invalid URGENT_ORDER_ALLOWANCE value: {}", e),
            }
        }

        // Shortener config
        if let Ok(api_base) = env::var("SHORTENER_API_BASE") {
            self.shortener.api_base = api_base;
        }
        if let Ok(bot_link) = env::var("BOT_LINK") {
            self.shortener.bot_link = bot_link;
        }
        if let Ok(token) = env::var("SHORTENER_TOKEN") {
            self.shortener.token = token;
        }
        if let Ok(timeout) = env::var("SHORTENER_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse() {
                self.shortener.timeout_secs = secs;
            }
        }

        // Logging config
        if let Ok(log_level) = env::var("RUST_LOG") {
            self.logging.level = log_level;
        }
    }

    /// Generate a sample TOML configuration file
    pub fn generate_sample_config() -> String {
        let sample_config = Config::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }
}

// Global configuration instance
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration instance
pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(Config::load)
}

/// Initialize the global configuration
pub fn init_config() {
    CONFIG.get_or_init(Config::load);
}
