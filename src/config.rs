use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Top-level configuration for the assistant core
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// LLM provider used by the AI extraction stage and transcription
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Webpage fetching behavior
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Domain constants for the risk analyzer
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Configuration for the LLM completion service
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Model identifier (e.g. "gpt-4o-mini")
    #[serde(default = "default_model")]
    pub model: String,
    /// API key for authentication (can also be set via OPENAI_API_KEY)
    pub api_key: Option<String>,
    /// Base URL for the API endpoint (for custom or proxy endpoints)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key: None,
            base_url: default_base_url(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Configuration for webpage fetching
#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds, applied once per extraction attempt
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Client identity string sent with every page request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Domain constants for the risk analyzer. These are fixed conversion
/// factors and thresholds, named here so tests can override them; they are
/// not meant to vary per call.
#[derive(Debug, Deserialize, Clone)]
pub struct AnalysisConfig {
    /// kg CO2e emitted per km driven, used for the driving equivalent
    #[serde(default = "default_co2_per_km_kg")]
    pub co2_per_km_kg: f64,
    /// Remaining shelf-life percentage at or below which an item is urgent
    #[serde(default = "default_urgent_shelf_life_pct")]
    pub urgent_shelf_life_pct: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            co2_per_km_kg: default_co2_per_km_kg(),
            urgent_shelf_life_pct: default_urgent_shelf_life_pct(),
        }
    }
}

// Default value functions
fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_co2_per_km_kg() -> f64 {
    0.165
}

fn default_urgent_shelf_life_pct() -> f64 {
    5.0
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with GREENBITE__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: GREENBITE__PROVIDER__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            // Use double underscore for nested: GREENBITE__FETCH__TIMEOUT_SECS
            .add_source(
                Environment::with_prefix("GREENBITE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
