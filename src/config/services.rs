//! Remote service settings

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Look up an API key: the config value wins, then the named env var
fn resolve_key(value: &str, env_var: &str) -> Option<String> {
    let value = value.trim();
    if !value.is_empty() {
        return Some(value.to_string());
    }
    if env_var.is_empty() {
        return None;
    }
    std::env::var(env_var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Chat advisor settings (OpenAI-compatible chat completions API)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmSettings {
    /// API base URL; `/chat/completions` is appended
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    #[serde(default = "default_llm_model")]
    pub model: String,

    #[serde(default = "default_llm_temperature")]
    pub temperature: f32,

    #[serde(default = "default_llm_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_llm_top_p")]
    pub top_p: f32,

    /// API key; leave empty to read `api_key_env`
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_llm_api_key_env")]
    pub api_key_env: String,
}

fn default_llm_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_llm_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_llm_temperature() -> f32 {
    0.7 // lower than default for consistent agricultural advice
}

fn default_llm_max_tokens() -> u32 {
    1024
}

fn default_llm_top_p() -> f32 {
    1.0
}

fn default_llm_api_key_env() -> String {
    "GROQ_API_KEY".to_string()
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            model: default_llm_model(),
            temperature: default_llm_temperature(),
            max_tokens: default_llm_max_tokens(),
            top_p: default_llm_top_p(),
            api_key: String::new(),
            api_key_env: default_llm_api_key_env(),
        }
    }
}

impl LlmSettings {
    pub fn api_key(&self) -> Option<String> {
        resolve_key(&self.api_key, &self.api_key_env)
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Weather and geolocation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherSettings {
    /// Current-conditions endpoint
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,

    /// IP geolocation endpoint (ip-api.com compatible)
    #[serde(default = "default_ip_location_url")]
    pub ip_location_url: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_weather_api_key_env")]
    pub api_key_env: String,
}

fn default_weather_base_url() -> String {
    "https://api.weatherapi.com/v1/current.json".to_string()
}

fn default_ip_location_url() -> String {
    "http://ip-api.com/json/".to_string()
}

fn default_weather_api_key_env() -> String {
    "WEATHER_API_KEY".to_string()
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            ip_location_url: default_ip_location_url(),
            api_key: String::new(),
            api_key_env: default_weather_api_key_env(),
        }
    }
}

impl WeatherSettings {
    pub fn api_key(&self) -> Option<String> {
        resolve_key(&self.api_key, &self.api_key_env)
    }
}

/// Market price settings (data.gov.in daily mandi prices)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSettings {
    /// Resource endpoint
    #[serde(default = "default_market_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_market_api_key_env")]
    pub api_key_env: String,

    /// Region used when geolocation cannot determine one
    #[serde(default = "default_market_state")]
    pub default_state: String,

    /// Records per request
    #[serde(default = "default_market_limit")]
    pub limit: u32,

    /// IP geolocation endpoint used to pick the region
    #[serde(default = "default_ip_location_url")]
    pub ip_location_url: String,
}

fn default_market_base_url() -> String {
    "https://api.data.gov.in/resource/9ef84268-d588-465a-a308-a864a43d0070".to_string()
}

fn default_market_api_key_env() -> String {
    "DATA_GOV_API_KEY".to_string()
}

fn default_market_state() -> String {
    "Bihar".to_string()
}

fn default_market_limit() -> u32 {
    50
}

impl Default for MarketSettings {
    fn default() -> Self {
        Self {
            base_url: default_market_base_url(),
            api_key: String::new(),
            api_key_env: default_market_api_key_env(),
            default_state: default_market_state(),
            limit: default_market_limit(),
            ip_location_url: default_ip_location_url(),
        }
    }
}

impl MarketSettings {
    pub fn api_key(&self) -> Option<String> {
        resolve_key(&self.api_key, &self.api_key_env)
    }
}

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSettings {
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Read timeout; the market API is slow, keep this generous
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_read_timeout_secs() -> u64 {
    10
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            read_timeout_secs: default_read_timeout_secs(),
        }
    }
}

impl HttpSettings {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}
