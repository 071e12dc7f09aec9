//! Application context shared by the CLI commands.
//!
//! Built once at startup from the loaded [`Config`]; owns the HTTP transport,
//! the three remote collaborators and the last resolved location/weather.

use std::sync::Arc;

use crate::config::Config;
use crate::geo::Coords;
use crate::llm::{AgriAdvisor, WeatherContext};
use crate::market::MarketService;
use crate::transport::{HttpTransport, UreqTransport};
use crate::weather::{LocationWeather, WeatherService};

/// Locale used when the process environment does not name one
pub const FALLBACK_LOCALE: &str = "en-IN";

pub struct AppContext {
    config: Config,
    advisor: AgriAdvisor,
    weather: WeatherService,
    market: MarketService,
    location_weather: Option<LocationWeather>,
}

impl AppContext {
    pub fn new(config: Config, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            advisor: AgriAdvisor::new(config.llm.clone(), Arc::clone(&transport)),
            weather: WeatherService::new(config.weather.clone(), Arc::clone(&transport)),
            market: MarketService::new(config.market.clone(), transport),
            config,
            location_weather: None,
        }
    }

    /// Context backed by a real `ureq` transport with the configured timeouts
    pub fn from_config(config: Config) -> Self {
        let transport = UreqTransport::new(
            config.http.connect_timeout(),
            config.http.read_timeout(),
        );
        Self::new(config, Arc::new(transport))
    }

    /// Drop the LLM key so the advisor answers from the offline table
    pub fn into_offline(mut self) -> Self {
        self.advisor = self.advisor.with_api_key(None);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn advisor(&self) -> &AgriAdvisor {
        &self.advisor
    }

    pub fn weather(&self) -> &WeatherService {
        &self.weather
    }

    pub fn market(&self) -> &MarketService {
        &self.market
    }

    /// Resolve position and weather, replacing whatever was loaded before
    pub fn refresh_location_weather(&mut self, gps: Option<Coords>) -> Option<&LocationWeather> {
        self.location_weather = self.weather.locate_and_fetch(gps);
        self.location_weather.as_ref()
    }

    pub fn location_weather(&self) -> Option<&LocationWeather> {
        self.location_weather.as_ref()
    }

    /// Weather facts for the chat advisor, if a report is loaded
    pub fn weather_context(&self) -> Option<WeatherContext> {
        self.location_weather
            .as_ref()
            .and_then(|lw| lw.report.as_ref())
            .map(|report| report.to_context())
    }
}

/// The host locale from `LC_ALL`, `LC_MESSAGES` or `LANG`, ignoring the
/// POSIX `C` locale
pub fn host_locale() -> String {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty() && value != "C" && value != "POSIX")
        .unwrap_or_else(|| FALLBACK_LOCALE.to_string())
}
