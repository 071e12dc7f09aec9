//! Local weather for the farmer's position.
//!
//! Coordinates come from the caller (GPS) when available, otherwise from IP
//! geolocation. Nothing here returns an error to the caller: a failed lookup
//! is `None` and a warning in the log.

mod format;
mod report;

pub use format::{AirQualityStatus, farming_advice, format_description, format_location};
pub use report::{AirQuality, Condition, Current, ReportLocation, WeatherReport};

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::WeatherSettings;
use crate::geo::{self, Coords, GeoError};
use crate::transport::{HttpTransport, TransportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationSource {
    Gps,
    Ip,
}

/// Resolved position plus whatever weather could be fetched for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationWeather {
    pub coords: Coords,
    pub source: LocationSource,
    pub report: Option<WeatherReport>,
}

#[derive(Debug, thiserror::Error)]
enum WeatherError {
    #[error("no weather API key configured")]
    MissingKey,

    #[error(transparent)]
    Transport(#[from] TransportError),
}

pub struct WeatherService {
    settings: WeatherSettings,
    api_key: Option<String>,
    transport: Arc<dyn HttpTransport>,
}

impl WeatherService {
    pub fn new(settings: WeatherSettings, transport: Arc<dyn HttpTransport>) -> Self {
        let api_key = settings.api_key();
        Self {
            settings,
            api_key,
            transport,
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Current conditions with air quality for a position
    pub fn fetch(&self, coords: Coords) -> Option<WeatherReport> {
        match self.try_fetch(coords) {
            Ok(report) => Some(report),
            Err(e) => {
                warn!("Weather lookup for {} failed: {}", coords.query(), e);
                None
            }
        }
    }

    fn try_fetch(&self, coords: Coords) -> Result<WeatherReport, WeatherError> {
        let key = self.api_key.as_deref().ok_or(WeatherError::MissingKey)?;
        let q = coords.query();
        let raw = self.transport.get(
            &self.settings.base_url,
            &[("key", key), ("q", &q), ("aqi", "yes")],
        )?;
        let report = serde_json::from_str(&raw).map_err(TransportError::from)?;
        Ok(report)
    }

    /// Position from IP geolocation
    pub fn locate(&self) -> Result<Coords, GeoError> {
        geo::locate_by_ip(self.transport.as_ref(), &self.settings.ip_location_url)
            .map(|location| location.coords)
    }

    /// Resolve a position (GPS first, IP second) and fetch its weather.
    ///
    /// `None` only when no position could be found; a failed weather call
    /// still yields the position with `report: None`.
    pub fn locate_and_fetch(&self, gps: Option<Coords>) -> Option<LocationWeather> {
        let (coords, source) = match gps {
            Some(coords) => {
                debug!("Using GPS position {}", coords.query());
                (coords, LocationSource::Gps)
            }
            None => match self.locate() {
                Ok(coords) => {
                    info!("Location obtained via IP: {}", coords.query());
                    (coords, LocationSource::Ip)
                }
                Err(e) => {
                    warn!("Could not determine location: {}", e);
                    return None;
                }
            },
        };

        Some(LocationWeather {
            coords,
            source,
            report: self.fetch(coords),
        })
    }
}
