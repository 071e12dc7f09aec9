//! Daily mandi prices for the farmer's state.
//!
//! Queries the data.gov.in daily price resource filtered by state. The state
//! comes from the caller or from IP geolocation. Any failure, including an
//! empty result, produces the fixed fallback list so the screen always has
//! something to show.

mod emoji;
mod format;
mod price;

pub use emoji::{crop_emoji, formatted_crop_name, has_specific_emoji};
pub use format::{best_price, format_market_date, format_price, group_by_commodity, recent_prices};
pub use price::{MarketPrice, MarketRecord, Trend, UNIT_PER_QUINTAL, fallback_prices, parse_arrival_date};

use std::sync::Arc;

use chrono::Local;
use tracing::{debug, info, warn};

use crate::config::MarketSettings;
use crate::geo;
use crate::transport::{HttpTransport, TransportError};
use price::MarketApiResponse;

pub const POPULAR_CROPS: &[&str] = &["Wheat", "Rice", "Potato", "Onion", "Tomato", "Cotton"];

/// Limit used for commodity searches, wider than the default page
const COMMODITY_SEARCH_LIMIT: u32 = 100;

#[derive(Debug, thiserror::Error)]
enum MarketError {
    #[error("no market API key configured")]
    MissingKey,

    #[error("market API returned status '{status}': {message}")]
    Status { status: String, message: String },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

pub struct MarketService {
    settings: MarketSettings,
    api_key: Option<String>,
    transport: Arc<dyn HttpTransport>,
}

impl MarketService {
    pub fn new(settings: MarketSettings, transport: Arc<dyn HttpTransport>) -> Self {
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

    /// State to filter by: IP geolocation, else the configured default
    pub fn resolve_state(&self) -> String {
        match geo::locate_by_ip(self.transport.as_ref(), &self.settings.ip_location_url) {
            Ok(location) if !location.state.is_empty() => location.state,
            Ok(_) => self.settings.default_state.clone(),
            Err(e) => {
                warn!(
                    "Region lookup failed, using {}: {}",
                    self.settings.default_state, e
                );
                self.settings.default_state.clone()
            }
        }
    }

    /// Prices for `state` (or the caller's region), never empty
    pub fn fetch_prices(&self, state: Option<&str>, limit: Option<u32>) -> Vec<MarketPrice> {
        let state = match state {
            Some(s) if !s.trim().is_empty() => s.trim().to_string(),
            _ => self.resolve_state(),
        };
        let limit = limit.unwrap_or(self.settings.limit);

        match self.query(&state, limit) {
            Ok(records) if records.is_empty() => {
                info!("No market data found for state: {}", state);
                fallback_prices(Local::now().date_naive())
            }
            Ok(records) => {
                let prices: Vec<MarketPrice> = records
                    .into_iter()
                    .enumerate()
                    .map(|(index, record)| MarketPrice::from_record(record, index))
                    .collect();
                info!("Fetched {} market prices for {}", prices.len(), state);
                prices
            }
            Err(e) => {
                warn!("Market price lookup for {} failed: {}", state, e);
                fallback_prices(Local::now().date_naive())
            }
        }
    }

    fn query(&self, state: &str, limit: u32) -> Result<Vec<MarketRecord>, MarketError> {
        let key = self.api_key.as_deref().ok_or(MarketError::MissingKey)?;
        let limit = limit.to_string();
        debug!("Querying market prices for {} (limit {})", state, limit);

        let raw = self.transport.get(
            &self.settings.base_url,
            &[
                ("api-key", key),
                ("format", "json"),
                ("filters[state.keyword]", state),
                ("limit", &limit),
                ("offset", "0"),
            ],
        )?;
        let response: MarketApiResponse = serde_json::from_str(&raw).map_err(TransportError::from)?;

        if response.status != "ok" {
            return Err(MarketError::Status {
                status: response.status,
                message: response.message,
            });
        }
        debug!(
            "Market API returned {} of {} records",
            response.records.len(),
            response.total
        );
        Ok(response.records)
    }

    /// Prices whose crop name contains any of `commodities` (case-insensitive)
    pub fn fetch_for_commodities(&self, commodities: &[&str], state: Option<&str>) -> Vec<MarketPrice> {
        let wanted: Vec<String> = commodities.iter().map(|c| c.to_lowercase()).collect();
        self.fetch_prices(state, Some(COMMODITY_SEARCH_LIMIT))
            .into_iter()
            .filter(|price| {
                let crop = price.crop_name.to_lowercase();
                wanted.iter().any(|w| crop.contains(w.as_str()))
            })
            .collect()
    }

    pub fn fetch_popular(&self, state: Option<&str>) -> Vec<MarketPrice> {
        self.fetch_for_commodities(POPULAR_CROPS, state)
    }
}
