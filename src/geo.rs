//! IP geolocation shared by the weather and market services

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::transport::{HttpTransport, TransportError};

const IP_FIELDS: &str = "status,message,country,countryCode,region,regionName,city,lat,lon";

#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("location service returned status '{status}': {message}")]
    Status { status: String, message: String },
}

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coords {
    pub lat: f64,
    pub lon: f64,
}

impl Coords {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `lat,lon` as most weather APIs take it
    pub fn query(&self) -> String {
        format!("{},{}", self.lat, self.lon)
    }
}

/// ip-api.com style response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    country: String,
    #[serde(default)]
    region_name: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    lat: f64,
    #[serde(default)]
    lon: f64,
}

/// Where the caller's IP appears to be
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpLocation {
    /// State name, normalized for the market API
    pub state: String,
    pub city: String,
    pub country: String,
    pub coords: Coords,
}

/// States and union territories the market API knows by name
const KNOWN_STATES: &[&str] = &[
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    "Delhi",
    "Jammu and Kashmir",
    "Ladakh",
    "Puducherry",
    "Chandigarh",
    "Dadra and Nagar Haveli and Daman and Diu",
    "Lakshadweep",
    "Andaman and Nicobar Islands",
];

/// Map a geolocation region name onto the market API's state spelling.
/// Unknown names pass through unchanged.
pub fn normalize_state(region: &str) -> String {
    let region = region.trim();
    match region {
        "National Capital Territory of Delhi" | "NCT of Delhi" => return "Delhi".to_string(),
        "Orissa" => return "Odisha".to_string(),
        "Pondicherry" => return "Puducherry".to_string(),
        _ => {}
    }
    KNOWN_STATES
        .iter()
        .find(|state| state.eq_ignore_ascii_case(region))
        .map(|state| state.to_string())
        .unwrap_or_else(|| region.to_string())
}

/// Look up the caller's location from their public IP
pub fn locate_by_ip(transport: &dyn HttpTransport, url: &str) -> Result<IpLocation, GeoError> {
    let raw = transport.get(url, &[("fields", IP_FIELDS)])?;
    let response: IpApiResponse = serde_json::from_str(&raw).map_err(TransportError::from)?;

    if response.status != "success" {
        return Err(GeoError::Status {
            status: response.status,
            message: response.message.unwrap_or_default(),
        });
    }

    let location = IpLocation {
        state: normalize_state(&response.region_name),
        city: response.city,
        country: response.country,
        coords: Coords::new(response.lat, response.lon),
    };
    debug!(
        "IP location: {}, {} ({})",
        location.city, location.state, location.country
    );
    Ok(location)
}
