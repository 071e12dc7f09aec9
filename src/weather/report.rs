//! Current-conditions payload (weatherapi.com `current.json`)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportLocation {
    pub name: String,
    pub region: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub tz_id: String,
    pub localtime: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
    pub text: String,
    pub icon: String,
    pub code: u32,
}

impl Condition {
    /// Icon URLs come protocol-relative
    pub fn icon_url(&self) -> String {
        if self.icon.starts_with("//") {
            format!("https:{}", self.icon)
        } else {
            self.icon.clone()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirQuality {
    pub co: f64,
    pub no2: f64,
    pub o3: f64,
    pub so2: f64,
    pub pm2_5: f64,
    pub pm10: f64,
    #[serde(rename = "us-epa-index")]
    pub us_epa_index: u8,
    #[serde(rename = "gb-defra-index")]
    pub gb_defra_index: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Current {
    pub last_updated: String,
    pub temp_c: f64,
    pub feelslike_c: f64,
    pub is_day: u8,
    pub condition: Condition,
    pub wind_kph: f64,
    pub wind_dir: String,
    pub pressure_mb: f64,
    pub precip_mm: f64,
    pub humidity: f64,
    pub cloud: f64,
    pub vis_km: f64,
    pub uv: f64,
    pub gust_kph: f64,
    pub air_quality: Option<AirQuality>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    #[serde(default)]
    pub location: ReportLocation,
    #[serde(default)]
    pub current: Current,
}
