//! Display helpers for weather reports

use std::fmt;

use super::report::{Current, WeatherReport};
use crate::llm::WeatherContext;

/// "Name, Region, Country", skipping blanks
pub fn format_location(report: &WeatherReport) -> String {
    let location = &report.location;
    [&location.name, &location.region, &location.country]
        .into_iter()
        .filter(|part| !part.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// "29°C, Sunny"
pub fn format_description(report: &WeatherReport) -> String {
    format!(
        "{}°C, {}",
        report.current.temp_c, report.current.condition.text
    )
}

/// US EPA air-quality band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirQualityStatus {
    Good,
    Moderate,
    UnhealthyForSensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AirQualityStatus {
    pub fn from_index(index: u8) -> Self {
        match index {
            0..=1 => Self::Good,
            2 => Self::Moderate,
            3 => Self::UnhealthyForSensitive,
            4 => Self::Unhealthy,
            5 => Self::VeryUnhealthy,
            _ => Self::Hazardous,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitive => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }
}

impl fmt::Display for AirQualityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Field-work hints triggered by the current conditions
pub fn farming_advice(current: &Current) -> Vec<&'static str> {
    let mut advice = Vec::new();
    if current.humidity > 80.0 {
        advice.push("High humidity detected. Monitor crops for fungal diseases.");
    }
    if current.wind_kph > 20.0 {
        advice.push("Strong winds. Secure lightweight structures and check for plant damage.");
    }
    if current.temp_c > 35.0 {
        advice.push("High temperature. Ensure adequate irrigation and shade for sensitive crops.");
    }
    if current.precip_mm > 5.0 {
        advice.push("Recent rainfall. Check field drainage and avoid heavy machinery on wet soil.");
    }
    if current
        .air_quality
        .as_ref()
        .is_some_and(|aq| aq.us_epa_index > 2)
    {
        advice.push("Poor air quality. Consider protecting workers and sensitive crops.");
    }
    if current.uv > 7.0 {
        advice.push("High UV index. Protect workers and consider shade for sensitive plants.");
    }
    advice
}

impl WeatherReport {
    /// Facts handed to the chat advisor
    pub fn to_context(&self) -> WeatherContext {
        let location = format_location(self);
        let condition = &self.current.condition.text;
        WeatherContext {
            location: (!location.is_empty()).then_some(location),
            temperature: Some(self.current.temp_c),
            humidity: Some(self.current.humidity),
            condition: (!condition.is_empty()).then(|| condition.clone()),
            wind_speed: Some(self.current.wind_kph),
            pressure: Some(self.current.pressure_mb),
        }
    }

    pub fn air_quality_status(&self) -> Option<AirQualityStatus> {
        self.current
            .air_quality
            .as_ref()
            .map(|aq| AirQualityStatus::from_index(aq.us_epa_index))
    }
}
