//! Mandi price records and their normalized form

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const UNIT_PER_QUINTAL: &str = "per quintal";

/// Raw record from the daily mandi price resource. Prices arrive as strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketRecord {
    pub state: String,
    pub district: String,
    pub market: String,
    pub commodity: String,
    pub variety: String,
    pub grade: String,
    pub arrival_date: String,
    pub min_price: String,
    pub max_price: String,
    pub modal_price: String,
}

/// Envelope of a resource query; only the fields we act on
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct MarketApiResponse {
    pub status: String,
    pub message: String,
    pub total: u64,
    pub records: Vec<MarketRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    /// Modal price against the midpoint of the day's range, with a 10% band
    pub fn classify(modal: f64, min: f64, max: f64) -> Self {
        let mid = (min + max) / 2.0;
        if modal > mid * 1.1 {
            Trend::Up
        } else if modal < mid * 0.9 {
            Trend::Down
        } else {
            Trend::Stable
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Trend::Up => "↗",
            Trend::Down => "↘",
            Trend::Stable => "→",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Up => write!(f, "up"),
            Trend::Down => write!(f, "down"),
            Trend::Stable => write!(f, "stable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketPrice {
    pub id: String,
    pub crop_name: String,
    pub variety: String,
    pub modal_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub unit: String,
    pub trend: Trend,
    pub market: String,
    pub district: String,
    pub state: String,
    /// dd/mm/yyyy as published
    pub arrival_date: String,
}

/// Unparseable prices count as zero
fn parse_price(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

impl MarketPrice {
    pub fn from_record(record: MarketRecord, index: usize) -> Self {
        let modal_price = parse_price(&record.modal_price);
        let min_price = parse_price(&record.min_price);
        let max_price = parse_price(&record.max_price);
        let variety = if record.variety.trim().is_empty() {
            "Common".to_string()
        } else {
            record.variety
        };

        Self {
            id: format!(
                "{}-{}-{}-{}",
                record.state, record.district, record.commodity, index
            ),
            crop_name: record.commodity,
            variety,
            modal_price,
            min_price,
            max_price,
            unit: UNIT_PER_QUINTAL.to_string(),
            trend: Trend::classify(modal_price, min_price, max_price),
            market: record.market,
            district: record.district,
            state: record.state,
            arrival_date: record.arrival_date,
        }
    }

    pub fn arrival(&self) -> Option<NaiveDate> {
        parse_arrival_date(&self.arrival_date)
    }
}

/// Accepts `dd/mm/yyyy` with or without zero padding
pub fn parse_arrival_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%d/%m/%Y").ok()
}

/// Shown when the market service is unreachable or has nothing for a region
pub fn fallback_prices(today: NaiveDate) -> Vec<MarketPrice> {
    let date = today.format("%d/%m/%Y").to_string();
    let entry = |n: u8, crop: &str, variety: &str, modal: f64, min: f64, max: f64, trend| {
        MarketPrice {
            id: format!("fallback-{}", n),
            crop_name: crop.to_string(),
            variety: variety.to_string(),
            modal_price: modal,
            min_price: min,
            max_price: max,
            unit: UNIT_PER_QUINTAL.to_string(),
            trend,
            market: "Local Mandi".to_string(),
            district: "Unknown".to_string(),
            state: "Unknown".to_string(),
            arrival_date: date.clone(),
        }
    };

    vec![
        entry(1, "Wheat", "Lokvan", 2250.0, 2200.0, 2300.0, Trend::Up),
        entry(2, "Rice", "Basmati", 4500.0, 4400.0, 4600.0, Trend::Stable),
        entry(3, "Potato", "Jyoti", 1800.0, 1700.0, 1900.0, Trend::Down),
    ]
}
