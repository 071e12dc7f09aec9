//! Market command implementation

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;

use farmhand::AppContext;
use farmhand::market::{
    MarketPrice, best_price, format_market_date, format_price, formatted_crop_name,
    group_by_commodity, recent_prices,
};

use super::load_config;

pub struct MarketOptions {
    pub state: Option<String>,
    pub crops: Vec<String>,
    pub popular: bool,
    pub max_age_days: Option<i64>,
    pub best: bool,
    pub json: bool,
}

/// List mandi prices for a state
pub async fn market_command(work_dir: &Path, config_path: Option<&Path>, options: MarketOptions) -> Result<()> {
    let config = load_config(work_dir, config_path)?;
    let state = options.state.clone();
    let crops = options.crops.clone();
    let popular = options.popular;

    let mut prices = tokio::task::spawn_blocking(move || {
        let ctx = AppContext::from_config(config);
        let market = ctx.market();
        if popular {
            market.fetch_popular(state.as_deref())
        } else if !crops.is_empty() {
            let wanted: Vec<&str> = crops.iter().map(String::as_str).collect();
            market.fetch_for_commodities(&wanted, state.as_deref())
        } else {
            market.fetch_prices(state.as_deref(), None)
        }
    })
    .await
    .context("Market task failed")?;

    let today = Local::now().date_naive();
    if let Some(days) = options.max_age_days {
        prices = recent_prices(&prices, days, today);
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&prices)?);
        return Ok(());
    }

    if prices.is_empty() {
        println!("No prices found.");
        return Ok(());
    }

    if options.best {
        println!("Best market per crop ({}):\n", prices.len());
        for (crop, group) in group_by_commodity(&prices) {
            if let Some(best) = best_price(&group) {
                println!(
                    "  {:<24} {:>10} {}  {} ({} markets)",
                    formatted_crop_name(&crop),
                    format_price(best.modal_price),
                    best.trend.icon(),
                    best.market,
                    group.len()
                );
            }
        }
        return Ok(());
    }

    println!("Market prices ({}):\n", prices.len());
    for price in &prices {
        print_price(price, today);
    }

    Ok(())
}

fn print_price(price: &MarketPrice, today: chrono::NaiveDate) {
    println!(
        "  {} ({})  {} {} {}",
        formatted_crop_name(&price.crop_name),
        price.variety,
        format_price(price.modal_price),
        price.unit,
        price.trend.icon()
    );
    println!(
        "    {} - {}, {} | range {} - {} | {}",
        price.market,
        price.district,
        price.state,
        format_price(price.min_price),
        format_price(price.max_price),
        format_market_date(&price.arrival_date, today)
    );
}
