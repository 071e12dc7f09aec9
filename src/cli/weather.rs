//! Weather command implementation

use std::path::Path;

use anyhow::{Context, Result};

use farmhand::AppContext;
use farmhand::geo::Coords;
use farmhand::weather::{LocationSource, farming_advice, format_description, format_location};

use super::load_config;

/// Show current conditions for the GPS position or the IP location
pub async fn weather_command(
    work_dir: &Path,
    config_path: Option<&Path>,
    gps: Option<Coords>,
    json: bool,
) -> Result<()> {
    let config = load_config(work_dir, config_path)?;

    let location_weather = tokio::task::spawn_blocking(move || {
        let mut ctx = AppContext::from_config(config);
        ctx.refresh_location_weather(gps).cloned()
    })
    .await
    .context("Weather task failed")?;

    let Some(location_weather) = location_weather else {
        println!("Could not determine your location.");
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&location_weather)?);
        return Ok(());
    }

    let source = match location_weather.source {
        LocationSource::Gps => "GPS",
        LocationSource::Ip => "IP",
    };
    let Some(report) = &location_weather.report else {
        println!(
            "Location {} (via {}), but weather data is unavailable.",
            location_weather.coords.query(),
            source
        );
        return Ok(());
    };
    let current = &report.current;

    println!("{}", format_location(report));
    println!("  {}  (feels like {}°C)", format_description(report), current.feelslike_c);
    println!("  Wind:       {} km/h {}", current.wind_kph, current.wind_dir);
    println!("  Humidity:   {}%", current.humidity);
    println!("  Visibility: {} km", current.vis_km);
    println!("  Pressure:   {} mb", current.pressure_mb);
    println!("  UV index:   {}", current.uv);
    println!("  Rain:       {} mm", current.precip_mm);
    if let (Some(aq), Some(status)) = (&current.air_quality, report.air_quality_status()) {
        println!(
            "  Air:        {} (PM2.5 {} μg/m³, PM10 {} μg/m³)",
            status, aq.pm2_5, aq.pm10
        );
    }
    println!("  Updated:    {} (via {})", current.last_updated, source);

    let advice = farming_advice(current);
    if !advice.is_empty() {
        println!("\nToday's farming advice:");
        for line in advice {
            println!("  • {}", line);
        }
    }

    Ok(())
}
