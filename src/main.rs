use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "farmhand")]
#[command(about = "Farmer's assistant - voice input, crop advice, weather and mandi prices")]
#[command(version)]
struct Cli {
    /// Working directory (defaults to current directory)
    #[arg(short, long, global = true)]
    path: Option<PathBuf>,

    /// Path to the config file (defaults to .farmhand/config.toml, then ~/.farmhand/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the agricultural advisor (interactive when no question is given)
    Chat {
        /// Question to ask
        question: Option<String>,

        /// Print the answer as it streams in
        #[arg(long)]
        stream: bool,

        /// Do not attach local weather to the question
        #[arg(long)]
        no_weather: bool,

        /// Answer from the built-in offline replies only
        #[arg(long)]
        offline: bool,

        /// GPS latitude (skips IP geolocation together with --lon)
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// GPS longitude
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },

    /// Show current weather and air quality
    Weather {
        /// GPS latitude (skips IP geolocation together with --lon)
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// GPS longitude
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Print the raw report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show mandi prices for a state
    Market {
        /// State to query (defaults to the state of your IP address)
        #[arg(long)]
        state: Option<String>,

        /// Only crops whose name contains one of these (comma separated)
        #[arg(long, value_delimiter = ',')]
        crop: Vec<String>,

        /// Only the popular crops (wheat, rice, potato, onion, tomato, cotton)
        #[arg(long, conflicts_with = "crop")]
        popular: bool,

        /// Drop prices older than this many days
        #[arg(long)]
        max_age_days: Option<i64>,

        /// Group by crop and show the best market per crop
        #[arg(long)]
        best: bool,

        /// Print prices as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report speech recognition support for a user agent
    Probe {
        /// User agent string to classify
        #[arg(long)]
        user_agent: String,

        /// Host locale (defaults to LANG)
        #[arg(long)]
        locale: Option<String>,

        /// The host lacks a speech recognition engine
        #[arg(long)]
        no_engine: bool,
    },

    /// Replay a scripted recognition session against a voice widget
    Voice {
        /// JSON script of timed actions and engine events
        script: PathBuf,
    },

    /// Write a default .farmhand/config.toml
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,

        /// Write to ~/.farmhand/config.toml instead of the working directory
        #[arg(long)]
        global: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Determine the working directory
    let work_dir = cli.path.unwrap_or_else(|| PathBuf::from("."));
    let config_path = cli.config;

    match cli.command {
        Commands::Chat {
            question,
            stream,
            no_weather,
            offline,
            lat,
            lon,
        } => {
            let options = cli::chat::ChatOptions {
                question,
                stream,
                with_weather: !no_weather,
                offline,
                gps: cli::gps(lat, lon),
            };
            cli::chat::chat_command(&work_dir, config_path.as_deref(), options).await?;
        }
        Commands::Weather { lat, lon, json } => {
            cli::weather::weather_command(&work_dir, config_path.as_deref(), cli::gps(lat, lon), json)
                .await?;
        }
        Commands::Market {
            state,
            crop,
            popular,
            max_age_days,
            best,
            json,
        } => {
            let options = cli::market::MarketOptions {
                state,
                crops: crop,
                popular,
                max_age_days,
                best,
                json,
            };
            cli::market::market_command(&work_dir, config_path.as_deref(), options).await?;
        }
        Commands::Probe {
            user_agent,
            locale,
            no_engine,
        } => {
            cli::probe::probe_command(&work_dir, config_path.as_deref(), &user_agent, locale, !no_engine)?;
        }
        Commands::Voice { script } => {
            cli::voice::voice_command(&work_dir, config_path.as_deref(), &script)?;
        }
        Commands::Init { force, global } => {
            cli::init::init_command(&work_dir, config_path, force, global)?;
        }
    }

    Ok(())
}
