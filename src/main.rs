use anyhow::Result;
use clap::{Parser, Subcommand};
use washnet_core::{AppError, Config, ConfigError};
use washnet_services::OrderClient;
use washnet_ui::{OrderSearchModel, WeatherModel};
use washnet_weather::WeatherProvider;

#[derive(Parser, Debug)]
#[command(author, version, about = "WASHNET laundry shop customer tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the weather card and the best day to dry laundry
    Weather {
        /// Show the next 12 hours instead of the 5-day outlook
        #[arg(long)]
        hourly: bool,

        /// OpenWeatherMap location query, e.g. "Cebu,PH"
        #[arg(long)]
        location: Option<String>,
    },
    /// Look up orders by customer name
    Orders {
        /// Name the orders were placed under
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    washnet_core::init()?;
    tracing::debug!(?cli, "Starting WASHNET");

    let (config, _) = Config::load_validated()
        .map_err(|e| user_facing(ConfigError::Invalid(format!("{:#}", e)).into()))?;

    match cli.command {
        Command::Weather { hourly, location } => show_weather(&config, hourly, location).await,
        Command::Orders { name } => show_orders(&config, name).await,
    }
}

async fn show_weather(config: &Config, hourly: bool, location: Option<String>) -> Result<()> {
    let provider = WeatherProvider::from_config(&config.weather)?;
    let data = match location {
        Some(query) => provider.fetch_forecast(&query).await,
        None => provider.fetch().await,
    };

    let mut model = WeatherModel::new();
    model.set_data(data);
    if hourly {
        model.toggle_mode();
    }

    if let Some(now) = model.current_summary() {
        println!("{}{}", now.location, if now.is_demo { " (demo data)" } else { "" });
        println!("{} {}°C  {}", now.glyph, now.temperature, now.description);
        println!("Feels like {}°C  H {}°C  L {}°C", now.feels_like, now.high, now.low);
        println!(
            "Humidity {}%  Wind {}  Visibility {} km  Pressure {} hPa",
            now.humidity, now.wind, now.visibility_km, now.pressure
        );
        if let (Some(sunrise), Some(sunset)) = (&now.sunrise, &now.sunset) {
            println!("Sunrise {}  Sunset {}", sunrise, sunset);
        }
    }

    if let Some(best) = model.best_day() {
        println!();
        println!("Best laundry day: {}", best.summary());
        println!("{}", best.reason());
    }

    println!();
    println!("{}", model.mode().title());
    for tile in model.forecast_tiles() {
        let rain = tile
            .precipitation
            .map(|p| format!("  💧 {}%", p))
            .unwrap_or_default();
        println!(
            "  {:<12} {} {:>3}°C  {}{}",
            tile.label, tile.glyph, tile.temperature, tile.description, rain
        );
    }

    Ok(())
}

/// Friendly message on top, the underlying error as its cause
fn user_facing(err: AppError) -> anyhow::Error {
    let message = err.user_message();
    anyhow::Error::new(err).context(message)
}

async fn show_orders(config: &Config, name: String) -> Result<()> {
    let client = OrderClient::new(&config.orders.api_url).map_err(|e| user_facing(e.into()))?;

    let mut model = OrderSearchModel::new();
    model.set_customer_name(name);
    model.search(&client).await;

    if let Some(notice) = model.notice() {
        if notice.is_error() {
            anyhow::bail!("{}", notice.message());
        }
        println!("{}", notice.message());
        return Ok(());
    }

    for card in model.cards() {
        println!("{}  [{}]", card.title, card.status);
        println!("  Total:     {}", card.total);
        println!("  Service:   {}", card.service);
        println!("  Delivery:  {}", card.delivery);
        if !card.items.is_empty() {
            println!("  Items:     {}", card.items.join(", "));
        }
        println!("  Pickup:    {}", card.pickup_date);
        println!("  Delivered: {}", card.delivery_date);
        println!("  Placed:    {}", card.created);
        if let Some(notes) = &card.notes {
            println!("  Notes:     {}", notes);
        }
        println!();
    }

    Ok(())
}
