//! GlobalTrade freight quote calculator — CLI
//!
//! ```sh
//! # Price a shipment
//! freight-quote quote --origin china --dest ecuador --weight 100 --transport maritime
//!
//! # Bulky air freight with insurance, as JSON
//! freight-quote quote --origin usa --dest chile --weight 10 --transport aerial \
//!     --length 100 --width 100 --height 100 --declared-value 5000 --insurance --json
//!
//! # Cities offered for a country
//! freight-quote cities ecuador
//!
//! # Validate the configuration without pricing anything
//! freight-quote --config /etc/freight-quote/config.toml check
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info};

use freight_quote::application::forms::QuoteForm;
use freight_quote::application::presentation::QuoteSummary;
use freight_quote::config::{default_config_path, AppConfig};
use freight_quote::domain::{city_slug, quote, CityCatalog, QuoteRequest};
use freight_quote::telemetry::init_tracing;

/// Shipping quote calculator for the GlobalTrade logistics dashboard.
#[derive(Parser, Debug)]
#[command(name = "freight-quote", version, about)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "FREIGHT_QUOTE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Price a shipment and print the itemized quote.
    Quote(QuoteArgs),
    /// List the cities offered for a country.
    Cities {
        /// Country code, e.g. `ecuador`
        country: String,
    },
    /// Validate the configuration file and print a summary.
    Check,
}

/// Form fields; values are coerced the same way the web form does.
#[derive(Args, Debug, Default)]
struct QuoteArgs {
    #[arg(long, default_value = "")]
    origin: String,
    #[arg(long, default_value = "")]
    origin_city: String,
    #[arg(long, default_value = "")]
    dest: String,
    #[arg(long, default_value = "")]
    dest_city: String,
    /// Actual weight in kilograms
    #[arg(long, default_value = "")]
    weight: String,
    /// maritime, aerial, terrestrial or express
    #[arg(long, default_value = "")]
    transport: String,
    /// general, fragile, dangerous, perishable or valuable
    #[arg(long, default_value = "general")]
    cargo: String,
    /// Length in centimeters
    #[arg(long, default_value = "")]
    length: String,
    /// Width in centimeters
    #[arg(long, default_value = "")]
    width: String,
    /// Height in centimeters
    #[arg(long, default_value = "")]
    height: String,
    /// Declared value in USD (basis for insurance)
    #[arg(long, default_value = "")]
    declared_value: String,
    #[arg(long)]
    insurance: bool,
    #[arg(long)]
    tracking: bool,
    #[arg(long)]
    packaging: bool,
    #[arg(long)]
    customs: bool,
    /// Print the raw breakdown as JSON
    #[arg(long)]
    json: bool,
}

impl From<&QuoteArgs> for QuoteForm {
    fn from(args: &QuoteArgs) -> Self {
        QuoteForm {
            origin_country: args.origin.clone(),
            origin_city: args.origin_city.clone(),
            dest_country: args.dest.clone(),
            dest_city: args.dest_city.clone(),
            weight: args.weight.clone(),
            length: args.length.clone(),
            width: args.width.clone(),
            height: args.height.clone(),
            cargo_type: args.cargo.clone(),
            declared_value: args.declared_value.clone(),
            transport: args.transport.clone(),
            insurance: args.insurance,
            tracking: args.tracking,
            packaging: args.packaging,
            customs: args.customs,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let loaded = AppConfig::load(&config_path);

    let mut logging = loaded
        .as_ref()
        .map(|cfg| cfg.logging.clone())
        .unwrap_or_default();
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    init_tracing(&logging)?;

    let config = match loaded {
        Ok(cfg) => {
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) if matches!(cli.command, Command::Check) => {
            error!("Invalid configuration in {}: {}", config_path.display(), e);
            return Err(e.into());
        }
        Err(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default rate tables.");
            AppConfig::default()
        }
    };

    match cli.command {
        Command::Quote(args) => run_quote(&config, &args)?,
        Command::Cities { country } => run_cities(&country),
        Command::Check => run_check(&config, &config_path),
    }

    Ok(())
}

fn run_quote(config: &AppConfig, args: &QuoteArgs) -> Result<(), Box<dyn std::error::Error>> {
    let tables = config.rate_tables();
    let request: QuoteRequest = QuoteForm::from(args).into_request();
    let breakdown = quote::quote(&request, &tables);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
    } else {
        print!("{}", QuoteSummary::from(&breakdown).to_text());
    }
    Ok(())
}

fn run_cities(country: &str) {
    let catalog = CityCatalog::default();
    let country = country.trim().to_lowercase();
    let cities = catalog.cities(&country);

    if cities.is_empty() {
        let known: Vec<&str> = catalog.countries().collect();
        println!("No cities for '{}'. Known countries: {}", country, known.join(", "));
        return;
    }
    for city in cities {
        println!("{:<20} {}", city, city_slug(city));
    }
}

fn run_check(config: &AppConfig, config_path: &std::path::Path) {
    let tables = config.rate_tables();
    println!("Configuration is valid");
    println!("   Config file : {}", config_path.display());
    println!("   Log level   : {} ({})", config.logging.level, config.logging.format);
    println!("   Tariffs     : {} transport modes", tables.base_tariffs.len());
    println!("   Cargo types : {}", tables.cargo_multipliers.len());
    println!("   Routes      : {}", tables.distance_multipliers.len());
    println!("   Tax rate    : {:.0}%", tables.tax_rate * 100.0);
}
