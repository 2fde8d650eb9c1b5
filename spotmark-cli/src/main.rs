//! spotmark CLI
//!
//! Command-line interface for the spotmark price service: run the API
//! server, or query quotes and moving averages directly.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use spotmark_api::{ApiConfig, ApiServer};
use spotmark_coingecko::{symbols, PriceService, PriceServiceConfig};

/// spotmark - Crypto spot prices and moving averages
#[derive(Parser)]
#[command(name = "spotmark")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000", env = "PORT")]
        port: u16,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: String,
    },

    /// Look up current spot prices
    Price {
        /// Comma-separated ticker symbols, e.g. BTC,ETH
        symbols: String,
        /// CoinGecko base URL
        #[arg(long, env = "COINGECKO_BASE_URL")]
        base_url: Option<String>,
    },

    /// Compute a simple moving average
    Ma {
        /// Ticker symbol, e.g. BTC
        symbol: String,
        /// Window in days (2-90)
        #[arg(short, long, default_value = "7")]
        days: u32,
        /// CoinGecko base URL
        #[arg(long, env = "COINGECKO_BASE_URL")]
        base_url: Option<String>,
    },

    /// Print the daily price series for a symbol
    History {
        /// Ticker symbol, e.g. BTC
        symbol: String,
        /// Window in days (2-90)
        #[arg(short, long, default_value = "7")]
        days: u32,
        /// CoinGecko base URL
        #[arg(long, env = "COINGECKO_BASE_URL")]
        base_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "spotmark=debug,info"
    } else {
        "spotmark=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Serve { port, bind } => cmd_serve(port, &bind).await,
        Commands::Price { symbols, base_url } => cmd_price(&symbols, base_url).await,
        Commands::Ma {
            symbol,
            days,
            base_url,
        } => cmd_ma(&symbol, days, base_url).await,
        Commands::History {
            symbol,
            days,
            base_url,
        } => cmd_history(&symbol, days, base_url).await,
    }
}

fn service_for(base_url: Option<String>) -> Result<PriceService> {
    let config = match base_url {
        Some(url) => PriceServiceConfig::with_base_url(url),
        None => PriceServiceConfig::default(),
    };
    PriceService::with_config(config).context("Failed to build price service")
}

/// Run the API server
async fn cmd_serve(port: u16, bind: &str) -> Result<()> {
    println!("{}", "Starting spotmark API server...".cyan().bold());
    println!("   {} http://{}:{}", "Listening on:".green(), bind, port);
    println!("   {} http://{}:{}/health", "Health check:".dimmed(), bind, port);
    println!("\n   Press Ctrl+C to stop.\n");

    let config = ApiConfig::from_env();
    let server = ApiServer::new(config).context("Failed to initialize server")?;

    let addr: SocketAddr = format!("{}:{}", bind, port).parse()?;
    server.run(addr).await?;

    Ok(())
}

/// Look up spot prices for a comma-separated symbol list
async fn cmd_price(symbols: &str, base_url: Option<String>) -> Result<()> {
    let requested: Vec<String> = symbols
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let service = service_for(base_url)?;
    let result = service
        .spot_quotes(&requested)
        .await
        .with_context(|| format!("Supported symbols: {}", symbols::supported_symbols().join(", ")))?;

    for quote in &result.quotes {
        match quote.usd {
            Some(usd) => println!("{}  ${:.2}", quote.symbol.bold(), usd),
            None => println!("{}  {}", quote.symbol.bold(), "n/a".dimmed()),
        }
    }
    println!("{}", format!("source: {:?}", result.source).to_lowercase().dimmed());

    Ok(())
}

/// Compute a simple moving average
async fn cmd_ma(symbol: &str, days: u32, base_url: Option<String>) -> Result<()> {
    let service = service_for(base_url)?;
    let ma = service
        .moving_average(symbol, days)
        .await
        .context("Failed to compute moving average")?;

    println!(
        "{} {}-day SMA over {} points: {}",
        ma.symbol.bold(),
        ma.days,
        ma.points,
        format!("${}", ma.sma).green().bold()
    );

    Ok(())
}

/// Print the daily price series
async fn cmd_history(symbol: &str, days: u32, base_url: Option<String>) -> Result<()> {
    let service = service_for(base_url)?;
    let history = service
        .daily_history(symbol, days)
        .await
        .context("Failed to fetch history")?;

    println!(
        "{} ({}) - last {} days, {} points",
        history.symbol.bold(),
        history.coin_id.dimmed(),
        history.days,
        history.series.len()
    );

    for point in &history.series {
        let when = point
            .datetime()
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| point.timestamp_ms.to_string());
        println!("  {}  ${:.4}", when.dimmed(), point.usd);
    }

    Ok(())
}
