//! MarketMind CLI: quotes, history, analysis, ticker strip and portfolio valuation.
//!
//! Commands:
//! - `quote`: current quote for one symbol
//! - `history`: daily closes over a period, as JSON or CSV
//! - `analyze`: quote, history, signal, sentiment and support/resistance
//! - `ticker`: lightweight synthetic ticker strip
//! - `portfolio`: value holdings from a JSON file or `SYM:QTY:COST` arguments
//!
//! Results go to stdout as JSON; logs go to stderr (`RUST_LOG` overrides the `warn` default).

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use marketmind_core::{EngineConfig, Holding, MarketEngine, Period, Symbol};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "marketmind",
    about = "MarketMind CLI: market data and signal engine"
)]
struct Cli {
    /// Path to a TOML engine config. Defaults are used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Offline mode: synthetic data only, no network access.
    #[arg(long, global = true, default_value_t = false)]
    offline: bool,

    /// Seed for reproducible synthetic data.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Pretty-print JSON output.
    #[arg(long, global = true, default_value_t = false)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Current quote for a symbol.
    Quote {
        /// Ticker symbol (e.g., AAPL, TCS.NS).
        symbol: String,
    },
    /// Daily price history for a symbol.
    History {
        symbol: String,

        /// Period: 1mo, 3mo, 6mo or 1y. Unrecognized values use 3mo.
        #[arg(long, default_value = "3mo")]
        period: String,

        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Full analysis: quote, history, signal, sentiment and support/resistance.
    Analyze {
        symbol: String,

        /// Period: 1mo, 3mo, 6mo or 1y. Unrecognized values use 3mo.
        #[arg(long, default_value = "3mo")]
        period: String,
    },
    /// Ticker strip of synthetic quotes. Uses the configured list when no symbols are given.
    Ticker { symbols: Vec<String> },
    /// Value a portfolio of holdings.
    Portfolio {
        /// JSON file holding an array of {"symbol", "quantity", "avgCost"} objects.
        #[arg(long, conflicts_with = "holding")]
        file: Option<PathBuf>,

        /// Inline holding as SYM:QTY:COST (repeatable).
        #[arg(long = "holding")]
        holding: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Csv,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref(), cli.offline, cli.seed)?;
    let engine = MarketEngine::new(&config);

    match cli.command {
        Commands::Quote { symbol } => print_json(&engine.quote(&Symbol::new(&symbol)), cli.pretty),
        Commands::History {
            symbol,
            period,
            format,
        } => {
            let history = engine.history(&Symbol::new(&symbol), Period::parse(&period));
            match format {
                Format::Json => print_json(&history, cli.pretty),
                Format::Csv => write_history_csv(&history.points, std::io::stdout().lock()),
            }
        }
        Commands::Analyze { symbol, period } => print_json(
            &engine.analyze(&Symbol::new(&symbol), Period::parse(&period)),
            cli.pretty,
        ),
        Commands::Ticker { symbols } => {
            let strip = if symbols.is_empty() {
                engine.default_ticker_strip()
            } else {
                let symbols: Vec<Symbol> = symbols.iter().map(|s| Symbol::new(s)).collect();
                engine.ticker_strip(&symbols)
            };
            print_json(&strip, cli.pretty)
        }
        Commands::Portfolio { file, holding } => {
            let holdings = match file {
                Some(path) => load_holdings(&path)?,
                None => holding
                    .iter()
                    .map(|raw| parse_holding(raw))
                    .collect::<Result<Vec<_>>>()?,
            };
            print_json(&engine.portfolio(&holdings), cli.pretty)
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&Path>, offline: bool, seed: Option<u64>) -> Result<EngineConfig> {
    let mut config = match path {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if offline {
        config = config.simulated();
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    tracing::debug!(mode = ?config.mode, seed = ?config.seed, "config loaded");
    Ok(config)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}

fn write_history_csv<T: Serialize, W: Write>(rows: &[T], out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn load_holdings(path: &Path) -> Result<Vec<Holding>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading holdings {}", path.display()))?;
    let holdings: Vec<Holding> = serde_json::from_str(&content)
        .with_context(|| format!("parsing holdings {}", path.display()))?;
    Ok(holdings)
}

/// Parse `SYM:QTY:COST`. Quantity and cost must be non-negative numbers.
fn parse_holding(raw: &str) -> Result<Holding> {
    let parts: Vec<&str> = raw.split(':').collect();
    let [symbol, quantity, cost] = parts.as_slice() else {
        bail!("holding must be SYM:QTY:COST, got {raw:?}");
    };
    if symbol.trim().is_empty() {
        bail!("holding {raw:?} has an empty symbol");
    }
    let quantity: f64 = quantity
        .trim()
        .parse()
        .with_context(|| format!("invalid quantity in {raw:?}"))?;
    let cost: f64 = cost
        .trim()
        .parse()
        .with_context(|| format!("invalid cost in {raw:?}"))?;
    if !(quantity >= 0.0 && cost >= 0.0) {
        bail!("quantity and cost must be non-negative in {raw:?}");
    }
    Ok(Holding::new(symbol, quantity, cost))
}
