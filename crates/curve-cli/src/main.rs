// curve-cli/src/main.rs
use clap::{Parser, Subcommand};
use curve_core::{Address, Amount, Units};
use curve_pricing::{burn_value, mint_cost, CurveParams};
use serde::Serialize;
use share_ledger::MemoryVault;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
use config::TokenConfig;

#[derive(Parser)]
#[command(name = "share-curve")]
#[command(about = "Linear bonding-curve share token demo", version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default token configuration
    Init {
        /// Configuration file path
        #[arg(short, long, default_value = "./token.toml")]
        config: String,
    },

    /// Quote the marginal price and batch totals at a supply level
    Quote {
        /// Configuration file path
        #[arg(short, long, default_value = "./token.toml")]
        config: String,

        /// Supply level to quote at
        #[arg(short, long, default_value_t = 0)]
        supply: Units,

        /// Batch size
        #[arg(short, long, default_value_t = 1)]
        amount: Units,
    },

    /// Run a scripted mint/burn session and print the final state
    Demo {
        /// Configuration file path
        #[arg(short, long, default_value = "./token.toml")]
        config: String,
    },
}

#[derive(Serialize)]
struct QuoteReport {
    supply: Units,
    amount: Units,
    marginal_price: Amount,
    mint_cost: Amount,
    /// None when the descending batch would price a unit below zero
    burn_value: Option<Amount>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}={}", env!("CARGO_PKG_NAME"), log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Init { config } => init_config(&config)?,
        Commands::Quote {
            config,
            supply,
            amount,
        } => quote(&config, supply, amount)?,
        Commands::Demo { config } => run_demo(&config)?,
    }

    Ok(())
}

fn init_config(path: &str) -> anyhow::Result<()> {
    let config = TokenConfig::default();
    config.to_file(path)?;
    tracing::info!("Wrote default token configuration to {}", path);
    Ok(())
}

fn quote(path: &str, supply: Units, amount: Units) -> anyhow::Result<()> {
    let config = TokenConfig::from_file(path)?;
    let params = CurveParams::new(
        Amount::from_u64(config.base_price),
        Amount::from_u64(config.slope),
    )?;

    let report = QuoteReport {
        supply,
        amount,
        marginal_price: params.price_at(supply)?,
        mint_cost: mint_cost(&params, supply, amount)?,
        burn_value: burn_value(&params, supply, amount).ok(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run_demo(path: &str) -> anyhow::Result<()> {
    let config = TokenConfig::from_file(path)?;
    let mut token = config.build_token()?;
    let mut rail = MemoryVault::new();

    let alice = Address::new([0x01u8; 20]);
    let bob = Address::new([0x02u8; 20]);

    tracing::info!(
        "Deployed {} ({}) with reserve sink {}",
        token.name(),
        token.symbol(),
        token.reserve_sink()
    );

    // Alice overpays and gets the surplus back
    let cost = token.mint_cost(3)?;
    let supplied = cost
        .checked_add(&Amount::from_u64(25))
        .ok_or_else(|| anyhow::anyhow!("supplied amount overflow"))?;
    let outcome = token.mint(&mut rail, alice, 3, supplied)?;
    tracing::info!(
        "Alice minted 3 units: cost {}, refund {}",
        outcome.cost,
        outcome.refund
    );

    // Bob pays exactly
    let cost = token.mint_cost(2)?;
    let outcome = token.mint(&mut rail, bob, 2, cost)?;
    tracing::info!("Bob minted 2 units: cost {}", outcome.cost);

    // Alice redeems one unit
    let outcome = token.burn(&mut rail, alice, 1)?;
    tracing::info!("Alice burned 1 unit: value {}", outcome.value);

    let stats = token.stats()?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    println!("{}", serde_json::to_string_pretty(token.events())?);
    Ok(())
}
