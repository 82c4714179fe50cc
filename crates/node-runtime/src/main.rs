//! # DID-Ledger Node
//!
//! ## Commands
//!
//! - `run` (default): load or create the chain, seal until Ctrl+C, drain
//! - `genesis`: write a fresh chain, optionally anchored on a root identity
//! - `print-chain`: dump blocks and decoded transactions
//! - `validate`: exit non-zero if the stored chain is invalid
//! - `demo`: build a signed chain in memory and print it

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use dl_01_ledger::{validate_chain, verify_chain, ChainStore, JsonFileStore};
use node_runtime::{demo, inspect, GenesisBuilder, NodeConfig, NodeRuntime};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Permissioned DID / verifiable-credential ledger node
#[derive(Parser, Debug)]
#[command(name = "node-runtime")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Chain file (overrides config and DL_CHAIN_PATH)
    #[arg(long, global = true)]
    chain: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the node until Ctrl+C
    Run,
    /// Write a fresh chain containing only a genesis block
    Genesis {
        /// Root identity document to anchor the chain on
        #[arg(long)]
        anchor: Option<PathBuf>,
        /// Replace an existing chain file
        #[arg(long)]
        force: bool,
    },
    /// Print every block and its decoded transactions
    PrintChain,
    /// Check the stored chain's hashes and links
    Validate,
    /// Build a demonstration chain in memory and print it
    Demo,
}

fn load_config(cli: &Cli) -> Result<NodeConfig> {
    let mut config = match &cli.config {
        Some(path) => NodeConfig::from_file(path)?,
        None => NodeConfig::default(),
    };
    config.apply_env()?;
    if let Some(chain) = &cli.chain {
        config.storage.chain_path = chain.clone();
    }
    config.validate()?;
    Ok(config)
}

async fn run(config: NodeConfig) -> Result<()> {
    let mut runtime = NodeRuntime::new(config)?;
    runtime.start();

    info!("[node] Node is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;

    runtime.shutdown().await
}

fn genesis(config: &NodeConfig, anchor: Option<&Path>, force: bool) -> Result<()> {
    let store = JsonFileStore::open_exclusive(&config.storage.chain_path)?;
    if !force && store.load()?.is_some() {
        bail!(
            "{} already holds a chain; pass --force to replace it",
            store.location()
        );
    }

    let mut builder = GenesisBuilder::new();
    if let Some(path) = anchor {
        builder = builder.with_anchor_file(path)?;
    }
    let block = builder.build(Utc::now())?;
    store.save(std::slice::from_ref(&block))?;
    println!("Genesis {} written to {}", block.hash, store.location());
    Ok(())
}

fn load_stored(config: &NodeConfig) -> Result<Vec<shared_types::Block>> {
    let store = JsonFileStore::open(&config.storage.chain_path);
    store
        .load()?
        .with_context(|| format!("No chain at {}", store.location()))
}

fn print_chain(config: &NodeConfig) -> Result<()> {
    let blocks = load_stored(config)?;
    print!("{}", inspect::render_chain(&blocks));
    Ok(())
}

fn validate(config: &NodeConfig) -> Result<()> {
    let blocks = load_stored(config)?;
    verify_chain(&blocks).context("Chain is invalid")?;
    println!("Chain valid: {} blocks", blocks.len());
    Ok(())
}

fn run_demo() -> Result<()> {
    let admission = demo::run_demo()?;
    let blocks = admission.ledger().snapshot();
    print!("{}", inspect::render_chain(&blocks));
    println!(
        "Chain valid: {} ({} blocks)",
        validate_chain(&blocks),
        blocks.len()
    );
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Failed to install tracing subscriber");
    }

    let cli = Cli::parse();
    let result = match load_config(&cli) {
        Ok(config) => match cli.command.unwrap_or(Command::Run) {
            Command::Run => run(config).await,
            Command::Genesis { anchor, force } => genesis(&config, anchor.as_deref(), force),
            Command::PrintChain => print_chain(&config),
            Command::Validate => validate(&config),
            Command::Demo => run_demo(),
        },
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
