use anyhow::{Context, Result};
use clap::Parser;
use ip_hold::config::{default_config, load_config, Config};
use ip_hold_core::HoldPolicy;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod lookup_cmd;
mod reserve_cmd;
mod session_cmd;

use cli::{Cli, Command, ConnectionArgs, PolicyArg};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = resolve_config(&cli.connection)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(async move {
        match cli.command {
            Command::Lookup(args) => lookup_cmd::run_lookup(args, &config).await,
            Command::Reserve(args) => reserve_cmd::run_reserve(args, &config).await,
            Command::Release(args) => reserve_cmd::run_release(args, &config).await,
            Command::Session(args) => session_cmd::run_session(args, &config).await,
        }
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn resolve_config(args: &ConnectionArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => default_config(),
    };

    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(cookie) = &args.cookie {
        config.cookie = cookie.clone();
    }
    if let Some(policy) = args.policy {
        config.hold_policy = match policy {
            PolicyArg::Optimistic => HoldPolicy::Optimistic,
            PolicyArg::Confirmed => HoldPolicy::Confirmed,
        };
    }
    Ok(config)
}
