use std::sync::Arc;

use anyhow::{bail, Context, Result};
use ip_hold::config::Config;
use ip_hold::http::HttpInventory;
use ip_hold::report::{render_ack, TerminalNotifier};
use ip_hold_core::{IpId, ReservationClient};

use crate::cli::IpArgs;

pub async fn run_reserve(args: IpArgs, config: &Config) -> Result<()> {
    let ip = parse_ip(&args)?;
    let ack = client(config).reserve(&ip).await;
    println!("{}", render_ack("reserve", &ip, &ack));
    if !ack.is_confirmed() {
        bail!("reservation of ip {ip} was not confirmed");
    }
    Ok(())
}

pub async fn run_release(args: IpArgs, config: &Config) -> Result<()> {
    let ip = parse_ip(&args)?;
    let ack = client(config).release(&ip).await;
    println!("{}", render_ack("release", &ip, &ack));
    if !ack.is_confirmed() {
        bail!("release of ip {ip} was not confirmed");
    }
    Ok(())
}

fn client(config: &Config) -> ReservationClient {
    ReservationClient::new(
        Arc::new(HttpInventory::new(config)),
        Arc::new(TerminalNotifier),
    )
}

fn parse_ip(args: &IpArgs) -> Result<IpId> {
    IpId::parse(&args.ip_id).context("ip id must not be empty")
}
