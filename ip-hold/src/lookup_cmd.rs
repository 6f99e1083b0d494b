use std::sync::Arc;

use anyhow::{bail, Result};
use ip_hold::config::Config;
use ip_hold::http::HttpInventory;
use ip_hold::report::render_options;
use ip_hold_core::{IpLookup, LookupOutcome, SelectWidget};

use crate::cli::{LookupArgs, OutputFormat};

pub async fn run_lookup(args: LookupArgs, config: &Config) -> Result<()> {
    let lookup = IpLookup::new(Arc::new(HttpInventory::new(config)));
    let mut widget = SelectWidget::default();

    let outcome = lookup
        .load_available_ips(&mut widget, &args.vlan, args.selected.as_deref())
        .await;
    if outcome == LookupOutcome::Unchanged {
        bail!("failed to load available IPs for vlan '{}'", args.vlan);
    }

    match args.format {
        OutputFormat::Text => println!("{}", render_options(&widget)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(widget.options())?),
    }
    Ok(())
}
