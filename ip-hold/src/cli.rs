use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "ip-hold")]
#[command(about = "Look up, reserve and release host IP addresses on an inventory server")]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// List the addresses available for a VLAN.
    Lookup(LookupArgs),
    /// Hold one address.
    Reserve(IpArgs),
    /// Give back one held address.
    Release(IpArgs),
    /// Replay a host form editing session and release on exit.
    Session(SessionArgs),
}

#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// Config TOML file. Defaults to the embedded config.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Inventory server base URL (overrides the config).
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    /// Raw Cookie header carrying csrftoken/sessionid (overrides the config).
    #[arg(long, global = true)]
    pub cookie: Option<String>,
    /// Hold policy (overrides the config).
    #[arg(long, value_enum, global = true)]
    pub policy: Option<PolicyArg>,
}

#[derive(Parser, Debug)]
pub struct LookupArgs {
    /// Parent VLAN identifier.
    #[arg(long)]
    pub vlan: String,
    /// Address id to keep selected in the result.
    #[arg(long)]
    pub selected: Option<String>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct IpArgs {
    /// Address record identifier.
    pub ip_id: String,
}

#[derive(Parser, Debug)]
pub struct SessionArgs {
    /// VLAN already selected when the form opens.
    #[arg(long, default_value = "")]
    pub vlan: String,
    /// Address id already selected when the form opens (not reserved).
    #[arg(long)]
    pub ip: Option<String>,
    /// Start with manual IP entry checked.
    #[arg(long)]
    pub manual: bool,
    /// Event script; reads stdin when omitted.
    #[arg(long)]
    pub script: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum PolicyArg {
    Optimistic,
    Confirmed,
}
