//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};

use crate::commands::auth::AuthCommand;
use crate::commands::list::ListCommand;

/// Vimeo API CLI tool.
#[derive(Parser, Debug)]
#[command(name = "vimeo")]
#[command(author, version = env!("VIMEO_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where to connect and which certificates to trust.
///
/// Both fall back to the stored profile when not given.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// API base URL
    #[arg(long, env = "VIMEO_API_URL", global = true)]
    pub api_url: Option<String>,

    /// SHA-256 fingerprint of a trusted server certificate (hex)
    #[arg(
        long = "fingerprint",
        env = "VIMEO_CERT_FINGERPRINTS",
        value_delimiter = ',',
        global = true
    )]
    pub fingerprints: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Obtain, inspect and revoke tokens
    Auth(AuthCommand),

    /// Walk list endpoints
    List(ListCommand),
}
