//! Convert OAuth1 command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::ConnectionArgs;
use crate::commands::profile_client;
use crate::output;
use crate::profile::storage;

#[derive(Args, Debug)]
pub struct ConvertOauth1Args {
    /// Legacy OAuth1 token
    #[arg(long)]
    pub token: String,

    /// Legacy OAuth1 token secret
    #[arg(long)]
    pub token_secret: String,
}

pub async fn run(args: ConvertOauth1Args, connection: &ConnectionArgs) -> Result<()> {
    let mut profile = storage::require_profile()?;
    let client = profile_client(connection, &profile)?;

    output::note("Converting token...");

    let token = client
        .convert_legacy_token(&args.token, &args.token_secret)
        .await
        .context("Failed to convert token")?;

    profile.store_token(&token);
    storage::save_profile(&profile).context("Failed to save profile")?;

    output::success("Token converted");
    output::field("Scope", &token.scope);

    Ok(())
}
