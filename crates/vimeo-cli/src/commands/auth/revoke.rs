//! Revoke command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::ConnectionArgs;
use crate::commands::profile_client;
use crate::output;
use crate::profile::storage;

#[derive(Args, Debug)]
pub struct RevokeArgs {}

pub async fn run(_args: RevokeArgs, connection: &ConnectionArgs) -> Result<()> {
    let mut profile = storage::require_profile()?;
    let client = profile_client(connection, &profile)?;

    client.revoke_token().await.context("Failed to revoke token")?;

    profile.clear_token();
    storage::save_profile(&profile).context("Failed to save profile")?;

    output::success("Token revoked");
    Ok(())
}
