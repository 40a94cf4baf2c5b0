//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::ConnectionArgs;
use crate::commands::profile_client;
use crate::output;
use crate::profile::storage;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Ask the API for the token's user instead of reading the profile only
    #[arg(long)]
    pub fetch: bool,
}

pub async fn run(args: WhoamiArgs, connection: &ConnectionArgs) -> Result<()> {
    let profile = storage::require_profile()?;

    output::field("Client ID", &profile.client_id);
    output::field(
        "Token",
        if profile.access_token.is_some() {
            "present"
        } else {
            "none"
        },
    );
    if !profile.scope.is_empty() {
        output::field("Scope", &profile.scope);
    }
    output::optional_field("User", profile.user_uri.as_deref());

    if args.fetch {
        let client = profile_client(connection, &profile)?;
        let me = client.me().await.context("Failed to fetch user")?;

        println!();
        output::field("Name", &me.name);
        output::field("URI", &me.uri);
        output::optional_field("Link", me.link.as_deref());
        output::optional_field("Location", me.location.as_deref());
        if let Some(created) = &me.created_time {
            output::field("Joined", &output::date(created));
        }
    }

    Ok(())
}
