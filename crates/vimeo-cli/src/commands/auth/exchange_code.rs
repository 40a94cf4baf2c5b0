//! Exchange code command implementation.

use anyhow::{Context, Result};
use clap::Args;

use vimeo_http::VimeoClient;

use crate::cli::ConnectionArgs;
use crate::commands::{resolve_api, resolve_trusted};
use crate::output;
use crate::profile::{Profile, storage};

#[derive(Args, Debug)]
pub struct ExchangeCodeArgs {
    /// Code delivered to the redirect URI
    #[arg(long)]
    pub code: String,

    /// The redirect URI the code was issued for
    #[arg(long)]
    pub redirect_uri: String,

    /// Application client identifier (defaults to the stored profile's)
    #[arg(long, env = "VIMEO_CLIENT_ID")]
    pub client_id: Option<String>,

    /// Application client secret (defaults to the stored profile's)
    #[arg(long, env = "VIMEO_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,
}

pub async fn run(args: ExchangeCodeArgs, connection: &ConnectionArgs) -> Result<()> {
    let previous = storage::load_profile().context("Failed to load profile")?;

    let mut profile = match (args.client_id, args.client_secret) {
        (Some(id), Some(secret)) => Profile::new(id, secret),
        (id, secret) => {
            let stored = previous
                .clone()
                .context("No client credentials. Pass --client-id and --client-secret.")?;
            Profile::new(
                id.unwrap_or(stored.client_id),
                secret.unwrap_or(stored.client_secret),
            )
        }
    };
    profile.api_url = Some(resolve_api(connection, previous.as_ref())?);
    profile.fingerprints = resolve_trusted(connection, previous.as_ref())?;

    let client = VimeoClient::new(
        profile.api_url.clone().unwrap_or_default(),
        profile.credentials(profile.fingerprints.clone()),
    )
    .context("Failed to create client")?;

    output::note("Exchanging code...");

    let token = client
        .authenticate_with_code(&args.code, &args.redirect_uri)
        .await
        .context("Failed to exchange code")?;

    profile.store_token(&token);
    storage::save_profile(&profile).context("Failed to save profile")?;

    output::success("Authorized");
    println!();
    output::field("Scope", &token.scope);
    if let Some(user) = &token.user {
        output::field("User", &user.name);
        output::field("URI", &user.uri);
    }

    Ok(())
}
