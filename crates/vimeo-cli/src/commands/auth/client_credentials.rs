//! Client-credentials command implementation.

use anyhow::{Context, Result};
use clap::Args;

use vimeo_core::Credentials;
use vimeo_http::VimeoClient;

use super::joined_scope;
use crate::cli::ConnectionArgs;
use crate::commands::{resolve_api, resolve_trusted};
use crate::output;
use crate::profile::{Profile, storage};

#[derive(Args, Debug)]
pub struct ClientCredentialsArgs {
    /// Application client identifier
    #[arg(long, env = "VIMEO_CLIENT_ID")]
    pub client_id: String,

    /// Application client secret
    #[arg(long, env = "VIMEO_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: String,

    /// Scope to request (repeatable, defaults to public)
    #[arg(long)]
    pub scope: Vec<String>,
}

pub async fn run(args: ClientCredentialsArgs, connection: &ConnectionArgs) -> Result<()> {
    let previous = storage::load_profile().context("Failed to load profile")?;
    let api = resolve_api(connection, previous.as_ref())?;
    let trusted = resolve_trusted(connection, previous.as_ref())?;

    let credentials = Credentials::new(&args.client_id, &args.client_secret, trusted.clone());
    let client = VimeoClient::new(api.clone(), credentials).context("Failed to create client")?;

    output::note("Requesting token...");

    let scope = joined_scope(&args.scope);
    let token = client
        .authenticate_client_credentials(scope.as_deref())
        .await
        .context("Failed to obtain token")?;

    let mut profile = Profile::new(args.client_id, args.client_secret);
    profile.api_url = Some(api.clone());
    profile.fingerprints = trusted;
    profile.store_token(&token);
    storage::save_profile(&profile).context("Failed to save profile")?;

    output::success("Token obtained");
    println!();
    output::field("Scope", &token.scope);
    output::field("API", &api.to_string());

    Ok(())
}
