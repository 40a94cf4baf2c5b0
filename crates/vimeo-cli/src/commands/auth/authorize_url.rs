//! Authorize URL command implementation.

use anyhow::{Context, Result};
use clap::Args;

use vimeo_core::{AuthorizationRequest, authorization_url};

use crate::cli::ConnectionArgs;
use crate::commands::resolve_api;
use crate::profile::storage;

#[derive(Args, Debug)]
pub struct AuthorizeUrlArgs {
    /// Application client identifier (defaults to the stored profile's)
    #[arg(long, env = "VIMEO_CLIENT_ID")]
    pub client_id: Option<String>,

    /// Where the user is sent back to with the code
    #[arg(long)]
    pub redirect_uri: String,

    /// Opaque value echoed back on the redirect
    #[arg(long)]
    pub state: String,

    /// Scope to request (repeatable, defaults to public)
    #[arg(long)]
    pub scope: Vec<String>,

    #[arg(long, default_value = "code")]
    pub response_type: String,
}

pub fn run(args: AuthorizeUrlArgs, connection: &ConnectionArgs) -> Result<()> {
    let profile = storage::load_profile().context("Failed to load profile")?;
    let api = resolve_api(connection, profile.as_ref())?;

    let client_id = match args.client_id {
        Some(id) => id,
        None => profile
            .map(|p| p.client_id)
            .filter(|id| !id.is_empty())
            .context("No client id. Pass --client-id.")?,
    };

    let scopes: Vec<&str> = args.scope.iter().map(String::as_str).collect();
    let url = authorization_url(
        &api,
        &AuthorizationRequest {
            response_type: &args.response_type,
            client_id: &client_id,
            redirect_uri: &args.redirect_uri,
            state: &args.state,
            scopes: &scopes,
        },
    );

    println!("{}", url);
    Ok(())
}
