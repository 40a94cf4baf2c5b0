//! Auth subcommand implementations.

mod authorize_url;
mod client_credentials;
mod convert_oauth1;
mod exchange_code;
mod revoke;
mod whoami;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::ConnectionArgs;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Obtain an app token with the client-credentials grant
    ClientCredentials(client_credentials::ClientCredentialsArgs),

    /// Print the link that starts the authorization-code flow
    AuthorizeUrl(authorize_url::AuthorizeUrlArgs),

    /// Exchange an authorization code for a user token
    ExchangeCode(exchange_code::ExchangeCodeArgs),

    /// Convert a legacy OAuth1 token pair
    ConvertOauth1(convert_oauth1::ConvertOauth1Args),

    /// Revoke the stored token
    Revoke(revoke::RevokeArgs),

    /// Display the stored profile
    Whoami(whoami::WhoamiArgs),
}

pub async fn handle(cmd: AuthCommand, connection: &ConnectionArgs) -> Result<()> {
    match cmd.command {
        AuthSubcommand::ClientCredentials(args) => client_credentials::run(args, connection).await,
        AuthSubcommand::AuthorizeUrl(args) => authorize_url::run(args, connection),
        AuthSubcommand::ExchangeCode(args) => exchange_code::run(args, connection).await,
        AuthSubcommand::ConvertOauth1(args) => convert_oauth1::run(args, connection).await,
        AuthSubcommand::Revoke(args) => revoke::run(args, connection).await,
        AuthSubcommand::Whoami(args) => whoami::run(args, connection).await,
    }
}

/// Join repeated `--scope` values; `None` when none were given.
fn joined_scope(scopes: &[String]) -> Option<String> {
    let joined = scopes
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    (!joined.is_empty()).then_some(joined)
}
