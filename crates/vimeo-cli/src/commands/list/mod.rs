//! List subcommand implementations.

mod pages;

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};

use vimeo_core::{Direction, ListParams};
use vimeo_http::UserRef;

use crate::cli::ConnectionArgs;
use crate::commands::profile_client;
use crate::profile::storage;

#[derive(Args, Debug)]
pub struct ListCommand {
    #[command(subcommand)]
    pub command: ListSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ListSubcommand {
    /// List categories
    Categories(ListOptions),

    /// List channels
    Channels(ListOptions),

    /// List videos of a user, category or channel
    Videos(VideosArgs),
}

#[derive(Args, Debug)]
pub struct VideosArgs {
    /// User id or name (defaults to the token's user)
    #[arg(long, conflicts_with_all = ["category", "channel"])]
    pub user: Option<String>,

    /// Category slug
    #[arg(long, conflicts_with = "channel")]
    pub category: Option<String>,

    /// Channel id
    #[arg(long)]
    pub channel: Option<String>,

    #[command(flatten)]
    pub options: ListOptions,
}

#[derive(Args, Debug, Clone)]
pub struct ListOptions {
    /// Page to start from
    #[arg(long)]
    pub page: Option<u32>,

    /// Items per page
    #[arg(long)]
    pub per_page: Option<u32>,

    /// Sort field, e.g. `date` or `alphabetical`
    #[arg(long)]
    pub sort: Option<String>,

    #[arg(long, value_enum, requires = "sort")]
    pub direction: Option<SortDirection>,

    /// Server-side filter
    #[arg(long)]
    pub filter: Option<String>,

    /// Free text search
    #[arg(long)]
    pub query: Option<String>,

    /// Number of pages to fetch
    #[arg(long, default_value_t = 1)]
    pub pages: usize,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl From<SortDirection> for Direction {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Direction::Asc,
            SortDirection::Desc => Direction::Desc,
        }
    }
}

impl ListOptions {
    fn params(&self) -> ListParams {
        let mut params = ListParams::new();
        if let Some(page) = self.page {
            params = params.page(page);
        }
        if let Some(per_page) = self.per_page {
            params = params.per_page(per_page);
        }
        if let Some(sort) = &self.sort {
            params = params.sort(sort, self.direction.map(Direction::from));
        }
        if let Some(filter) = &self.filter {
            params = params.filter(filter);
        }
        if let Some(query) = &self.query {
            params = params.query(query);
        }
        params
    }
}

pub async fn handle(cmd: ListCommand, connection: &ConnectionArgs) -> Result<()> {
    let profile = storage::require_profile()?;
    let client = profile_client(connection, &profile)?;

    match cmd.command {
        ListSubcommand::Categories(options) => {
            let listing = client.categories();
            let paginator = listing
                .paginate(options.params())
                .await
                .context("Failed to list categories")?;
            pages::print(paginator, &options).await
        }
        ListSubcommand::Channels(options) => {
            let listing = client.channels();
            let paginator = listing
                .paginate(options.params())
                .await
                .context("Failed to list channels")?;
            pages::print(paginator, &options).await
        }
        ListSubcommand::Videos(args) => {
            let listing = match (&args.user, &args.category, &args.channel) {
                (_, Some(slug), _) => client.category_videos(slug),
                (_, _, Some(id)) => client.channel_videos(id),
                (Some(user), _, _) => client.videos(UserRef::Id(user)),
                (None, None, None) => client.videos(UserRef::Me),
            };
            let paginator = listing
                .paginate(args.options.params())
                .await
                .context("Failed to list videos")?;
            pages::print(paginator, &args.options).await
        }
    }
}
