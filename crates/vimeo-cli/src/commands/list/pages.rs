//! Page printing.

use std::pin::pin;

use anyhow::{Context, Result};
use colored::Colorize;
use futures_util::StreamExt;
use serde::Serialize;

use vimeo_core::{ListSource, Paginator};

use super::ListOptions;
use crate::output;

/// Print up to `options.pages` pages, one JSON item per line.
pub async fn print<S>(paginator: Paginator<S>, options: &ListOptions) -> Result<()>
where
    S: ListSource,
    S::Item: Serialize,
{
    let first = paginator.current();
    if first.is_empty() {
        output::note("No items found.");
        return Ok(());
    }
    output::note(&format!(
        "{} items in {} pages",
        first.total,
        first.page_count()
    ));

    let mut stream = pin!(paginator.into_stream().take(options.pages.max(1)));
    let mut next = None;

    while let Some(page) = stream.next().await {
        let page = page.context("Failed to fetch page")?;
        for item in &page.items {
            if options.pretty {
                output::json_pretty(item)?;
            } else {
                output::json(item)?;
            }
        }
        next = page.cursor.next.clone();
    }

    if let Some(next) = next {
        eprintln!();
        eprintln!("{}: {}", "Next page".dimmed(), next);
    }

    Ok(())
}
