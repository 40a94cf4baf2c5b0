//! Cursor navigation over a single list call.

use std::sync::Arc;

use async_trait::async_trait;
use futures_core::Stream;
use tracing::{debug, instrument, trace};

use super::page::{ListParams, ListQuery, Page};
use crate::Result;

/// A list call that can be re-issued with a continuation.
///
/// Implementations fetch exactly one page per call and keep no state
/// between calls.
#[async_trait]
pub trait ListSource: Send + Sync {
    /// Item type of the listed resource.
    type Item: Send;

    /// Fetch the page described by `query`.
    async fn fetch(&self, query: &ListQuery) -> Result<Page<Self::Item>>;
}

#[async_trait]
impl<S> ListSource for Arc<S>
where
    S: ListSource + ?Sized,
{
    type Item = S::Item;

    async fn fetch(&self, query: &ListQuery) -> Result<Page<Self::Item>> {
        (**self).fetch(query).await
    }
}

/// Walks a listing forward and backward using server continuations.
///
/// Holds the bound list call and the page last fetched. Every navigation
/// is a fresh request: nothing is cached, so going `next` then `previous`
/// costs two calls and may observe server-side changes in between. Errors
/// are returned as the list call produced them; nothing is retried.
pub struct Paginator<S: ListSource> {
    source: S,
    current: Page<S::Item>,
}

impl<S: ListSource> Paginator<S> {
    /// Fetch the first page with structured parameters.
    #[instrument(skip(source))]
    pub async fn start(source: S, params: ListParams) -> Result<Self> {
        let current = source.fetch(&ListQuery::Params(params)).await?;
        debug!(
            total = current.total,
            page = current.page,
            "Fetched initial page"
        );
        Ok(Self { source, current })
    }

    /// Wrap a page that was already fetched from `source`.
    pub fn new(source: S, current: Page<S::Item>) -> Self {
        Self { source, current }
    }

    /// The page last fetched.
    pub fn current(&self) -> &Page<S::Item> {
        &self.current
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch the next page, or `None` at the end without a request.
    pub async fn next(&mut self) -> Result<Option<&Page<S::Item>>> {
        let continuation = self.current.cursor.next.clone();
        self.follow("next", continuation).await
    }

    /// Fetch the previous page, or `None` at the start without a request.
    pub async fn previous(&mut self) -> Result<Option<&Page<S::Item>>> {
        let continuation = self.current.cursor.previous.clone();
        self.follow("previous", continuation).await
    }

    /// Jump to the first page, if the server linked it.
    pub async fn first(&mut self) -> Result<Option<&Page<S::Item>>> {
        let continuation = self.current.cursor.first.clone();
        self.follow("first", continuation).await
    }

    /// Jump to the last page, if the server linked it.
    pub async fn last(&mut self) -> Result<Option<&Page<S::Item>>> {
        let continuation = self.current.cursor.last.clone();
        self.follow("last", continuation).await
    }

    async fn follow(
        &mut self,
        direction: &'static str,
        continuation: Option<String>,
    ) -> Result<Option<&Page<S::Item>>> {
        let Some(continuation) = continuation else {
            trace!(direction, "No continuation, not fetching");
            return Ok(None);
        };

        debug!(direction, %continuation, "Following continuation");
        let page = self
            .source
            .fetch(&ListQuery::Continuation(continuation))
            .await?;
        self.current = page;
        Ok(Some(&self.current))
    }

    /// Stream the current page and every following one.
    pub fn into_stream(self) -> impl Stream<Item = Result<Page<S::Item>>> {
        let Paginator { source, current } = self;

        async_stream::try_stream! {
            let mut next = current.cursor.next.clone();
            yield current;

            while let Some(continuation) = next.take() {
                let page = source.fetch(&ListQuery::Continuation(continuation)).await?;
                next = page.cursor.next.clone();
                yield page;
            }
        }
    }
}

impl<S> std::fmt::Debug for Paginator<S>
where
    S: ListSource + std::fmt::Debug,
    S::Item: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paginator")
            .field("source", &self.source)
            .field("current", &self.current)
            .finish()
    }
}
