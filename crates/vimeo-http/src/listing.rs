//! List endpoints as [`ListSource`]s.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use vimeo_core::{Credentials, ListParams, ListQuery, ListSource, Page, Paginator, Result};

use crate::client::HttpClient;
use crate::endpoints::PageEnvelope;

/// One list endpoint, bound to a client and its credentials.
///
/// The access token is read from the shared credentials on every fetch, so
/// a token set after the listing was created is picked up.
pub struct Listing<T> {
    http: HttpClient,
    credentials: Arc<RwLock<Credentials>>,
    path: String,
    _item: PhantomData<fn() -> T>,
}

impl<T> Listing<T> {
    pub(crate) fn new(
        http: HttpClient,
        credentials: Arc<RwLock<Credentials>>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            http,
            credentials,
            path: path.into(),
            _item: PhantomData,
        }
    }

    /// The API path listed, e.g. `/me/videos`.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl<T> Listing<T>
where
    T: DeserializeOwned + Send,
{
    /// Fetch a single page.
    pub async fn page(&self, params: ListParams) -> Result<Page<T>> {
        self.fetch(&ListQuery::Params(params)).await
    }

    /// Fetch the first page and return a paginator positioned on it.
    pub async fn paginate(self, params: ListParams) -> Result<Paginator<Self>> {
        Paginator::start(self, params).await
    }
}

#[async_trait]
impl<T> ListSource for Listing<T>
where
    T: DeserializeOwned + Send,
{
    type Item = T;

    #[instrument(skip(self), fields(path = %self.path))]
    async fn fetch(&self, query: &ListQuery) -> Result<Page<T>> {
        let bearer = self.credentials.read().await.bearer()?;

        let request = match query {
            ListQuery::Params(params) => self
                .http
                .request(Method::GET, &self.path)
                .query(params),
            ListQuery::Continuation(continuation) => {
                let mut url = self.http.api().endpoint(&self.path);
                url.set_query(Some(continuation));
                self.http.request_url(Method::GET, url)
            }
        };

        let envelope: PageEnvelope<T> = self
            .http
            .send_json(request.header(AUTHORIZATION, bearer), "page")
            .await?;
        let page = envelope.into_page();

        debug!(
            total = page.total,
            page = page.page,
            items = page.items.len(),
            "Fetched page"
        );
        Ok(page)
    }
}

impl<T> Clone for Listing<T> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            credentials: Arc::clone(&self.credentials),
            path: self.path.clone(),
            _item: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Listing<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listing")
            .field("path", &self.path)
            .finish()
    }
}
