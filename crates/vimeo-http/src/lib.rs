//! vimeo-http - reqwest-backed Vimeo API client.
//!
//! Provides the HTTP executor (with certificate pinning, interceptors and a
//! request observer), the [`AuthManager`] credential flows, and a small
//! resource client whose list endpoints plug into
//! [`Paginator`](vimeo_core::Paginator).

mod auth;
mod client;
mod endpoints;
mod listing;
mod middleware;
mod tls;
mod vimeo;

pub use auth::AuthManager;
pub use client::{HttpClient, HttpClientBuilder};
pub use endpoints::ACCEPT_VERSION;
pub use listing::Listing;
pub use middleware::{HeaderInterceptor, HttpResponse, Interceptor, NoopObserver, RequestObserver};
pub use vimeo::{UserRef, VimeoClient};
