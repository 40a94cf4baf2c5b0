//! vimeo-core - Core types and traits for the Vimeo API client toolkit.
//!
//! Transport-agnostic pieces: credentials and tokens, the error taxonomy,
//! authorization URL construction, and the paginator. The HTTP side lives in
//! `vimeo-http`.

pub mod auth;
pub mod credentials;
pub mod error;
pub mod models;
pub mod pagination;
pub mod tokens;
pub mod types;

pub use auth::{AuthorizationRequest, authorization_url};
pub use credentials::Credentials;
pub use error::Error;
pub use models::{Category, Channel, User, Video};
pub use pagination::{Cursor, Direction, ListParams, ListQuery, ListSource, Page, Paginator};
pub use tokens::{AccessToken, RefreshToken, Token};
pub use types::{ApiUrl, CertFingerprint, TrustedFingerprints};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
