//! Error types for the vimeo toolkit.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, decoding, configuration, protocol and input
//! validation errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for vimeo operations.
///
/// Nothing in this workspace retries: every failure surfaces as one of
/// these variants.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, certificate pinning, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (rejected credentials or token).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// The response body did not match the expected JSON shape.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The client was asked to do something it is not configured for.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Protocol errors (non-success status other than 401/403).
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Input validation errors (bad URL, bad fingerprint).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// True for connection, TLS and pinning failures.
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// True when the server rejected the credentials or token.
    pub fn is_invalid_credentials(&self) -> bool {
        matches!(self, Error::Auth(AuthError::InvalidCredentials { .. }))
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// TLS/SSL error, including a certificate outside the pinned set.
    #[error("TLS error: {message}")]
    Tls { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The server answered 401 or 403.
    #[error("invalid credentials (HTTP {status})")]
    InvalidCredentials {
        status: u16,
        message: Option<String>,
    },
}

/// A response body that could not be decoded.
#[derive(Debug, Error)]
#[error("failed to decode {target}: {source}")]
pub struct DecodeError {
    /// What was being decoded (e.g. "token response").
    pub target: &'static str,
    #[source]
    pub source: serde_json::Error,
}

impl DecodeError {
    pub fn new(target: &'static str, source: serde_json::Error) -> Self {
        Self { target, source }
    }
}

/// Misuse of the client that no amount of retrying will fix.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// An authenticated operation was attempted without an access token.
    #[error("an access token is required for this operation")]
    MissingAccessToken,

    /// A grant was attempted without a client id.
    #[error("a client id is required for this operation")]
    MissingClientId,

    /// The TLS stack could not be set up.
    #[error("TLS setup failed: {message}")]
    Tls { message: String },

    /// The HTTP client could not be built.
    #[error("HTTP client setup failed: {message}")]
    Client { message: String },
}

/// Protocol-level errors from API responses.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// User-facing error message (if present).
    pub error: Option<String>,
    /// Developer-facing message (if present).
    pub developer_message: Option<String>,
    /// Numeric API error code (if present).
    pub error_code: Option<i64>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(code) = self.error_code {
            write!(f, " [{}]", code)?;
        }
        if let Some(ref error) = self.error {
            write!(f, ": {}", error)?;
        }
        if let Some(ref message) = self.developer_message {
            write!(f, " ({})", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(
        status: u16,
        error: Option<String>,
        developer_message: Option<String>,
        error_code: Option<i64>,
    ) -> Self {
        Self {
            status,
            error,
            developer_message,
            error_code,
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid certificate fingerprint.
    #[error("invalid certificate fingerprint '{value}': {reason}")]
    Fingerprint { value: String, reason: String },
}
