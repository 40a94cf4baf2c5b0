//! Validated value types.
//!
//! These types enforce their invariants at construction time,
//! ensuring invalid states are unrepresentable.

mod api_url;
mod fingerprint;

pub use api_url::{ApiUrl, DEFAULT_API_URL};
pub use fingerprint::{CertFingerprint, TrustedFingerprints};
