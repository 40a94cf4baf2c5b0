//! Subcommand implementations.

pub mod auth;
pub mod list;

use anyhow::{Context, Result};

use vimeo_core::{ApiUrl, TrustedFingerprints};
use vimeo_http::VimeoClient;

use crate::cli::ConnectionArgs;
use crate::profile::Profile;

/// The API URL to use: the flag, else the profile's, else the public API.
pub fn resolve_api(args: &ConnectionArgs, profile: Option<&Profile>) -> Result<ApiUrl> {
    match &args.api_url {
        Some(url) => ApiUrl::new(url).context("Invalid API URL"),
        None => Ok(profile
            .and_then(|p| p.api_url.clone())
            .unwrap_or_default()),
    }
}

/// The certificates to trust: the flags, else the profile's.
///
/// May be empty, in which case every request fails.
pub fn resolve_trusted(
    args: &ConnectionArgs,
    profile: Option<&Profile>,
) -> Result<TrustedFingerprints> {
    if !args.fingerprints.is_empty() {
        return TrustedFingerprints::parse(&args.fingerprints)
            .context("Invalid certificate fingerprint");
    }
    Ok(profile.map(|p| p.fingerprints.clone()).unwrap_or_default())
}

/// A client for the stored profile, with connection overrides applied.
pub fn profile_client(args: &ConnectionArgs, profile: &Profile) -> Result<VimeoClient> {
    let api = resolve_api(args, Some(profile))?;
    let trusted = resolve_trusted(args, Some(profile))?;
    VimeoClient::new(api, profile.credentials(trusted)).context("Failed to create client")
}

#[cfg(test)]
mod tests {
    use vimeo_core::CertFingerprint;

    use super::*;

    const FP: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    #[test]
    fn flags_override_profile() {
        let mut profile = Profile::new("id", "secret");
        profile.api_url = Some(ApiUrl::new("http://localhost:9000").unwrap());
        profile.fingerprints = TrustedFingerprints::new([CertFingerprint::of_der(b"old")]);

        let args = ConnectionArgs {
            api_url: Some("https://api.example.com".to_string()),
            fingerprints: vec![FP.to_string()],
        };

        let api = resolve_api(&args, Some(&profile)).unwrap();
        assert_eq!(api.to_string(), "https://api.example.com");
        let trusted = resolve_trusted(&args, Some(&profile)).unwrap();
        assert_eq!(trusted.len(), 1);
        assert!(trusted.contains_der(b"hello"));
    }

    #[test]
    fn falls_back_to_profile_then_default() {
        let args = ConnectionArgs::default();
        assert_eq!(resolve_api(&args, None).unwrap(), ApiUrl::default());
        assert!(resolve_trusted(&args, None).unwrap().is_empty());

        let mut profile = Profile::new("id", "secret");
        profile.api_url = Some(ApiUrl::new("http://localhost:9000").unwrap());
        assert_eq!(
            resolve_api(&args, Some(&profile)).unwrap().to_string(),
            "http://localhost:9000"
        );
    }

    #[test]
    fn bad_fingerprint_is_rejected() {
        let args = ConnectionArgs {
            api_url: None,
            fingerprints: vec!["zz".to_string()],
        };
        assert!(resolve_trusted(&args, None).is_err());
    }
}
