//! The stored CLI profile.

pub mod storage;

use serde::{Deserialize, Serialize};

use vimeo_core::{AccessToken, ApiUrl, Credentials, RefreshToken, Token, TrustedFingerprints};

/// Everything the CLI remembers between runs.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<ApiUrl>,
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<AccessToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<RefreshToken>,
    #[serde(default)]
    pub scope: String,
    /// URI of the user the token acts for, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_uri: Option<String>,
    #[serde(default)]
    pub fingerprints: TrustedFingerprints,
}

impl Profile {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            ..Self::default()
        }
    }

    /// Record a freshly issued token.
    pub fn store_token(&mut self, token: &Token) {
        self.access_token = Some(token.access_token.clone());
        self.refresh_token = token.refresh_token.clone();
        self.scope = token.scope.clone();
        self.user_uri = token.user.as_ref().map(|u| u.uri.clone());
    }

    /// Forget the token after revocation.
    pub fn clear_token(&mut self) {
        self.access_token = None;
        self.refresh_token = None;
        self.scope.clear();
        self.user_uri = None;
    }

    /// Library credentials for this profile, trusting `trusted`.
    pub fn credentials(&self, trusted: TrustedFingerprints) -> Credentials {
        let credentials = Credentials::new(&self.client_id, &self.client_secret, trusted);
        match &self.access_token {
            Some(token) => credentials.with_access_token(token.clone()),
            None => credentials,
        }
    }
}

#[cfg(test)]
mod tests {
    use vimeo_core::{CertFingerprint, User};

    use super::*;

    fn token() -> Token {
        Token {
            access_token: AccessToken::new("tok"),
            token_type: "bearer".to_string(),
            scope: "public private".to_string(),
            refresh_token: Some(RefreshToken::new("ref")),
            user: Some(User {
                uri: "/users/7".to_string(),
                name: "Grace".to_string(),
                link: None,
                location: None,
                bio: None,
                account: None,
                created_time: None,
                pictures: None,
            }),
        }
    }

    #[test]
    fn store_then_clear_token() {
        let mut profile = Profile::new("id", "secret");
        profile.store_token(&token());
        assert_eq!(profile.access_token.as_ref().map(|t| t.as_str()), Some("tok"));
        assert_eq!(profile.user_uri.as_deref(), Some("/users/7"));

        profile.clear_token();
        assert!(profile.access_token.is_none());
        assert!(profile.refresh_token.is_none());
        assert!(profile.scope.is_empty());
        assert_eq!(profile.client_id, "id");
    }

    #[test]
    fn credentials_carry_token() {
        let mut profile = Profile::new("id", "secret");
        profile.store_token(&token());
        let trusted = TrustedFingerprints::new([CertFingerprint::of_der(b"cert")]);
        let credentials = profile.credentials(trusted);
        assert_eq!(credentials.bearer().unwrap(), "Bearer tok");
    }

    #[test]
    fn profile_json_shape() {
        let mut profile = Profile::new("id", "secret");
        profile.store_token(&token());
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["access_token"], "tok");
        assert_eq!(json["refresh_token"], "ref");
        assert!(json.get("api_url").is_none());

        let back: Profile = serde_json::from_value(json).unwrap();
        assert_eq!(back.scope, "public private");
    }
}
