use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::domain::ValidationError;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.linkmobility.eu/";

const ENV_BASE_URL: &str = "WEBSMS_BASE_URL";
const ENV_AUTHENTICATION_TYPE: &str = "WEBSMS_AUTHENTICATION_TYPE";
const ENV_ACCESS_TOKEN: &str = "WEBSMS_ACCESS_TOKEN";
const ENV_USERNAME: &str = "WEBSMS_USERNAME";
const ENV_PASSWORD: &str = "WEBSMS_PASSWORD";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Authentication scheme selected in [`WebSmsApiOptions`].
pub enum AuthenticationType {
    /// HTTP Basic with `username` and `password`.
    #[default]
    Basic,
    /// Bearer token with `accessToken`.
    Bearer,
}

impl FromStr for AuthenticationType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "bearer" => Ok(Self::Bearer),
            _ => Err(ValidationError::UnsupportedAuthenticationType {
                input: s.to_owned(),
            }),
        }
    }
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Connection settings, typically loaded from the host application's configuration.
///
/// Credentials are optional here; [`Auth::from_options`](crate::Auth::from_options)
/// checks that the ones required by `authentication_type` are present.
pub struct WebSmsApiOptions {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub authentication_type: AuthenticationType,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

impl Default for WebSmsApiOptions {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            authentication_type: AuthenticationType::default(),
            access_token: None,
            username: None,
            password: None,
        }
    }
}

impl WebSmsApiOptions {
    /// Read options from `WEBSMS_*` environment variables.
    ///
    /// Unset variables keep their defaults: `WEBSMS_BASE_URL`,
    /// `WEBSMS_AUTHENTICATION_TYPE` (`basic` or `bearer`), `WEBSMS_ACCESS_TOKEN`,
    /// `WEBSMS_USERNAME`, `WEBSMS_PASSWORD`.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ValidationError> {
        let authentication_type = match lookup(ENV_AUTHENTICATION_TYPE) {
            Some(value) => value.parse()?,
            None => AuthenticationType::default(),
        };
        Ok(Self {
            base_url: lookup(ENV_BASE_URL).unwrap_or_else(default_base_url),
            authentication_type,
            access_token: lookup(ENV_ACCESS_TOKEN),
            username: lookup(ENV_USERNAME),
            password: lookup(ENV_PASSWORD),
        })
    }
}

impl fmt::Debug for WebSmsApiOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "***");
        f.debug_struct("WebSmsApiOptions")
            .field("base_url", &self.base_url)
            .field("authentication_type", &self.authentication_type)
            .field("access_token", &redact(&self.access_token))
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn from_lookup_uses_defaults_when_unset() {
        let options = WebSmsApiOptions::from_lookup(lookup(&[])).unwrap();
        assert_eq!(options.base_url, DEFAULT_BASE_URL);
        assert_eq!(options.authentication_type, AuthenticationType::Basic);
        assert!(options.access_token.is_none());
    }

    #[test]
    fn from_lookup_reads_bearer_settings() {
        let options = WebSmsApiOptions::from_lookup(lookup(&[
            ("WEBSMS_BASE_URL", "https://example.invalid/"),
            ("WEBSMS_AUTHENTICATION_TYPE", "Bearer"),
            ("WEBSMS_ACCESS_TOKEN", "tok"),
        ]))
        .unwrap();
        assert_eq!(options.base_url, "https://example.invalid/");
        assert_eq!(options.authentication_type, AuthenticationType::Bearer);
        assert_eq!(options.access_token.as_deref(), Some("tok"));
    }

    #[test]
    fn from_lookup_rejects_unknown_authentication_type() {
        let err =
            WebSmsApiOptions::from_lookup(lookup(&[("WEBSMS_AUTHENTICATION_TYPE", "digest")]))
                .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::UnsupportedAuthenticationType { .. }
        ));
    }

    #[test]
    fn deserializes_from_camel_case_config() {
        let options: WebSmsApiOptions = serde_json::from_str(
            r#"{"authenticationType": "basic", "username": "user", "password": "pass"}"#,
        )
        .unwrap();
        assert_eq!(options.base_url, DEFAULT_BASE_URL);
        assert_eq!(options.authentication_type, AuthenticationType::Basic);
        assert_eq!(options.username.as_deref(), Some("user"));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let options = WebSmsApiOptions {
            access_token: Some("secret-token".to_owned()),
            password: Some("secret-password".to_owned()),
            ..Default::default()
        };
        let debug = format!("{options:?}");
        assert!(!debug.contains("secret"));
    }
}
