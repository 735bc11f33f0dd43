//! Thin client for the hosted authentication service (GoTrue-style REST).

use http::header::AUTHORIZATION;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;

use vitrin_types::account::{Session, UserIdentity};

use crate::error::{Error, Result};

/// Environment variable holding the auth service URL.
pub const AUTH_URL_ENV: &str = "SUPABASE_URL";
/// Environment variable holding the public (anon) key.
pub const AUTH_ANON_KEY_ENV: &str = "SUPABASE_ANON_KEY";

const MISSING_CONFIG_MESSAGE: &str =
    "Supabase URL ve Anon Anahtarı \"Secrets\" panelinde tanımlanmalıdır.";

/// Client for the authentication subsystem.
///
/// Construction can fail when configuration is absent; the session gate
/// turns that failure into the configuration-error view.
#[derive(Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

impl AuthClient {
    /// Create a client from `SUPABASE_URL` and `SUPABASE_ANON_KEY`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfig`] when either variable is missing
    /// or the HTTP client cannot be built.
    pub fn from_env() -> Result<Self> {
        let url = std::env::var(AUTH_URL_ENV).ok().filter(|v| !v.trim().is_empty());
        let key = std::env::var(AUTH_ANON_KEY_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty());
        match (url, key) {
            (Some(url), Some(key)) => Self::new(url, key),
            _ => Err(Error::InvalidConfig {
                message: MISSING_CONFIG_MESSAGE.into(),
            }),
        }
    }

    /// Create a client for an explicit service URL and anon key.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfig`] when the key is not a valid
    /// header value or the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Result<Self> {
        let anon_key = anon_key.into();
        let mut headers = HeaderMap::new();
        let mut key_value =
            HeaderValue::from_str(&anon_key).map_err(|_| Error::InvalidConfig {
                message: "Supabase istemcisi başlatılamadı: invalid anon key".into(),
            })?;
        key_value.set_sensitive(true);
        headers.insert(HeaderName::from_static("apikey"), key_value);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|err| Error::InvalidConfig {
                message: format!("Supabase istemcisi başlatılamadı: {err}"),
            })?;

        let mut base_url = base_url.into().trim().to_string();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { http, base_url })
    }

    /// Exchange email/password credentials for a session.
    ///
    /// # Errors
    /// Returns [`Error::Api`] on a rejected grant, or a transport/parse
    /// error.
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);
        let response = self
            .http
            .post(url)
            .json(&PasswordGrant { email, password })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Error::Api {
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }
        Ok(response.json::<Session>().await?)
    }

    /// Fetch the identity a token belongs to.
    ///
    /// # Errors
    /// Returns [`Error::Api`] when the token is rejected, or a
    /// transport/parse error.
    pub async fn get_user(&self, access_token: &str) -> Result<UserIdentity> {
        let url = format!("{}/auth/v1/user", self.base_url);
        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, bearer(access_token)?)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Error::Api {
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }
        Ok(response.json::<UserIdentity>().await?)
    }

    /// Invalidate a session remotely. Callers treat this as best-effort.
    ///
    /// # Errors
    /// Returns [`Error::Api`] when the service refuses, or a transport
    /// error.
    pub async fn sign_out(&self, access_token: &str) -> Result<()> {
        let url = format!("{}/auth/v1/logout", self.base_url);
        let response = self
            .http
            .post(url)
            .header(AUTHORIZATION, bearer(access_token)?)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Error::Api {
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }
        Ok(())
    }
}

fn bearer(access_token: &str) -> Result<HeaderValue> {
    let mut value =
        HeaderValue::from_str(&format!("Bearer {access_token}")).map_err(|_| Error::Auth {
            message: "Invalid access token".into(),
        })?;
    value.set_sensitive(true);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::with_env;

    #[test]
    fn test_from_env_requires_both_variables() {
        with_env(
            &[
                (AUTH_URL_ENV, Some("https://proj.supabase.co")),
                (AUTH_ANON_KEY_ENV, None),
            ],
            || {
                let err = AuthClient::from_env().err().unwrap();
                assert!(matches!(err, Error::InvalidConfig { .. }));
                assert!(err.to_string().contains("Supabase"));
            },
        );
    }

    #[test]
    fn test_from_env_treats_blank_values_as_missing() {
        with_env(
            &[
                (AUTH_URL_ENV, Some("   ")),
                (AUTH_ANON_KEY_ENV, Some("anon")),
            ],
            || {
                assert!(AuthClient::from_env().is_err());
            },
        );
    }

    #[test]
    fn test_from_env_builds_client() {
        with_env(
            &[
                (AUTH_URL_ENV, Some("https://proj.supabase.co/")),
                (AUTH_ANON_KEY_ENV, Some("anon-key")),
            ],
            || {
                let client = AuthClient::from_env().unwrap();
                assert_eq!(client.base_url, "https://proj.supabase.co");
            },
        );
    }

    #[test]
    fn test_invalid_anon_key_is_rejected() {
        let err = AuthClient::new("https://proj.supabase.co", "bad\nkey")
            .err()
            .unwrap();
        assert!(err.to_string().contains("başlatılamadı"));
    }

    #[test]
    fn test_invalid_access_token_is_rejected() {
        let err = bearer("bad\ntoken").err().unwrap();
        assert!(matches!(err, Error::Auth { .. }));
    }
}
