//! Session and account shapes owned by the authentication service.

use serde::{Deserialize, Serialize};

/// An authenticated session as returned by the auth service's token endpoint.
///
/// The studio core holds at most one, read-only; presence decides routing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub user: UserIdentity,
}

/// The identity attached to a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserIdentity {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Subscription tier of a user profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Free,
    Pro,
    Enterprise,
}

/// Profile row shape declared by the application's data model.
///
/// Latent: the pipeline itself never reads or writes this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub plan: Plan,
    pub used_quota: i64,
    pub created_at: String,
}

/// Stored record shape for one generation run. Latent, like [`UserProfile`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedImageRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    pub original_url: String,
    pub generated_urls: Vec<String>,
    pub category: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_from_token_response() {
        let session: Session = serde_json::from_str(
            r#"{
                "access_token": "jwt",
                "token_type": "bearer",
                "expires_in": 3600,
                "refresh_token": "r1",
                "user": {"id": "u-1", "email": "a@b.co"}
            }"#,
        )
        .unwrap();
        assert_eq!(session.user.email.as_deref(), Some("a@b.co"));
        assert_eq!(session.expires_in, Some(3600));
    }

    #[test]
    fn test_plan_wire_names() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"id":"u-1","plan":"pro","used_quota":3,"created_at":"2024-01-01"}"#,
        )
        .unwrap();
        assert_eq!(profile.plan, Plan::Pro);
        assert!(profile.email.is_none());
    }
}
