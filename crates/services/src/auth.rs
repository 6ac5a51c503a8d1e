use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::error::ServiceError;

/// Bearer token shared by every client of one signed-in user.
///
/// Cloning shares the same slot, so clearing it in one place (e.g. on a 401) signs
/// out everywhere.
#[derive(Clone, Default)]
pub struct AuthSession {
    token: Arc<RwLock<Option<String>>>,
}

impl AuthSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.set_token(token);
        session
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        let mut slot = self.token.write().unwrap_or_else(PoisonError::into_inner);
        *slot = if token.trim().is_empty() {
            None
        } else {
            Some(token)
        };
    }

    pub fn clear(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("signed_in", &self.is_signed_in())
            .finish()
    }
}

/// Account details returned by login, signup and the profile endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    token: String,
    #[serde(default)]
    user: Option<UserProfile>,
}

/// Sign-in flows against `/auth/*`.
#[derive(Clone, Debug)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    #[must_use]
    pub fn session(&self) -> &AuthSession {
        self.api.auth()
    }

    /// Sign in and keep the returned token.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::InvalidInput` for blank credentials, `Unauthorized` for
    /// rejected credentials, and transport or decode errors otherwise.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, ServiceError> {
        let credentials = credentials(email, password, None)?;
        let response: AuthResponse = self.api.post_json("auth/login", &credentials).await?;
        Ok(self.accept(response))
    }

    /// Create an account and sign in with it.
    ///
    /// # Errors
    ///
    /// Same as [`AuthService::login`]; a blank name is also rejected.
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<UserProfile, ServiceError> {
        if name.trim().is_empty() {
            return Err(ServiceError::InvalidInput("name is required".into()));
        }
        let credentials = credentials(email, password, Some(name.trim()))?;
        let response: AuthResponse = self.api.post_json("auth/signup", &credentials).await?;
        Ok(self.accept(response))
    }

    /// Fetch the signed-in user's profile; also validates a restored token.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Unauthorized` when no valid token is held.
    pub async fn profile(&self) -> Result<UserProfile, ServiceError> {
        if !self.session().is_signed_in() {
            return Err(ServiceError::Unauthorized);
        }
        self.api.get_json("auth/profile").await
    }

    pub fn logout(&self) {
        log::info!("signing out");
        self.session().clear();
    }

    fn accept(&self, response: AuthResponse) -> UserProfile {
        self.session().set_token(response.token);
        log::info!("signed in");
        response.user.unwrap_or_default()
    }
}

fn credentials<'a>(
    email: &'a str,
    password: &'a str,
    name: Option<&'a str>,
) -> Result<Credentials<'a>, ServiceError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(ServiceError::InvalidInput(
            "email and password are required".into(),
        ));
    }
    Ok(Credentials {
        email,
        password,
        name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_one_token_slot() {
        let session = AuthSession::new();
        let other = session.clone();
        session.set_token("abc");
        assert_eq!(other.token().as_deref(), Some("abc"));
        other.clear();
        assert!(!session.is_signed_in());
    }

    #[test]
    fn blank_token_counts_as_signed_out() {
        let session = AuthSession::with_token("  ");
        assert!(!session.is_signed_in());
    }

    #[test]
    fn debug_output_hides_token() {
        let session = AuthSession::with_token("secret-token");
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("signed_in: true"));
    }

    #[test]
    fn blank_credentials_are_rejected_before_sending() {
        assert!(matches!(
            credentials(" ", "pw", None),
            Err(ServiceError::InvalidInput(_))
        ));
        assert!(credentials("a@b.c", "pw", None).is_ok());
    }
}
