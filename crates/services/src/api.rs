use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::auth::AuthSession;
use crate::config::BackendConfig;
use crate::error::ServiceError;

/// JSON-over-HTTP client for the practice backend.
///
/// Attaches the bearer token to every request and clears it on 401.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    config: BackendConfig,
    auth: AuthSession,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns `ServiceError::Network` if the HTTP client cannot be built.
    pub fn new(config: BackendConfig, auth: AuthSession) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            config,
            auth,
        })
    }

    #[must_use]
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    #[must_use]
    pub fn auth(&self) -> &AuthSession {
        &self.auth
    }

    /// # Errors
    ///
    /// See [`ServiceError`].
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ServiceError> {
        let url = self.config.endpoint(path);
        log::debug!("GET {url}");
        self.send(self.client.get(url)).await
    }

    /// # Errors
    ///
    /// See [`ServiceError`].
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ServiceError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        log::debug!("POST {url}");
        self.send(self.client.post(url).json(body)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ServiceError> {
        let request = match self.auth.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            log::warn!("backend rejected the session token; signing out");
            self.auth.clear();
            return Err(ServiceError::Unauthorized);
        }
        if !status.is_success() {
            return Err(ServiceError::Status(status));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|err| ServiceError::Decode(err.to_string()))
    }
}
