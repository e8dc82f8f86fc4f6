//! HTTP client for Console API requests.
//!
//! A low-level wrapper over `reqwest` handling authentication headers,
//! response status checking, and payload unwrapping.

use super::error::ApiError;
use super::models::Wrapper;
use serde::de::DeserializeOwned;

/// Makes requests to the Console API and unwraps the enveloped payloads.
///
pub struct Client {
    base_url: String,
    access_token: Option<String>,
    http_client: reqwest::Client,
}

impl Client {
    /// Return a new instance for the given base URL and optional token.
    ///
    /// # Panics
    /// Panics if the HTTP client cannot be created, which only happens on
    /// invalid builder configuration that this constructor does not use.
    pub fn new(base_url: &str, access_token: Option<&str>) -> Self {
        Client {
            base_url: base_url.trim_end_matches('/').to_owned(),
            access_token: access_token.map(|t| t.to_owned()),
            http_client: reqwest::Client::builder()
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// GET the path and decode the enveloped payload.
    ///
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self
            .http_client
            .get(format!("{}/{}", self.base_url, path));
        let request = match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().await?;
        Self::decode(response).await
    }

    /// POST a JSON body to the path and decode the enveloped payload.
    ///
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T, ApiError> {
        let request = self
            .http_client
            .post(format!("{}/{}", self.base_url, path))
            .json(&body);
        let request = match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("Unable to read response"));
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice::<Wrapper<T>>(&bytes)
            .map(|wrapper| wrapper.data)
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}
