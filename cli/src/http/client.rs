//! HTTP client implementation

use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};

use crate::errors::CliError;

/// Per-call timeout, distinct from the poll windows. A stalled call must
/// not hang the process.
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Bearer-authenticated HTTP client for a single remote API
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpClient {
    /// Create a new HTTP client for the given API base URL
    pub fn new(base_url: &str, token: &str) -> Result<Self, CliError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);
        self.client
            .request(method, url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
    }

    async fn remote_error(&self, response: Response) -> CliError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        error!("HTTP request failed: {} - {}", status, body);
        CliError::Remote {
            status: status.as_u16(),
            body,
        }
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, CliError> {
        let response = self.request(Method::GET, path).send().await?;

        if !response.status().is_success() {
            return Err(self.remote_error(response).await);
        }

        let body = response.json().await?;
        Ok(body)
    }

    /// Make a GET request, mapping a 404 to `None`
    pub async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, CliError> {
        let response = self.request(Method::GET, path).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(self.remote_error(response).await);
        }

        let body = response.json().await?;
        Ok(Some(body))
    }

    /// Make a POST request
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, CliError> {
        let response = self.request(Method::POST, path).json(body).send().await?;

        if !response.status().is_success() {
            return Err(self.remote_error(response).await);
        }

        let body = response.json().await?;
        Ok(body)
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, CliError> {
        let response = self.request(Method::DELETE, path).send().await?;

        if !response.status().is_success() {
            return Err(self.remote_error(response).await);
        }

        let body = response.json().await?;
        Ok(body)
    }
}
