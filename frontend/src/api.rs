//! Thin JSON client for the investigation REST API.
//!
//! One entry point, [`ApiClient::request`], takes a method, a path relative to the
//! configured API base and an optional JSON body, and resolves to the decoded response
//! or a normalized [`ApiError`]. The session token, when present, is sent in the
//! `Authorization` header. There is no retry, caching or de-duplication; a 401 comes
//! back as [`ApiError::Unauthorized`] and the caller decides to sign the user out.

use gloo_net::http::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use common::config::AppConfig;
use common::error::ApiError;

#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    config: AppConfig,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: AppConfig, token: Option<String>) -> Self {
        Self { config, token }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.config.url(path);
        let label = format!("{} {}", method, url);

        let mut builder = RequestBuilder::new(&url)
            .method(method)
            .header("Accept", "application/json");
        if let Some(authorization) = self.config.authorization(self.token.as_deref()) {
            builder = builder.header("Authorization", &authorization);
        }
        let request = match body {
            Some(body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(|err| ApiError::Decode(err.to_string()))?;

        let response = request.send().await.map_err(|err| {
            gloo_console::error!(format!("{} failed: {}", label, err));
            ApiError::Network(err.to_string())
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;

        if !response.ok() {
            let err = ApiError::from_response(status, &text);
            gloo_console::error!(format!("{} -> {}", label, err));
            return Err(err);
        }

        let text = if text.trim().is_empty() { "null" } else { text.as_str() };
        serde_json::from_str(text).map_err(|err| {
            gloo_console::error!(format!("{}: undecodable body: {}", label, err));
            ApiError::from(err)
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request::<T, ()>(Method::GET, path, None).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, Some(body)).await
    }

    /// DELETE usually answers 204 with no body, which decodes as `null`.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.request::<serde_json::Value, ()>(Method::DELETE, path, None)
            .await
            .map(|_| ())
    }
}
