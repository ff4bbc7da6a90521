// File: src/client/core.rs
// Shared HTTP plumbing for the resource clients.
use crate::client::error::{ApiError, ApiResult};
use crate::config::Config;
use reqwest::{Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(format!("MindConnect/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            token: None,
        })
    }

    pub fn from_config(config: &Config) -> ApiResult<Self> {
        Self::new(
            &config.api_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Copy of this client that sends `Authorization: Bearer <token>`.
    pub fn authorized(&self, token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
            ..self.clone()
        }
    }

    pub fn anonymous(&self) -> Self {
        Self {
            token: None,
            ..self.clone()
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_authorized(&self) -> bool {
        self.token.is_some()
    }

    /// `prefix/<segment>` with the segment percent-encoded, so `/`, `?` and `#` stay inside it.
    pub(crate) fn path_with_segment(prefix: &str, segment: &str) -> ApiResult<String> {
        let mut scratch =
            Url::parse("http://localhost/").map_err(|e| ApiError::InvalidPath(e.to_string()))?;
        scratch
            .path_segments_mut()
            .map_err(|()| ApiError::InvalidPath(prefix.to_string()))?
            .clear()
            .push(segment);
        Ok(format!("{}{}", prefix.trim_end_matches('/'), scratch.path()))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str, with_auth: bool) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match (&self.token, with_auth) {
            (Some(token), true) => builder.bearer_auth(token),
            _ => builder,
        }
    }

    async fn execute(&self, method: Method, path: &str, builder: RequestBuilder) -> ApiResult<String> {
        log::debug!("{} {}", method, path);
        let response = builder.send().await.map_err(|e| {
            log::warn!("{} {} failed: {}", method, path, e);
            ApiError::from(e)
        })?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            log::warn!("{} {} returned {}", method, path, status);
            return Err(ApiError::Server {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    async fn send<B, T>(&self, method: Method, path: &str, body: Option<&B>, with_auth: bool) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut builder = self.request(method.clone(), path, with_auth);
        if let Some(b) = body {
            builder = builder.json(b);
        }
        let text = self.execute(method, path, builder).await?;
        Ok(serde_json::from_str(&text)?)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send::<(), T>(Method::GET, path, None, true).await
    }

    /// GET without the bearer header, for the endpoints the server leaves open.
    pub(crate) async fn get_public<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send::<(), T>(Method::GET, path, None, false).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::POST, path, Some(body), true).await
    }

    pub(crate) async fn post_public<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::POST, path, Some(body), false).await
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::PUT, path, Some(body), true).await
    }

    pub(crate) async fn delete(&self, path: &str) -> ApiResult<()> {
        let builder = self.request(Method::DELETE, path, true);
        self.execute(Method::DELETE, path, builder).await?;
        Ok(())
    }
}
