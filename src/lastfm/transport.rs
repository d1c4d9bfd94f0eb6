use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::{
    config::Config,
    error::{Result, ScrobbleError},
};

/// Request parameters, kept sorted by key.
pub type Params = BTreeMap<String, String>;

/// Status code and decoded JSON body of an API call.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends parameter sets to the Last.fm endpoint.
///
/// Implementations do not interpret the status code; callers decide whether a
/// non-2xx answer is an error.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Sends `params` as a query string.
    async fn get(&self, params: &Params) -> Result<ApiResponse>;

    /// Sends `params` as a form-encoded body.
    async fn post(&self, params: &Params) -> Result<ApiResponse>;
}

/// [`ApiTransport`] backed by a reqwest client with a bounded timeout.
pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url: config.api_url.clone(),
        })
    }

    async fn decode(res: reqwest::Response) -> Result<ApiResponse> {
        let status = res.status().as_u16();
        let text = res.text().await?;
        let body = serde_json::from_str(&text).map_err(|e| {
            ScrobbleError::Response(format!("status {status}, body is not JSON: {e}"))
        })?;
        Ok(ApiResponse { status, body })
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn get(&self, params: &Params) -> Result<ApiResponse> {
        log::debug!("GET {} {:?}", self.url, params.keys().collect::<Vec<_>>());
        let res = self.client.get(&self.url).query(params).send().await?;
        Self::decode(res).await
    }

    async fn post(&self, params: &Params) -> Result<ApiResponse> {
        log::debug!("POST {} {:?}", self.url, params.keys().collect::<Vec<_>>());
        let res = self.client.post(&self.url).form(params).send().await?;
        Self::decode(res).await
    }
}
