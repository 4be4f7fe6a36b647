use crate::domain::model::{
    Alternative, DrugRecord, ErrorBody, FilterCriteria, PathRequest, PathResult, Stats,
};
use crate::domain::ports::{ConfigProvider, DrugApi};
use crate::utils::error::{DrugNetError, Result};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Thin wrapper over the drug service's REST API.
///
/// Holds nothing but an immutable base URL and a `reqwest::Client`, so it is
/// cheap to clone and safe to share between tasks. There are no retries;
/// transport failures and non-2xx statuses are returned to the caller as-is.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

#[derive(Debug, Clone)]
pub struct ApiClientBuilder {
    base_url: String,
    timeout: Option<Duration>,
    headers: HashMap<String, String>,
}

impl ApiClientBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
            headers: HashMap::new(),
        }
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn headers(mut self, headers: &HashMap<String, String>) -> Self {
        self.headers
            .extend(headers.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    pub fn build(self) -> Result<ApiClient> {
        validate_url("api.base_url", &self.base_url)?;
        let base_url = Url::parse(&self.base_url)?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                DrugNetError::InvalidConfigValueError {
                    field: "api.headers".to_string(),
                    value: name.clone(),
                    reason: e.to_string(),
                }
            })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| DrugNetError::InvalidConfigValueError {
                    field: format!("api.headers.{}", name),
                    value: value.clone(),
                    reason: e.to_string(),
                })?;
            default_headers.insert(header_name, header_value);
        }

        let mut builder = Client::builder().default_headers(default_headers);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(ApiClient {
            client: builder.build()?,
            base_url,
        })
    }
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        ApiClientBuilder::new(base_url).build()
    }

    pub fn builder(base_url: impl Into<String>) -> ApiClientBuilder {
        ApiClientBuilder::new(base_url)
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        ApiClientBuilder::new(config.base_url())
            .timeout(config.timeout())
            .headers(config.headers())
            .build()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// 把路徑片段接在 base URL 後面；每個片段各自做 percent-encoding，
    /// 所以藥名裡的 `/`、空白都不會改變路由。
    /// `""`、`.`、`..` 無法成為單一片段 (會被略過或正規化成上一層)，直接拒絕。
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        if let Some(segment) = segments
            .iter()
            .find(|s| matches!(**s, "" | "." | ".."))
        {
            return Err(DrugNetError::InvalidInput {
                field: "name".to_string(),
                reason: format!("'{}' cannot be used as a drug name in a URL path", segment),
            });
        }

        let mut url = self.base_url.clone();
        if !segments.is_empty() {
            url.path_segments_mut()
                .map_err(|_| DrugNetError::ConfigError {
                    message: format!("Base URL cannot be a base: {}", self.base_url),
                })?
                .pop_if_empty()
                .extend(segments);
        }
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!("Could not read error body for {}: {}", status, e);
                    String::new()
                }
            };
            let detail = match serde_json::from_str::<ErrorBody>(&body) {
                Ok(error_body) => error_body.detail,
                Err(_) if body.trim().is_empty() => status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
                Err(_) => body,
            };
            tracing::warn!("⚠️ Backend returned {}: {}", status, detail);
            return Err(DrugNetError::Http {
                status: status.as_u16(),
                detail,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn get_stats(&self) -> Result<Stats> {
        let url = self.endpoint(&[])?;
        tracing::debug!("GET {}", url);
        self.send(self.client.get(url)).await
    }

    pub async fn search_drugs(&self, query: &str) -> Result<Vec<String>> {
        let mut url = self.endpoint(&["drugs", "search"])?;
        url.query_pairs_mut().append_pair("query", query);
        tracing::debug!("GET {}", url);
        self.send(self.client.get(url)).await
    }

    pub async fn get_drug_details(&self, name: &str) -> Result<DrugRecord> {
        let url = self.endpoint(&["drugs", name])?;
        tracing::debug!("GET {}", url);
        self.send(self.client.get(url)).await
    }

    pub async fn get_shortest_path(&self, start: &str, end: &str) -> Result<PathResult> {
        let url = self.endpoint(&["analysis", "path"])?;
        let body = PathRequest {
            start_drug: start.to_string(),
            end_drug: end.to_string(),
        };
        tracing::debug!("POST {} {:?}", url, body);
        self.send(self.client.post(url).json(&body)).await
    }

    pub async fn get_alternatives(
        &self,
        name: &str,
        top_n: Option<u32>,
    ) -> Result<Vec<Alternative>> {
        let mut url = self.endpoint(&["analysis", "alternatives", name])?;
        if let Some(top_n) = top_n {
            url.query_pairs_mut()
                .append_pair("top_n", &top_n.to_string());
        }
        tracing::debug!("GET {}", url);
        self.send(self.client.get(url)).await
    }

    pub async fn filter_drugs(&self, criteria: &FilterCriteria) -> Result<Vec<DrugRecord>> {
        let url = self.endpoint(&["drugs", "filter"])?;
        tracing::debug!("POST {} {:?}", url, criteria);
        self.send(self.client.post(url).json(criteria)).await
    }
}

#[async_trait]
impl DrugApi for ApiClient {
    async fn get_stats(&self) -> Result<Stats> {
        ApiClient::get_stats(self).await
    }

    async fn search_drugs(&self, query: &str) -> Result<Vec<String>> {
        ApiClient::search_drugs(self, query).await
    }

    async fn get_drug_details(&self, name: &str) -> Result<DrugRecord> {
        ApiClient::get_drug_details(self, name).await
    }

    async fn get_shortest_path(&self, start: &str, end: &str) -> Result<PathResult> {
        ApiClient::get_shortest_path(self, start, end).await
    }

    async fn get_alternatives(&self, name: &str, top_n: Option<u32>) -> Result<Vec<Alternative>> {
        ApiClient::get_alternatives(self, name, top_n).await
    }

    async fn filter_drugs(&self, criteria: &FilterCriteria) -> Result<Vec<DrugRecord>> {
        ApiClient::filter_drugs(self, criteria).await
    }
}
