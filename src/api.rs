use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::normalize::SourceSchema;
use crate::types::RawRecord;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(StatusCode),

    #[error("unreadable body: {0}")]
    Body(String),
}

#[derive(Debug, Clone)]
pub struct SourceSpec {
    pub name: String,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub schema: SourceSchema,
}

#[allow(async_fn_in_trait)]
pub trait RecordSource {
    fn name(&self) -> &str;

    fn schema(&self) -> SourceSchema;

    async fn fetch(&self) -> Result<Vec<RawRecord>, FetchError>;
}

pub fn build_client(user_agent: &str, timeout: Duration) -> reqwest::Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    Client::builder()
        .user_agent(user_agent)
        .default_headers(headers)
        .timeout(timeout)
        .build()
}

pub struct HttpSource {
    client: Client,
    spec: SourceSpec,
}

impl HttpSource {
    pub fn new(client: Client, spec: SourceSpec) -> Self {
        Self { client, spec }
    }

    pub fn from_specs(client: &Client, specs: &[SourceSpec]) -> Vec<Self> {
        specs
            .iter()
            .map(|spec| Self::new(client.clone(), spec.clone()))
            .collect()
    }
}

impl RecordSource for HttpSource {
    fn name(&self) -> &str {
        &self.spec.name
    }

    fn schema(&self) -> SourceSchema {
        self.spec.schema
    }

    async fn fetch(&self) -> Result<Vec<RawRecord>, FetchError> {
        let mut request = self.client.get(&self.spec.url);
        if !self.spec.query.is_empty() {
            request = request.query(&self.spec.query);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        parse_collection(&body)
    }
}

pub fn parse_collection(body: &str) -> Result<Vec<RawRecord>, FetchError> {
    let value: Value = serde_json::from_str(body).map_err(|e| FetchError::Body(e.to_string()))?;

    match value {
        Value::Array(records) => Ok(records),
        Value::Object(_) => Err(FetchError::Body("expected a JSON array, got an object".into())),
        other => Err(FetchError::Body(format!("expected a JSON array, got {other}"))),
    }
}

#[derive(Debug)]
pub struct Fetched {
    pub source: String,
    pub schema: SourceSchema,
    pub records: Vec<RawRecord>,
}

/// Tries each source once, in order, and returns the first collection that
/// arrives intact. `None` means every source failed.
pub async fn fetch_first_available<S: RecordSource>(sources: &[S]) -> Option<Fetched> {
    let total = sources.len();

    for (index, source) in sources.iter().enumerate() {
        info!("📡 [{}/{}] Fetching from {}", index + 1, total, source.name());

        match source.fetch().await {
            Ok(records) => {
                info!("✓ {} returned {} records", source.name(), records.len());
                return Some(Fetched {
                    source: source.name().to_string(),
                    schema: source.schema(),
                    records,
                });
            }
            Err(e) => {
                warn!("✗ {} failed: {}", source.name(), e);
            }
        }
    }

    None
}
