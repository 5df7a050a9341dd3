use std::time::Duration;

use autoreq_logging::{autoreq_debug, autoreq_warn};
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::{AnalysisError, FailureKind};

/// Address the analysis service listens on during local development.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/clone-repo/";
/// Request body key carrying the repository URL.
pub const URL_FIELD: &str = "github_url";
/// Response body key carrying the generated manifest.
pub const MANIFEST_FIELD: &str = "requirements.txt";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    /// Deadline for the whole exchange; the service clones and analyzes the
    /// repository before it answers, so this is generous.
    pub request_timeout: Duration,
    pub max_response_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
            max_response_bytes: 2 * 1024 * 1024,
        }
    }
}

#[derive(Serialize)]
struct AnalysisRequest<'a> {
    github_url: &'a str,
}

#[derive(Deserialize)]
struct AnalysisResponse {
    #[serde(rename = "requirements.txt")]
    manifest: Option<String>,
}

/// Shape of the service's error replies, e.g. `{"error": "Cloning failed: ..."}`.
#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

#[async_trait::async_trait]
pub trait AnalysisClient: Send + Sync {
    /// Sends one analysis request and returns the manifest text.
    async fn analyze(&self, github_url: &str) -> Result<String, AnalysisError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestAnalysisClient {
    settings: ClientSettings,
}

impl ReqwestAnalysisClient {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn build_client(&self) -> Result<reqwest::Client, AnalysisError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| AnalysisError::new(FailureKind::Network, err.to_string()))
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, AnalysisError> {
        let max_bytes = self.settings.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl AnalysisClient for ReqwestAnalysisClient {
    async fn analyze(&self, github_url: &str) -> Result<String, AnalysisError> {
        let endpoint = reqwest::Url::parse(&self.settings.endpoint)
            .map_err(|err| AnalysisError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let body = serde_json::to_vec(&AnalysisRequest { github_url })
            .map_err(|err| AnalysisError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = self.build_client()?;

        autoreq_debug!("POST {} ({} byte body)", endpoint, body.len());
        let response = client
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            // The service explains 4xx replies in an `error` field; surface it when present.
            // Otherwise the status code alone says it all.
            let detail = match self.read_body(response).await {
                Ok(bytes) => serde_json::from_slice::<ErrorResponse>(&bytes)
                    .map(|reply| reply.error)
                    .unwrap_or_default(),
                Err(_) => String::new(),
            };
            autoreq_warn!("Analysis service returned {}: {}", status, detail);
            return Err(AnalysisError::new(
                FailureKind::HttpStatus(status.as_u16()),
                detail,
            ));
        }

        let bytes = self.read_body(response).await?;
        let reply: AnalysisResponse = serde_json::from_slice(&bytes)
            .map_err(|err| AnalysisError::new(FailureKind::MalformedResponse, err.to_string()))?;
        reply.manifest.ok_or_else(|| {
            AnalysisError::new(
                FailureKind::MalformedResponse,
                format!("response has no \"{MANIFEST_FIELD}\" field"),
            )
        })
    }
}

fn too_large(max_bytes: u64, actual: u64) -> AnalysisError {
    AnalysisError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> AnalysisError {
    if err.is_timeout() {
        return AnalysisError::new(FailureKind::Timeout, err.to_string());
    }
    AnalysisError::new(FailureKind::Network, err.to_string())
}
