use std::time::Duration;

use docqa_logging::{docqa_debug, docqa_info, docqa_warn};
use reqwest::multipart::{Form, Part};
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;

use crate::types::{AskRequest, ErrorBody};
use crate::{
    AnswerResponse, BackendError, FailureKind, LocalDocument, ServiceStatus, UploadResponse,
};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Uploads include ingestion and embedding on the server side.
    pub upload_timeout: Duration,
    pub ask_timeout: Duration,
    pub health_timeout: Duration,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            upload_timeout: Duration::from_secs(120),
            ask_timeout: Duration::from_secs(60),
            health_timeout: Duration::from_secs(5),
        }
    }
}

impl BackendSettings {
    /// Resolve `path` against the base url, keeping any path prefix the base carries.
    pub fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        let mut base = self.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        Url::parse(&base)
            .and_then(|base| base.join(path))
            .map_err(|err| BackendError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}

/// The remote retrieval-augmented QA service.
#[async_trait::async_trait]
pub trait RagBackend: Send + Sync {
    async fn upload(&self, document: &LocalDocument) -> Result<UploadResponse, BackendError>;

    async fn ask(&self, question: &str) -> Result<AnswerResponse, BackendError>;

    async fn health(&self) -> Result<ServiceStatus, BackendError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    settings: BackendSettings,
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(settings: BackendSettings) -> Result<Self, BackendError> {
        // Fail early on a base url that can never work.
        settings.endpoint("")?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(|err| BackendError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }
}

#[async_trait::async_trait]
impl RagBackend for ReqwestBackend {
    async fn upload(&self, document: &LocalDocument) -> Result<UploadResponse, BackendError> {
        let url = self.settings.endpoint("upload")?;
        let part = Part::bytes(document.bytes.clone())
            .file_name(document.filename.clone())
            .mime_str(&document.media_type)
            .map_err(|err| BackendError::new(FailureKind::InvalidRequest, err.to_string()))?;
        let form = Form::new().part("file", part);

        docqa_info!(
            "POST {} filename={} bytes={} media_type={}",
            url,
            document.filename,
            document.bytes.len(),
            document.media_type
        );
        let response = self
            .client
            .post(url)
            .timeout(self.settings.upload_timeout)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        read_json(response).await.inspect_err(log_failure("upload"))
    }

    async fn ask(&self, question: &str) -> Result<AnswerResponse, BackendError> {
        let url = self.settings.endpoint("ask")?;
        docqa_info!("POST {} question_len={}", url, question.len());
        let response = self
            .client
            .post(url)
            .timeout(self.settings.ask_timeout)
            .json(&AskRequest { question })
            .send()
            .await
            .map_err(map_reqwest_error)?;

        read_json(response).await.inspect_err(log_failure("ask"))
    }

    async fn health(&self) -> Result<ServiceStatus, BackendError> {
        let url = self.settings.endpoint("")?;
        docqa_debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .timeout(self.settings.health_timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        read_json(response).await.inspect_err(log_failure("health"))
    }
}

/// Decode a success body as `T`, or a failure body as a backend rejection.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_reqwest_error)?;

    if status.is_success() {
        return serde_json::from_slice(&body).map_err(|err| {
            BackendError::new(
                FailureKind::MalformedResponse,
                format!("unexpected response body: {err}"),
            )
        });
    }

    let detail = serde_json::from_slice::<ErrorBody>(&body)
        .ok()
        .and_then(|error| error.detail)
        .filter(|detail| !detail.is_null());
    match detail {
        Some(detail) => Err(BackendError::new(
            FailureKind::Rejected {
                status: status.as_u16(),
            },
            detail_text(detail),
        )),
        None => Err(BackendError::new(
            FailureKind::MalformedResponse,
            format!("http status {status} without error detail"),
        )),
    }
}

fn detail_text(detail: serde_json::Value) -> String {
    match detail {
        serde_json::Value::String(text) => text,
        other => other.to_string(),
    }
}

fn log_failure(operation: &'static str) -> impl Fn(&BackendError) {
    move |err| docqa_warn!("{} failed: {}", operation, err)
}

fn map_reqwest_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        return BackendError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return BackendError::new(FailureKind::MalformedResponse, err.to_string());
    }
    BackendError::new(FailureKind::Network, err.to_string())
}
