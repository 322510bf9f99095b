use std::path::Path;

use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use serde_json::Value;
use shared::{
    domain::QuizQuestion,
    error::BackendErrorBody,
    protocol::{PromptRequest, PromptResponse, UploadResponse, UploadSummary},
};
use tracing::{info, warn};

pub mod config;
pub mod endpoint;
pub mod error;
pub mod payload;
pub mod quiz;

pub use endpoint::{BackendEndpoint, Endpoint};
pub use error::ClientError;
pub use quiz::{Direction, QuizAction, QuizPhase, QuizSession};

const UPLOAD_FIELD_NAME: &str = "file";
const UPLOAD_STATUS_FALLBACK: &str = "Server error";
const UPLOAD_REJECTED_FALLBACK: &str = "Unknown error";
const PROMPT_STATUS_FALLBACK: &str = "Unknown error occurred";
const QUIZ_STATUS_FALLBACK: &str = "Server error";
const DEFAULT_UPLOAD_FILE_NAME: &str = "document.pdf";

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// The three backend operations the UI drives.
#[async_trait]
pub trait StudyBackend: Send + Sync {
    async fn upload_document(&self, path: &Path) -> ClientResult<UploadSummary>;
    async fn ask(&self, prompt: &str) -> ClientResult<String>;
    async fn generate_quiz(&self) -> ClientResult<Vec<QuizQuestion>>;
}

pub struct StudyClient {
    http: Client,
    backend: BackendEndpoint,
}

impl StudyClient {
    pub fn new(backend: BackendEndpoint) -> Self {
        Self::with_http_client(Client::new(), backend)
    }

    pub fn with_http_client(http: Client, backend: BackendEndpoint) -> Self {
        Self { http, backend }
    }

    pub fn backend(&self) -> &BackendEndpoint {
        &self.backend
    }

    /// Posts `bytes` as the multipart `file` field.
    pub async fn upload_bytes(&self, file_name: &str, bytes: Vec<u8>) -> ClientResult<UploadSummary> {
        let endpoint = Endpoint::Upload;
        let mime = mime_guess::from_path(file_name).first_or_octet_stream();
        let size_bytes = bytes.len();
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime.essence_str())
            .map_err(|source| ClientError::Transport { endpoint, source })?;
        let form = multipart::Form::new().part(UPLOAD_FIELD_NAME, part);

        info!(%endpoint, file_name, size_bytes, "uploading document");
        let response = self
            .http
            .post(self.backend.url_for(endpoint))
            .multipart(form)
            .send()
            .await
            .map_err(|source| ClientError::Transport { endpoint, source })?;

        let response = check_status(
            endpoint,
            response,
            BackendErrorBody::structured_detail_message,
            UPLOAD_STATUS_FALLBACK,
        ).await?;
        let body: UploadResponse = decode_json(endpoint, response).await?;
        if !body.is_success() {
            let message = body
                .message
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| UPLOAD_REJECTED_FALLBACK.to_string());
            warn!(%endpoint, status = %body.status, "upload not accepted: {message}");
            return Err(ClientError::Rejected { endpoint, message });
        }

        Ok(UploadSummary {
            file_name: file_name.to_string(),
            message: body.message.unwrap_or_default(),
            splits: body.splits.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl StudyBackend for StudyClient {
    async fn upload_document(&self, path: &Path) -> ClientResult<UploadSummary> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ClientError::File {
                path: path.to_path_buf(),
                source,
            })?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(DEFAULT_UPLOAD_FILE_NAME);
        self.upload_bytes(file_name, bytes).await
    }

    async fn ask(&self, prompt: &str) -> ClientResult<String> {
        let endpoint = Endpoint::Prompt;
        info!(%endpoint, prompt_len = prompt.len(), "sending prompt");
        let response = self
            .http
            .post(self.backend.url_for(endpoint))
            .json(&PromptRequest {
                prompt: prompt.to_string(),
            })
            .send()
            .await
            .map_err(|source| ClientError::Transport { endpoint, source })?;

        let response = check_status(
            endpoint,
            response,
            BackendErrorBody::detail_message,
            PROMPT_STATUS_FALLBACK,
        ).await?;
        let body: PromptResponse = decode_json(endpoint, response).await?;
        Ok(body.display_text())
    }

    async fn generate_quiz(&self) -> ClientResult<Vec<QuizQuestion>> {
        let endpoint = Endpoint::Quiz;
        info!(%endpoint, "requesting quiz");
        let response = self
            .http
            .post(self.backend.url_for(endpoint))
            .send()
            .await
            .map_err(|source| ClientError::Transport { endpoint, source })?;

        let response = check_status(
            endpoint,
            response,
            BackendErrorBody::detail_message,
            QUIZ_STATUS_FALLBACK,
        ).await?;
        let body: Value = response
            .json()
            .await
            .map_err(|_| ClientError::InvalidPayload {
                endpoint,
                reason: payload::QuizPayloadError::NotAnArray.to_string(),
            })?;

        payload::parse_quiz_payload(body).map_err(|err| {
            if let payload::QuizPayloadError::MalformedQuestion { index, reason } = &err {
                warn!(%endpoint, index, "discarding quiz: {reason}");
            }
            ClientError::InvalidPayload {
                endpoint,
                reason: err.to_string(),
            }
        })
    }
}

/// Turns a non-2xx response into [`ClientError::Status`] carrying the
/// message `detail_of` finds in the body, or `fallback` when it finds none.
/// Uploads only read `detail.message`; prompt and quiz also accept a string
/// `detail`.
async fn check_status(
    endpoint: Endpoint,
    response: Response,
    detail_of: fn(&BackendErrorBody) -> Option<&str>,
    fallback: &str,
) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .json::<BackendErrorBody>()
        .await
        .unwrap_or_default();
    let message = detail_of(&body).unwrap_or(fallback).to_string();
    warn!(%endpoint, status = status.as_u16(), "backend returned error: {message}");
    Err(ClientError::Status {
        endpoint,
        status: status.as_u16(),
        message,
    })
}

async fn decode_json<T: serde::de::DeserializeOwned>(
    endpoint: Endpoint,
    response: Response,
) -> ClientResult<T> {
    response
        .json()
        .await
        .map_err(|err| ClientError::InvalidPayload {
            endpoint,
            reason: format!("unexpected response body: {err}"),
        })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
