use std::time::Duration;

use futures_util::StreamExt;
use revive_logging::revive_trace;
use serde::{Deserialize, Serialize};

use crate::encode::strip_data_url_prefix;
use crate::{ErrorKind, RestoreError};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Clone)]
pub struct RestoreSettings {
    pub endpoint: String,
    pub model: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_response_bytes: u64,
}

impl Default for RestoreSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.5-flash-image".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(180),
            max_response_bytes: 64 * 1024 * 1024,
        }
    }
}

/// One call into the restoration capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreRequest {
    /// Base64 image bytes. A data-URL prefix is stripped before sending.
    pub payload: String,
    pub mime_type: String,
    pub instruction: String,
}

/// Image part returned by the capability, still base64 encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoredPayload {
    pub data: String,
    pub mime_type: String,
}

#[async_trait::async_trait]
pub trait Restorer: Send + Sync {
    async fn restore(
        &self,
        request: &RestoreRequest,
        api_key: &str,
    ) -> Result<RestoredPayload, RestoreError>;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: RequestContent<'a>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineDataRef<'a>,
    },
    Text {
        text: &'a str,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataRef<'a> {
    data: &'a str,
    mime_type: &'a str,
}

#[derive(Deserialize, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    inline_data: Option<InlineData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Restorer backed by the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiRestorer {
    settings: RestoreSettings,
}

impl GeminiRestorer {
    pub fn new(settings: RestoreSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, RestoreError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| RestoreError::new(ErrorKind::Network, err.to_string()))
    }

    fn request_url(&self) -> Result<reqwest::Url, RestoreError> {
        let raw = format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.model
        );
        reqwest::Url::parse(&raw)
            .map_err(|err| RestoreError::new(ErrorKind::InvalidEndpoint, err.to_string()))
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, RestoreError> {
        let max_bytes = self.settings.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(RestoreError::new(
                    ErrorKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(RestoreError::new(
                    ErrorKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl Restorer for GeminiRestorer {
    async fn restore(
        &self,
        request: &RestoreRequest,
        api_key: &str,
    ) -> Result<RestoredPayload, RestoreError> {
        let url = self.request_url()?;
        let client = self.build_client()?;
        let body = GenerateRequest {
            contents: RequestContent {
                parts: vec![
                    RequestPart::Inline {
                        inline_data: InlineDataRef {
                            data: strip_data_url_prefix(&request.payload),
                            mime_type: &request.mime_type,
                        },
                    },
                    RequestPart::Text {
                        text: &request.instruction,
                    },
                ],
            },
        };
        let body = serde_json::to_vec(&body)
            .map_err(|err| RestoreError::new(ErrorKind::Encode, err.to_string()))?;

        let response = client
            .post(url)
            .header(API_KEY_HEADER, api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let bytes = self.read_body(response).await?;
        revive_trace!("generateContent status={} body_bytes={}", status, bytes.len());
        if !status.is_success() {
            return Err(classify_error_response(status.as_u16(), &bytes));
        }

        let parsed: GenerateResponse = serde_json::from_slice(&bytes)
            .map_err(|err| RestoreError::new(ErrorKind::InvalidResponse, err.to_string()))?;
        first_image_part(parsed).ok_or_else(|| {
            RestoreError::new(
                ErrorKind::NoImage,
                "No image was returned from the restoration process.",
            )
        })
    }
}

/// Only the first candidate is considered; the first part with inline data wins.
fn first_image_part(response: GenerateResponse) -> Option<RestoredPayload> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| {
            content
                .parts
                .into_iter()
                .find_map(|part| part.inline_data)
        })
        .map(|inline| RestoredPayload {
            data: inline.data,
            mime_type: inline.mime_type,
        })
}

fn classify_error_response(status: u16, body: &[u8]) -> RestoreError {
    let raw = String::from_utf8_lossy(body);
    let envelope = serde_json::from_slice::<ErrorEnvelope>(body).ok();
    let message = match &envelope {
        Some(envelope) if !envelope.error.message.is_empty() => envelope.error.message.clone(),
        _ => format!("HTTP {status}"),
    };
    let key_invalid = raw.contains("API_KEY_INVALID")
        || envelope
            .as_ref()
            .and_then(|envelope| envelope.error.status.as_deref())
            .is_some_and(|s| s == "UNAUTHENTICATED");
    if status == 401 || status == 403 || key_invalid {
        return RestoreError::new(ErrorKind::CredentialRejected, message);
    }
    RestoreError::new(ErrorKind::HttpStatus(status), message)
}

fn map_reqwest_error(err: reqwest::Error) -> RestoreError {
    if err.is_timeout() {
        return RestoreError::new(ErrorKind::Timeout, err.to_string());
    }
    RestoreError::new(ErrorKind::Network, err.to_string())
}
