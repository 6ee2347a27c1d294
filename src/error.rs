use crate::gemini::GeminiError;
use serde::Serialize;
use thiserror::Error;

pub const DISABLED_MESSAGE: &str =
    "API is disabled or no keys are active. Please enable 'API Default' in Settings.";
pub const UNKNOWN_MESSAGE: &str = "An unknown error occurred. Please try again.";

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ServiceDisabled,
    UpstreamError,
    EmptyResponse,
    MalformedResponse,
    Unknown,
}

/// Every failure an operation can report. None of them is fatal: the caller
/// renders the message and may simply retry.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("{}", DISABLED_MESSAGE)]
    ServiceDisabled,
    #[error("Upstream request failed: {0}")]
    UpstreamError(String),
    #[error("The API returned an empty {0}.")]
    EmptyResponse(&'static str),
    #[error("The API returned invalid {what}: {detail}")]
    MalformedResponse { what: &'static str, detail: String },
    #[error("{}", UNKNOWN_MESSAGE)]
    Unknown,
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerationError::ServiceDisabled => ErrorKind::ServiceDisabled,
            GenerationError::UpstreamError(_) => ErrorKind::UpstreamError,
            GenerationError::EmptyResponse(_) => ErrorKind::EmptyResponse,
            GenerationError::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            GenerationError::Unknown => ErrorKind::Unknown,
        }
    }

    pub fn malformed(what: &'static str, detail: impl Into<String>) -> Self {
        GenerationError::MalformedResponse {
            what,
            detail: detail.into(),
        }
    }
}

impl From<GeminiError> for GenerationError {
    fn from(e: GeminiError) -> Self {
        match e {
            GeminiError::Http(inner) => GenerationError::UpstreamError(inner.to_string()),
            GeminiError::Status { message, .. } => GenerationError::UpstreamError(message),
            // A 2xx body that isn't a generateContent envelope.
            GeminiError::Decode(inner) => GenerationError::UpstreamError(inner.to_string()),
            GeminiError::Endpoint(_) => GenerationError::Unknown,
        }
    }
}
