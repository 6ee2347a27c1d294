pub mod types;

use reqwest::Client;
use std::future::Future;
use thiserror::Error;
use tracing::{debug, warn};
use types::*;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";
pub const MODEL_NAME: &str = "gemini-2.5-flash";

#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("invalid endpoint URL: {0}")]
    Endpoint(#[from] url::ParseError),
    #[error("couldn't decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One "generate content" call against the upstream model.
///
/// The returned string is the raw answer text; it is empty when the model
/// produced no text part at all.
pub trait ContentGenerator: Send + Sync {
    fn generate_content(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> impl Future<Output = Result<String, GeminiError>> + Send;
}

#[derive(Clone, Debug)]
pub struct Gemini {
    http: Client,
    base_url: Url,
    model: String,
}

impl Gemini {
    pub fn new(base_url: Url) -> Gemini {
        Gemini {
            http: Client::new(),
            base_url,
            model: MODEL_NAME.to_string(),
        }
    }

    pub fn endpoint(&self) -> Result<Url, url::ParseError> {
        self.base_url
            .join(&format!("models/{}:generateContent", self.model))
    }
}

impl ContentGenerator for Gemini {
    async fn generate_content(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<String, GeminiError> {
        let url = self.endpoint()?;

        let res = self
            .http
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await?;

        let status = res.status();
        let body_text = res.text().await?;

        if !status.is_success() {
            // Prefer the upstream's own message; fall back to the raw body.
            let message = match serde_json::from_str::<ErrorEnvelope>(&body_text) {
                Ok(env) => env.error.message,
                Err(_) => body_text,
            };
            return Err(GeminiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body_text)?;
        match parsed.text() {
            Some(text) => {
                debug!("Received {} characters from upstream", text.len());
                Ok(text)
            }
            None => {
                warn!(
                    "Upstream returned no text (finish reason: {})",
                    parsed.finish_reason().unwrap_or("<none>")
                );
                Ok(String::new())
            }
        }
    }
}
