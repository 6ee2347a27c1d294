// HTTP boundary the front-end talks to.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, warn};

use crate::credentials::{CredentialSettings, CredentialStore};
use crate::error::{ErrorKind, GenerationError};
use crate::gate::RequestGate;
use crate::gemini::ContentGenerator;
use crate::prompts::{
    AnalysisLevel, Attachment, IdeaMode, PromptFormat, PromptOptions, VariationMode,
};
use crate::service::PromptService;

/// Shared state behind every route.
pub struct AppState<G> {
    pub store: CredentialStore,
    pub service: PromptService<G>,
    // One gate per triggering control: prompt and analysis share the output panel.
    idea_gate: RequestGate,
    output_gate: RequestGate,
    variation_gate: RequestGate,
}

impl<G: ContentGenerator> AppState<G> {
    pub fn new(store: CredentialStore, generator: G) -> AppState<G> {
        let service = PromptService::new(store.pool(), generator);
        AppState {
            store,
            service,
            idea_gate: RequestGate::new(),
            output_gate: RequestGate::new(),
            variation_gate: RequestGate::new(),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Generation(GenerationError),
    BadRequest(&'static str),
    Rejected(JsonRejection),
    Superseded,
}

impl From<GenerationError> for ApiError {
    fn from(e: GenerationError) -> Self {
        ApiError::Generation(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::Rejected(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            ApiError::Generation(e) => {
                let status = match e.kind() {
                    ErrorKind::ServiceDisabled => StatusCode::SERVICE_UNAVAILABLE,
                    ErrorKind::UpstreamError
                    | ErrorKind::EmptyResponse
                    | ErrorKind::MalformedResponse => StatusCode::BAD_GATEWAY,
                    ErrorKind::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, json!(e.kind()), e.to_string())
            }
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, json!("InvalidRequest"), msg.to_string())
            }
            ApiError::Rejected(rejection) => {
                warn!("Rejected request body: {}", rejection.body_text());
                (
                    StatusCode::BAD_REQUEST,
                    json!("InvalidRequest"),
                    rejection.body_text(),
                )
            }
            ApiError::Superseded => (
                StatusCode::CONFLICT,
                json!("Superseded"),
                "A newer request replaced this one.".to_string(),
            ),
        };
        (status, Json(json!({ "kind": kind, "message": message }))).into_response()
    }
}

#[derive(Deserialize, Debug)]
pub struct IdeaBody {
    pub keywords: String,
    pub mode: IdeaMode,
}

#[derive(Deserialize, Debug)]
pub struct PromptBody {
    #[serde(default = "default_mode")]
    pub mode: IdeaMode,
    #[serde(flatten)]
    pub options: PromptOptions,
}

fn default_mode() -> IdeaMode {
    IdeaMode::Prompt
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct VariationBody {
    pub source: String,
    #[serde(default)]
    pub format: PromptFormat,
    #[serde(flatten)]
    pub variation: VariationMode,
}

#[derive(Deserialize, Debug)]
pub struct AnalyzeBody {
    pub video: Attachment,
    #[serde(default)]
    pub level: AnalysisLevel,
    #[serde(default)]
    pub format: PromptFormat,
}

#[derive(Serialize)]
struct IdeaReply {
    idea: String,
}

#[derive(Serialize)]
struct PromptReply {
    prompt: String,
}

// Accepts bare base64 or a data URI, and fills in a missing MIME type.
fn clean_attachment(raw: Attachment, fallback_mime: &str) -> Option<Attachment> {
    let parsed = Attachment::from_data_url(raw.data.trim())?;
    let mime_type = if raw.mime_type.trim().is_empty() {
        parsed.mime_type
    } else {
        raw.mime_type
    };
    Some(
        Attachment {
            mime_type,
            data: parsed.data,
        }
        .with_detected_mime(fallback_mime),
    )
}

pub async fn health_handler() -> axum::Json<serde_json::Value> {
    axum::Json(json!({ "status": "ok" }))
}

async fn get_settings<G: ContentGenerator>(
    State(state): State<Arc<AppState<G>>>,
) -> Json<CredentialSettings> {
    Json(state.store.settings().masked())
}

async fn put_settings<G: ContentGenerator>(
    State(state): State<Arc<AppState<G>>>,
    body: Result<Json<CredentialSettings>, JsonRejection>,
) -> Result<Json<CredentialSettings>, ApiError> {
    let Json(incoming) = body?;
    let saved = state.store.save(incoming);
    info!("Active API keys: {}", state.service.pool().active_len());
    Ok(Json(saved.masked()))
}

async fn idea<G: ContentGenerator>(
    State(state): State<Arc<AppState<G>>>,
    body: Result<Json<IdeaBody>, JsonRejection>,
) -> Result<Json<IdeaReply>, ApiError> {
    let Json(body) = body?;
    if body.keywords.trim().is_empty() {
        return Err(ApiError::BadRequest("Please enter some keywords first."));
    }
    let ticket = state.idea_gate.issue();
    let idea = state
        .idea_gate
        .run(ticket, state.service.generate_idea(&body.keywords, body.mode))
        .await
        .ok_or(ApiError::Superseded)??;
    Ok(Json(IdeaReply { idea }))
}

async fn prompt<G: ContentGenerator>(
    State(state): State<Arc<AppState<G>>>,
    body: Result<Json<PromptBody>, JsonRejection>,
) -> Result<Json<PromptReply>, ApiError> {
    let Json(body) = body?;
    let mut options = body.options;
    if options.idea.trim().is_empty() {
        return Err(ApiError::BadRequest("Please enter a core idea for your video."));
    }
    if body.mode == IdeaMode::Motion {
        options = options.for_motion();
    }
    options.image = match options.image.take() {
        Some(raw) => Some(
            clean_attachment(raw, "image/jpeg")
                .ok_or(ApiError::BadRequest("Could not process the image file."))?,
        ),
        None => None,
    };

    let ticket = state.output_gate.issue();
    let prompt = state
        .output_gate
        .run(ticket, state.service.generate_prompt(&options))
        .await
        .ok_or(ApiError::Superseded)??;
    Ok(Json(PromptReply { prompt }))
}

async fn variations<G: ContentGenerator>(
    State(state): State<Arc<AppState<G>>>,
    body: Result<Json<VariationBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body?;
    if body.source.trim().is_empty() {
        return Err(ApiError::BadRequest("Generate a prompt before asking for variations."));
    }
    if let VariationMode::Aspects { aspects } = &body.variation
        && aspects.is_empty()
    {
        return Err(ApiError::BadRequest("Select at least one aspect to vary."));
    }

    let ticket = state.variation_gate.issue();
    let out = state
        .variation_gate
        .run(
            ticket,
            state
                .service
                .generate_variations(&body.source, &body.variation, body.format),
        )
        .await
        .ok_or(ApiError::Superseded)??;
    Ok(Json(json!({ "variations": out })))
}

async fn analyze<G: ContentGenerator>(
    State(state): State<Arc<AppState<G>>>,
    body: Result<Json<AnalyzeBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body?;
    let video = clean_attachment(body.video, "video/mp4")
        .ok_or(ApiError::BadRequest("Please upload a video file to analyze."))?;
    if !video.is_video() {
        warn!("Analyzing attachment with non-video MIME type {}", video.mime_type);
    }

    let ticket = state.output_gate.issue();
    let out = state
        .output_gate
        .run(
            ticket,
            state.service.analyze_video(&video, body.level, body.format),
        )
        .await
        .ok_or(ApiError::Superseded)??;
    Ok(Json(json!(out)))
}

/// Build the main router around a shared state.
pub fn build_router<G: ContentGenerator + 'static>(state: Arc<AppState<G>>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/settings",
            get(get_settings::<G>).put(put_settings::<G>),
        )
        .route("/api/idea", post(idea::<G>))
        .route("/api/prompt", post(prompt::<G>))
        .route("/api/variations", post(variations::<G>))
        .route("/api/analyze", post(analyze::<G>))
        .with_state(state)
}
