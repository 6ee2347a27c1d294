//! The four operations exposed to the front-end.
//!
//! Each operation builds one request, draws one credential from the pool and
//! makes exactly one upstream call. There is no retry here: a failed call
//! fails the operation, and the caller decides whether to try again.

use std::sync::Arc;
use tracing::{error, info};

use crate::credentials::CredentialPool;
use crate::error::GenerationError;
use crate::gemini::ContentGenerator;
use crate::normalize::{self, VariationShape};
use crate::prompts::{
    AnalysisLevel, Attachment, IdeaMode, PromptFormat, PromptOptions, PromptVariation,
    VideoAnalysis, VariationMode,
};
use crate::request::{self, GenerationRequest};

pub struct PromptService<G> {
    pool: Arc<CredentialPool>,
    generator: G,
}

impl<G: ContentGenerator> PromptService<G> {
    pub fn new(pool: Arc<CredentialPool>, generator: G) -> PromptService<G> {
        PromptService { pool, generator }
    }

    pub fn pool(&self) -> &CredentialPool {
        &self.pool
    }

    /// Dispatches a built request and returns the raw answer text.
    pub async fn invoke(&self, req: &GenerationRequest) -> Result<String, GenerationError> {
        let api_key = self.pool.acquire_next()?;
        info!("Sending {} request to upstream", req.task.as_str());

        self.generator
            .generate_content(&api_key, &req.body)
            .await
            .map_err(|e| {
                error!("Upstream {} request failed: {}", req.task.as_str(), e);
                GenerationError::from(e)
            })
    }

    pub async fn generate_idea(
        &self,
        keywords: &str,
        mode: IdeaMode,
    ) -> Result<String, GenerationError> {
        let req = request::idea_request(keywords, mode);
        let raw = self.invoke(&req).await?;
        let idea = normalize::free_text(&raw, "idea").inspect_err(log_failure)?;
        info!("Received creative idea ({:?} mode)", mode);
        Ok(idea)
    }

    pub async fn generate_prompt(&self, opts: &PromptOptions) -> Result<String, GenerationError> {
        let req = request::prompt_request(opts);
        let raw = self.invoke(&req).await?;
        let out = match opts.format {
            PromptFormat::Description => normalize::free_text(&raw, "description"),
            PromptFormat::Json => normalize::pretty_object(&raw, "prompt"),
        }
        .inspect_err(log_failure)?;
        info!("Received {:?} prompt", opts.format);
        Ok(out)
    }

    pub async fn generate_variations(
        &self,
        source: &str,
        mode: &VariationMode,
        format: PromptFormat,
    ) -> Result<Vec<PromptVariation>, GenerationError> {
        let shape = match (mode, format) {
            (VariationMode::Rich { .. }, _) => VariationShape::Rich,
            (VariationMode::Aspects { .. }, PromptFormat::Json) => VariationShape::Json,
            (VariationMode::Aspects { .. }, PromptFormat::Description) => {
                VariationShape::Description
            }
        };
        let req = request::variation_request(source, mode, format);
        let raw = self.invoke(&req).await?;
        let out = normalize::variations(&raw, shape).inspect_err(log_failure)?;
        info!("Received {} prompt variations", out.len());
        Ok(out)
    }

    pub async fn analyze_video(
        &self,
        video: &Attachment,
        level: AnalysisLevel,
        format: PromptFormat,
    ) -> Result<VideoAnalysis, GenerationError> {
        let req = request::analysis_request(video, level, format);
        let raw = self.invoke(&req).await?;
        let out = match format {
            PromptFormat::Description => {
                normalize::free_text(&raw, "analysis description").map(VideoAnalysis::Text)
            }
            PromptFormat::Json => normalize::analysis_object(&raw).map(VideoAnalysis::Analysis),
        }
        .inspect_err(log_failure)?;
        info!("Received video analysis ({:?}, {:?})", level, format);
        Ok(out)
    }
}

fn log_failure(e: &GenerationError) {
    error!("Unusable upstream response: {}", e);
}
