//! Builds the outbound `generateContent` payload for each task.
//!
//! System instructions are derived only from the task and its parameters;
//! callers never supply one. At most one binary attachment is inlined, and
//! structured tasks carry a response schema plus the JSON MIME type.

use crate::gemini::types::{
    Content, GenerateContentRequest, GenerationConfig, InputBlob, InputPart, Schema,
    ThinkingConfig,
};
use crate::prompts::{
    AnalysisLevel, Attachment, IdeaMode, PromptFormat, PromptOptions, VariationMode, instructions,
    schema,
};

pub const JSON_MIME: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Idea,
    Prompt,
    Variation,
    Analysis,
}

impl Task {
    pub fn as_str(self) -> &'static str {
        match self {
            Task::Idea => "idea",
            Task::Prompt => "prompt",
            Task::Variation => "variation",
            Task::Analysis => "analysis",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub task: Task,
    pub body: GenerateContentRequest,
}

impl GenerationRequest {
    pub fn system_instruction(&self) -> &str {
        self.body
            .system_instruction
            .as_ref()
            .and_then(|c| c.parts.first())
            .and_then(|p| match p {
                InputPart::Text(t) => Some(t.as_str()),
                InputPart::InlineData(_) => None,
            })
            .unwrap_or("")
    }

    pub fn config(&self) -> Option<&GenerationConfig> {
        self.body.generation_config.as_ref()
    }

    pub fn response_schema(&self) -> Option<&Schema> {
        self.config().and_then(|c| c.response_schema.as_ref())
    }

    pub fn attachment(&self) -> Option<&InputBlob> {
        self.body
            .contents
            .iter()
            .flat_map(|c| c.parts.iter())
            .find_map(|p| match p {
                InputPart::InlineData(blob) => Some(blob),
                InputPart::Text(_) => None,
            })
    }

    pub fn user_text(&self) -> &str {
        self.body
            .contents
            .iter()
            .flat_map(|c| c.parts.iter())
            .find_map(|p| match p {
                InputPart::Text(t) => Some(t.as_str()),
                InputPart::InlineData(_) => None,
            })
            .unwrap_or("")
    }
}

// Text alone, or the (text, binary) pair when an attachment is present.
fn user_content(text: String, attachment: Option<&Attachment>) -> Content {
    let mut parts = vec![InputPart::Text(text)];
    if let Some(a) = attachment {
        parts.push(InputPart::InlineData(a.clone().into()));
    }
    Content { parts }
}

fn assemble(
    task: Task,
    system: String,
    user: Content,
    config: GenerationConfig,
) -> GenerationRequest {
    GenerationRequest {
        task,
        body: GenerateContentRequest {
            contents: vec![user],
            system_instruction: Some(Content::text(system)),
            generation_config: Some(config),
        },
    }
}

fn structured(schema: Schema) -> GenerationConfig {
    GenerationConfig {
        response_mime_type: Some(JSON_MIME.to_string()),
        response_schema: Some(schema),
        ..Default::default()
    }
}

fn with_limits(mut cfg: GenerationConfig, max_output_tokens: u32, thinking_budget: u32) -> GenerationConfig {
    cfg.max_output_tokens = Some(max_output_tokens);
    cfg.thinking_config = Some(ThinkingConfig { thinking_budget });
    cfg
}

pub fn idea_request(keywords: &str, mode: IdeaMode) -> GenerationRequest {
    let config = GenerationConfig {
        temperature: Some(0.9),
        top_p: Some(1.0),
        ..Default::default()
    };
    assemble(
        Task::Idea,
        instructions::idea(mode),
        Content::text(instructions::idea_user(keywords)),
        config,
    )
}

pub fn prompt_request(opts: &PromptOptions) -> GenerationRequest {
    let config = match opts.format {
        PromptFormat::Description => GenerationConfig {
            temperature: Some(0.8),
            ..with_limits(GenerationConfig::default(), 400, 100)
        },
        PromptFormat::Json => GenerationConfig {
            temperature: Some(0.7),
            ..with_limits(structured(schema::video_prompt()), 600, 200)
        },
    };
    assemble(
        Task::Prompt,
        instructions::prompt(opts.format),
        user_content(instructions::prompt_user(opts), opts.image.as_ref()),
        config,
    )
}

pub fn variation_request(source: &str, mode: &VariationMode, format: PromptFormat) -> GenerationRequest {
    let (system, user, schema) = match mode {
        VariationMode::Aspects { aspects } => {
            let schema = match format {
                PromptFormat::Description => schema::description_variations(),
                PromptFormat::Json => schema::video_prompt_variations(),
            };
            (
                instructions::aspect_variation(format, aspects),
                instructions::aspect_variation_user(format, source, aspects),
                schema,
            )
        }
        VariationMode::Rich {
            instruction,
            video_style,
            visual_style,
        } => (
            instructions::rich_variation(video_style, visual_style),
            instructions::rich_variation_user(source, instruction),
            schema::bilingual_variations(),
        ),
    };
    assemble(Task::Variation, system, Content::text(user), structured(schema))
}

pub fn analysis_request(video: &Attachment, level: AnalysisLevel, format: PromptFormat) -> GenerationRequest {
    let config = match format {
        PromptFormat::Description => with_limits(GenerationConfig::default(), 400, 100),
        PromptFormat::Json => with_limits(structured(schema::video_analysis()), 600, 200),
    };
    assemble(
        Task::Analysis,
        instructions::analysis(level, format),
        user_content(instructions::ANALYSIS_USER.to_string(), Some(video)),
        config,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::VariationAspect;
    use crate::prompts::schema::ANALYSIS_FIELDS;

    fn options(format: PromptFormat, image: Option<Attachment>) -> PromptOptions {
        PromptOptions {
            idea: "a cat exploring a neon city".into(),
            video_style: "cinematic".into(),
            camera_angle: "drone-shot".into(),
            visual_style: "3d-render".into(),
            image,
            negative_prompts: vec!["blurry".into()],
            duration: 10,
            format,
        }
    }

    #[test]
    fn idea_request_is_plain_and_creative() {
        let req = idea_request("cat, city", IdeaMode::Prompt);
        assert_eq!(req.task, Task::Idea);
        assert!(req.system_instruction().contains("3 to 10 words"));
        assert_eq!(req.user_text(), "Keywords: \"cat, city\"");
        let cfg = req.config().unwrap();
        assert_eq!(cfg.temperature, Some(0.9));
        assert_eq!(cfg.top_p, Some(1.0));
        assert!(cfg.response_mime_type.is_none());
        assert!(req.response_schema().is_none());
        assert!(req.attachment().is_none());
    }

    #[test]
    fn json_prompt_carries_schema_and_image_pair() {
        let image = Attachment::from_bytes("image/png", b"fake");
        let req = prompt_request(&options(PromptFormat::Json, Some(image.clone())));

        assert_eq!(req.body.contents[0].parts.len(), 2);
        assert_eq!(req.attachment().unwrap().mime_type, "image/png");
        assert_eq!(req.attachment().unwrap().data, image.data);
        let cfg = req.config().unwrap();
        assert_eq!(cfg.response_mime_type.as_deref(), Some(JSON_MIME));
        assert_eq!(req.response_schema(), Some(&schema::video_prompt()));
        assert_eq!(cfg.max_output_tokens, Some(600));
        assert!(req.system_instruction().contains("990"));
    }

    #[test]
    fn description_prompt_has_no_schema() {
        let req = prompt_request(&options(PromptFormat::Description, None));
        assert_eq!(req.body.contents[0].parts.len(), 1);
        let cfg = req.config().unwrap();
        assert!(cfg.response_mime_type.is_none());
        assert!(cfg.response_schema.is_none());
        assert_eq!(cfg.temperature, Some(0.8));
        assert_eq!(cfg.max_output_tokens, Some(400));
    }

    #[test]
    fn aspect_variations_schema_follows_format() {
        let mode = VariationMode::Aspects {
            aspects: vec![VariationAspect::Colors],
        };
        let json = variation_request("{}", &mode, PromptFormat::Json);
        assert_eq!(json.response_schema(), Some(&schema::video_prompt_variations()));
        assert!(json.user_text().contains("```json"));

        let desc = variation_request("a river", &mode, PromptFormat::Description);
        assert_eq!(desc.response_schema(), Some(&schema::description_variations()));
        assert!(desc.attachment().is_none());
    }

    #[test]
    fn rich_variations_are_bilingual_regardless_of_format() {
        let mode = VariationMode::Rich {
            instruction: "at night".into(),
            video_style: "anime".into(),
            visual_style: "watercolor".into(),
        };
        for format in [PromptFormat::Json, PromptFormat::Description] {
            let req = variation_request("a river", &mode, format);
            assert_eq!(req.response_schema(), Some(&schema::bilingual_variations()));
            assert!(req.system_instruction().contains("Indonesian"));
            assert!(req.user_text().contains("\"at night\""));
        }
    }

    #[test]
    fn detail_json_analysis_requires_six_fields_and_video() {
        let video = Attachment::from_bytes("video/mp4", b"....ftypisom");
        let req = analysis_request(&video, AnalysisLevel::Detail, PromptFormat::Json);

        assert!(req.system_instruction().contains("exhaustive"));
        assert_ne!(
            req.system_instruction(),
            analysis_request(&video, AnalysisLevel::Normal, PromptFormat::Json).system_instruction()
        );
        assert_ne!(
            req.system_instruction(),
            analysis_request(&video, AnalysisLevel::Akurat, PromptFormat::Json).system_instruction()
        );

        let required = req.response_schema().unwrap().required.clone().unwrap();
        assert_eq!(required.len(), ANALYSIS_FIELDS.len());
        assert_eq!(req.attachment().unwrap().mime_type, "video/mp4");
    }

    #[test]
    fn payload_serializes_system_instruction_as_content() {
        let req = idea_request("sea", IdeaMode::Motion);
        let v = serde_json::to_value(&req.body).unwrap();
        assert!(
            v["systemInstruction"]["parts"][0]["text"]
                .as_str()
                .unwrap()
                .contains("5 to 15 words")
        );
        assert_eq!(v["contents"][0]["parts"][0]["text"], "Keywords: \"sea\"");
        assert!(v["generationConfig"].get("responseSchema").is_none());
    }
}
