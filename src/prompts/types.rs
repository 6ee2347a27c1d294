// Prompt Types and Enums

use base64::{Engine as _, engine::general_purpose};
use serde::{Deserialize, Serialize};

use crate::gemini::types::InputBlob;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptFormat {
    #[default]
    #[serde(rename = "JSON")]
    Json,
    Description,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisLevel {
    #[default]
    Normal,
    Akurat,
    Detail,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdeaMode {
    Prompt,
    Motion,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariationAspect {
    Background,
    Subject,
    Colors,
    #[serde(rename = "Visual Style")]
    VisualStyle,
    Element,
    Texture,
    #[serde(rename = "Pattern Animations")]
    PatternAnimations,
}

impl VariationAspect {
    pub fn label(self) -> &'static str {
        match self {
            VariationAspect::Background => "Background",
            VariationAspect::Subject => "Subject",
            VariationAspect::Colors => "Colors",
            VariationAspect::VisualStyle => "Visual Style",
            VariationAspect::Element => "Element",
            VariationAspect::Texture => "Texture",
            VariationAspect::PatternAnimations => "Pattern Animations",
        }
    }
}

pub const DURATION_PRESETS: [u32; 3] = [5, 8, 10];
pub const MOTION_CAMERA_ANGLE: &str = "static-shot";

fn default_duration() -> u32 {
    DURATION_PRESETS[0]
}

/// Image or video handed over as base64 text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(default)]
    pub mime_type: String,
    pub data: String,
}

impl Attachment {
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Attachment {
        Attachment {
            mime_type: mime_type.into(),
            data: general_purpose::STANDARD.encode(bytes),
        }
    }

    /// Accepts either bare base64 or a `data:<mime>;base64,<payload>` URI.
    pub fn from_data_url(input: &str) -> Option<Attachment> {
        let Some(rest) = input.strip_prefix("data:") else {
            return (!input.is_empty()).then(|| Attachment {
                mime_type: String::new(),
                data: input.to_string(),
            });
        };
        let (meta, data) = rest.split_once(',')?;
        let mime_type = meta.strip_suffix(";base64")?;
        if data.is_empty() {
            return None;
        }
        Some(Attachment {
            mime_type: mime_type.to_string(),
            data: data.to_string(),
        })
    }

    /// Fills in a missing MIME type from the payload's leading bytes.
    pub fn with_detected_mime(mut self, fallback: &str) -> Attachment {
        if self.mime_type.trim().is_empty() {
            self.mime_type = self.sniff_mime().unwrap_or(fallback).to_string();
        }
        self
    }

    pub fn is_video(&self) -> bool {
        self.mime_type.starts_with("video/")
    }

    fn sniff_mime(&self) -> Option<&'static str> {
        // 16 base64 chars decode to the 12 bytes we look at.
        let head: String = self.data.chars().take(16).collect();
        let bytes = general_purpose::STANDARD.decode(head).ok()?;
        detect_mime(&bytes)
    }
}

// Performs basic MIME type detection from file signatures.
fn detect_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.len() >= 3 && bytes[0] == 0xFF && bytes[1] == 0xD8 {
        Some("image/jpeg")
    } else if bytes.len() >= 8 && bytes[..8] == [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A] {
        Some("image/png")
    } else if bytes.len() >= 6 && (&bytes[0..6] == b"GIF89a" || &bytes[0..6] == b"GIF87a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else if bytes.len() >= 8 && &bytes[4..8] == b"ftyp" {
        Some("video/mp4")
    } else if bytes.len() >= 4 && bytes[..4] == [0x1A, 0x45, 0xDF, 0xA3] {
        Some("video/webm")
    } else {
        None
    }
}

impl From<Attachment> for InputBlob {
    fn from(a: Attachment) -> Self {
        InputBlob {
            mime_type: a.mime_type,
            data: a.data,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PromptOptions {
    pub idea: String,
    pub video_style: String,
    pub camera_angle: String,
    pub visual_style: String,
    #[serde(default)]
    pub image: Option<Attachment>,
    #[serde(default)]
    pub negative_prompts: Vec<String>,
    #[serde(default = "default_duration")]
    pub duration: u32,
    #[serde(default)]
    pub format: PromptFormat,
}

impl PromptOptions {
    /// Motion mode always shoots from a fixed camera.
    pub fn for_motion(mut self) -> PromptOptions {
        self.camera_angle = MOTION_CAMERA_ANGLE.to_string();
        self
    }
}

/// What a variation request may change.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum VariationMode {
    /// Only the listed aspects may differ from the source.
    #[serde(rename_all = "camelCase")]
    Aspects { aspects: Vec<VariationAspect> },
    /// Free-form instruction with English and Indonesian output.
    #[serde(rename_all = "camelCase")]
    Rich {
        instruction: String,
        video_style: String,
        visual_style: String,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PromptVariation {
    pub primary_text: String,
    pub secondary_text: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedPrompt {
    pub scene_description: String,
    pub key_subjects: Vec<String>,
    pub actions: Vec<String>,
    pub quality_style: String,
    pub camera_movement: String,
    pub mood: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", content = "result", rename_all = "lowercase")]
pub enum VideoAnalysis {
    Text(String),
    Analysis(AnalyzedPrompt),
}
