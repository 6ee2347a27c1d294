// Turns raw upstream text into the result types callers expect.

use crate::error::GenerationError;
use crate::prompts::{AnalyzedPrompt, PromptVariation};
use serde::Deserialize;
use serde_json::Value;

/// Element layout of a variations array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariationShape {
    /// `{ "english": ... }`, secondary text left empty.
    Description,
    /// Whole prompt objects, each pretty-printed into the primary slot.
    Json,
    /// `{ "english": ..., "indonesian": ... }` copied through as-is.
    Rich,
}

pub fn free_text(raw: &str, what: &'static str) -> Result<String, GenerationError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(GenerationError::EmptyResponse(what));
    }
    Ok(text.to_string())
}

fn parse_value(raw: &str, what: &'static str) -> Result<Value, GenerationError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(GenerationError::EmptyResponse(what));
    }
    serde_json::from_str(text).map_err(|e| GenerationError::malformed(what, e.to_string()))
}

// Mirrors the truthiness check a JS caller would apply, plus empty containers.
fn is_empty_value(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn pretty(v: &Value, what: &'static str) -> Result<String, GenerationError> {
    serde_json::to_string_pretty(v).map_err(|e| GenerationError::malformed(what, e.to_string()))
}

/// Single structured object, pretty-printed for display.
pub fn pretty_object(raw: &str, what: &'static str) -> Result<String, GenerationError> {
    let v = parse_value(raw, what)?;
    if is_empty_value(&v) || !v.is_object() {
        return Err(GenerationError::malformed(what, "expected a non-empty JSON object"));
    }
    pretty(&v, what)
}

pub fn analysis_object(raw: &str) -> Result<AnalyzedPrompt, GenerationError> {
    const WHAT: &str = "video analysis";
    let v = parse_value(raw, WHAT)?;
    if is_empty_value(&v) {
        return Err(GenerationError::malformed(WHAT, "empty JSON data"));
    }
    serde_json::from_value(v).map_err(|e| GenerationError::malformed(WHAT, e.to_string()))
}

#[derive(Deserialize)]
struct EnglishOnly {
    english: String,
}

#[derive(Deserialize)]
struct Bilingual {
    english: String,
    #[serde(default)]
    indonesian: String,
}

pub fn variations(raw: &str, shape: VariationShape) -> Result<Vec<PromptVariation>, GenerationError> {
    const WHAT: &str = "variations";
    let v = parse_value(raw, WHAT)?;
    let Value::Array(items) = v else {
        return Err(GenerationError::malformed(WHAT, "expected a JSON array"));
    };
    if items.is_empty() {
        return Err(GenerationError::malformed(WHAT, "empty variations list"));
    }

    items
        .into_iter()
        .map(|item| {
            let (primary_text, secondary_text) = match shape {
                VariationShape::Json => {
                    if is_empty_value(&item) {
                        return Err(GenerationError::malformed(WHAT, "empty variation object"));
                    }
                    (pretty(&item, WHAT)?, String::new())
                }
                VariationShape::Description => {
                    let e: EnglishOnly = serde_json::from_value(item)
                        .map_err(|e| GenerationError::malformed(WHAT, e.to_string()))?;
                    (e.english, String::new())
                }
                VariationShape::Rich => {
                    let b: Bilingual = serde_json::from_value(item)
                        .map_err(|e| GenerationError::malformed(WHAT, e.to_string()))?;
                    (b.english, b.indonesian)
                }
            };
            if primary_text.trim().is_empty() {
                return Err(GenerationError::malformed(WHAT, "variation without english text"));
            }
            Ok(PromptVariation {
                primary_text,
                secondary_text,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn free_text_trims_and_rejects_blank() {
        assert_eq!(free_text("  a cat on a roof \n", "idea").unwrap(), "a cat on a roof");
        for raw in ["", "   ", "\n\t"] {
            assert_eq!(
                free_text(raw, "idea").unwrap_err().kind(),
                ErrorKind::EmptyResponse
            );
        }
    }

    #[test]
    fn pretty_object_formats_with_two_spaces() {
        let out = pretty_object(r#"{"a":{"b":1}}"#, "prompt").unwrap();
        assert_eq!(out, "{\n  \"a\": {\n    \"b\": 1\n  }\n}");
    }

    #[test]
    fn malformed_or_empty_objects_are_rejected() {
        for raw in ["{not json", "null", "{}", "false", "[1,2]"] {
            assert_eq!(
                pretty_object(raw, "prompt").unwrap_err().kind(),
                ErrorKind::MalformedResponse,
                "input: {raw}"
            );
        }
        assert_eq!(
            pretty_object("  ", "prompt").unwrap_err().kind(),
            ErrorKind::EmptyResponse
        );
    }

    #[test]
    fn analysis_round_trips_through_pretty_print() {
        let original = AnalyzedPrompt {
            scene_description: "A rainy street at dusk".into(),
            key_subjects: vec!["cyclist".into(), "umbrella".into()],
            actions: vec!["cycling".into()],
            quality_style: "Cinematic".into(),
            camera_movement: "Tracking Shot".into(),
            mood: "Melancholic".into(),
        };
        let raw = serde_json::to_string(&original).unwrap();
        let printed = pretty_object(&raw, "video analysis").unwrap();
        assert_eq!(analysis_object(&printed).unwrap(), original);
    }

    #[test]
    fn analysis_missing_field_is_malformed() {
        let raw = json!({ "sceneDescription": "x", "mood": "calm" }).to_string();
        assert_eq!(
            analysis_object(&raw).unwrap_err().kind(),
            ErrorKind::MalformedResponse
        );
    }

    #[test]
    fn json_variations_are_pretty_printed_with_empty_secondary() {
        let raw = json!([
            { "prompt_components": { "subject": "cat" }, "technical_parameters": { "duration_seconds": 5 } },
            { "prompt_components": { "subject": "dog" }, "technical_parameters": { "duration_seconds": 5 } },
            { "prompt_components": { "subject": "fox" }, "technical_parameters": { "duration_seconds": 5 } }
        ])
        .to_string();

        let out = variations(&raw, VariationShape::Json).unwrap();
        assert_eq!(out.len(), 3);
        for v in &out {
            assert!(!v.primary_text.is_empty());
            assert!(v.secondary_text.is_empty());
            let back: Value = serde_json::from_str(&v.primary_text).unwrap();
            assert!(back["prompt_components"]["subject"].is_string());
        }
    }

    #[test]
    fn description_variations_keep_only_english() {
        let raw = json!([{ "english": "one" }, { "english": "two" }]).to_string();
        let out = variations(&raw, VariationShape::Description).unwrap();
        assert_eq!(
            out,
            vec![
                PromptVariation { primary_text: "one".into(), secondary_text: String::new() },
                PromptVariation { primary_text: "two".into(), secondary_text: String::new() },
            ]
        );
    }

    #[test]
    fn rich_variations_copy_both_languages() {
        let raw = json!([
            { "english": "a cat at night", "indonesian": "seekor kucing di malam hari" },
            { "english": "a cat at dawn" }
        ])
        .to_string();
        let out = variations(&raw, VariationShape::Rich).unwrap();
        assert_eq!(out[0].secondary_text, "seekor kucing di malam hari");
        assert_eq!(out[1].secondary_text, "");
    }

    #[test]
    fn blank_english_text_is_malformed() {
        let raw = json!([{ "english": "a fox at dusk" }, { "english": "  " }]).to_string();
        assert_eq!(
            variations(&raw, VariationShape::Description).unwrap_err().kind(),
            ErrorKind::MalformedResponse
        );
        let raw = json!([{ "english": "", "indonesian": "rubah" }]).to_string();
        assert_eq!(
            variations(&raw, VariationShape::Rich).unwrap_err().kind(),
            ErrorKind::MalformedResponse
        );
    }

    #[test]
    fn non_array_or_empty_array_is_malformed() {
        for raw in ["[]", r#"{"english":"x"}"#, "oops", r#"[{"text":"x"}]"#] {
            assert_eq!(
                variations(raw, VariationShape::Description).unwrap_err().kind(),
                ErrorKind::MalformedResponse,
                "input: {raw}"
            );
        }
    }
}
