// Named response-shape contracts, one per (task, output format).

use crate::gemini::types::Schema;

pub const PROMPT_COMPONENT_FIELDS: [&str; 7] = [
    "genre",
    "subject",
    "action_detail",
    "setting_detail",
    "camera_shot",
    "lighting_mood",
    "quality_style",
];

pub const ANALYSIS_FIELDS: [&str; 6] = [
    "sceneDescription",
    "keySubjects",
    "actions",
    "qualityStyle",
    "cameraMovement",
    "mood",
];

/// Structured video prompt: `prompt_components` + `technical_parameters`.
pub fn video_prompt() -> Schema {
    let components = Schema::object([
        ("genre", Schema::string()),
        (
            "subject",
            Schema::string().describe(
                "The main character(s) or object(s) of the video. Should be a concise phrase.",
            ),
        ),
        (
            "action_detail",
            Schema::string().describe("The specific actions or movements taking place."),
        ),
        (
            "setting_detail",
            Schema::string()
                .describe("Description of the environment, background, and location."),
        ),
        ("camera_shot", Schema::string()),
        (
            "lighting_mood",
            Schema::string().describe("The mood or atmosphere conveyed by lighting."),
        ),
        ("quality_style", Schema::string()),
    ])
    .with_required(PROMPT_COMPONENT_FIELDS);

    let technical = Schema::object([
        (
            "duration_seconds",
            Schema::integer().describe("The duration of the video in seconds."),
        ),
        (
            "negative_prompts",
            Schema::array_of(Schema::string())
                .describe("A list of elements to exclude from the generation."),
        ),
    ])
    .with_required(["duration_seconds"]);

    Schema::object([
        ("prompt_components", components),
        ("technical_parameters", technical),
    ])
}

pub fn video_prompt_variations() -> Schema {
    Schema::array_of(video_prompt())
}

pub fn description_variations() -> Schema {
    Schema::array_of(Schema::object([(
        "english",
        Schema::string().describe("The creative variation of the prompt in English."),
    )]))
}

pub fn bilingual_variations() -> Schema {
    Schema::array_of(Schema::object([
        (
            "english",
            Schema::string().describe("The variation of the prompt in English."),
        ),
        (
            "indonesian",
            Schema::string().describe("The same variation translated into Indonesian."),
        ),
    ]))
}

pub fn video_analysis() -> Schema {
    Schema::object([
        (
            "sceneDescription",
            Schema::string()
                .describe("A detailed description of the main scene, environment, and setting."),
        ),
        (
            "keySubjects",
            Schema::array_of(Schema::string())
                .describe("The main subjects, characters, or objects in the video."),
        ),
        (
            "actions",
            Schema::array_of(Schema::string())
                .describe("The key actions and movements happening."),
        ),
        (
            "qualityStyle",
            Schema::string().describe("The overall visual aesthetic (e.g., 'Cinematic', '3D Render')."),
        ),
        (
            "cameraMovement",
            Schema::string().describe("The style of camera work used (e.g., 'Static Shot', 'POV')."),
        ),
        (
            "mood",
            Schema::string().describe("The emotional tone or atmosphere of the video."),
        ),
    ])
    .with_required(ANALYSIS_FIELDS)
}
