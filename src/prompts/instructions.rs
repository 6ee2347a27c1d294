// System instructions. Every generation task states its own output budget.

use super::types::{AnalysisLevel, IdeaMode, PromptFormat, PromptOptions, VariationAspect};

/// Ceiling on rendered output, structural punctuation included.
pub const CHAR_BUDGET: usize = 990;

pub const ASPECT_VARIATION_COUNT: usize = 5;
pub const RICH_VARIATION_COUNT: usize = 3;

pub fn idea(mode: IdeaMode) -> String {
    let (word_count, focus) = match mode {
        IdeaMode::Prompt => ("3 to 10 words", "a natural, everyday scenario"),
        IdeaMode::Motion => (
            "5 to 15 words",
            "themes of motion graphics, abstract visuals, and dynamic movement",
        ),
    };

    format!(
        "You are a creative assistant that generates concise video concepts. \
Based on the user's keywords, create a single, compelling video idea.
- The idea must be {word_count} long.
- The focus should be on {focus}.
- VERY IMPORTANT: Only output the generated idea. Do not include any extra text, quotation marks, or explanations."
    )
}

pub fn idea_user(keywords: &str) -> String {
    format!("Keywords: \"{keywords}\"")
}

pub fn prompt(format: PromptFormat) -> String {
    match format {
        PromptFormat::Description => format!(
            "You are a world-class prompt engineer for a generative AI text-to-video model. \
Your task is to craft a vivid, detailed, and coherent descriptive paragraph that can be used as a prompt.
- Combine the user's core idea and stylistic choices into a single, narrative description.
- The description should be rich in visual detail, covering subjects, actions, setting, lighting, and mood.
- Do not use JSON, markdown, or any structured format. The output must be a single block of text.
- Weave the genre, camera angle, quality style, and duration into the description naturally and creatively.
- For example, instead of 'duration: 5s', you might say 'a brief 5-second shot'.
- The entire final description MUST NOT exceed {CHAR_BUDGET} characters."
        ),
        PromptFormat::Json => format!(
            "You are a world-class prompt engineer for a generative AI text-to-video model. \
Your task is to take a user's core idea and stylistic choices and convert them into a structured JSON object.
- Analyze the 'Core Idea' to extract a concise 'subject', 'action_detail', 'setting_detail', and 'lighting_mood'.
- Populate the 'prompt_components' and 'technical_parameters' fields based on the user's input and your analysis.
- 'genre', 'quality_style', 'camera_shot', and 'duration_seconds' must be populated directly from the user's provided values.
- If a reference image is provided, draw inspiration from its composition, color palette, and subject matter to enrich the JSON fields.
- The total character count of the generated JSON output, including all formatting, MUST NOT exceed {CHAR_BUDGET} characters. \
Be concise in your descriptions for 'subject', 'action_detail', 'setting_detail', and 'lighting_mood' to meet this constraint.
- Your final output MUST be a valid JSON object that strictly adheres to the provided schema. \
Do not add any extra text, commentary, or markdown formatting."
        ),
    }
}

pub fn prompt_user(opts: &PromptOptions) -> String {
    let has_image = opts.image.is_some();
    match opts.format {
        PromptFormat::Description => {
            let negatives = if opts.negative_prompts.is_empty() {
                "None".to_string()
            } else {
                opts.negative_prompts.join(", ")
            };
            let image_note = if has_image {
                "\n---\nReference Image Provided: Draw inspiration from its composition, color palette, and subject matter to enrich the description."
            } else {
                ""
            };
            format!(
                "Core Idea: \"{}\"\n---\nValues to incorporate:\nGenre: \"{}\"\nCamera Angle / Shot: \"{}\"\nQuality Style: \"{}\"\nDuration: {} seconds\nNegative Prompts (elements to avoid): {}{}",
                opts.idea,
                opts.video_style,
                opts.camera_angle,
                opts.visual_style,
                opts.duration,
                negatives,
                image_note
            )
        }
        PromptFormat::Json => {
            // Serializing a Vec<String> cannot fail.
            let negatives =
                serde_json::to_string(&opts.negative_prompts).unwrap_or_else(|_| "[]".into());
            let image_note = if has_image {
                "\n---\nReference Image Provided: Analyze the image and incorporate its elements into the JSON fields."
            } else {
                ""
            };
            format!(
                "Core Idea: \"{}\"\n---\nValues to use:\nGenre: \"{}\"\nCamera Angle / Shot: \"{}\"\nQuality Style: \"{}\"\nDuration: {} seconds\nNegative Prompts: {}{}",
                opts.idea,
                opts.video_style,
                opts.camera_angle,
                opts.visual_style,
                opts.duration,
                negatives,
                image_note
            )
        }
    }
}

pub fn aspect_list(aspects: &[VariationAspect]) -> String {
    aspects
        .iter()
        .map(|a| a.label())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn aspect_variation(format: PromptFormat, aspects: &[VariationAspect]) -> String {
    let n = ASPECT_VARIATION_COUNT;
    let list = aspect_list(aspects);
    match format {
        PromptFormat::Description => format!(
            "You are a creative prompt engineer specializing in text-to-video generation. \
Your task is to create {n} distinct variations of a given prompt description.

Key Constraints:
1. Focused Variation: You MUST only alter the aspects specified by the user: \"{list}\". \
For example, if the user chose 'Background', only change the background description. \
If they chose 'Colors', only change the color descriptions. \
All other elements like subject, action, style, camera angles, etc., MUST be preserved.
2. Creative Freedom: Be creative with the changes for the specified aspect.
3. English Only: The output must be in English.
4. Output Format: Your final output must be a valid JSON array of objects, each with an \"english\" key containing the prompt. \
Do not add any extra text, commentary, or markdown formatting.
5. Character Limit: Each generated variation description (the value of the \"english\" key) MUST NOT exceed {CHAR_BUDGET} characters."
        ),
        PromptFormat::Json => format!(
            "You are an expert prompt engineer for a generative AI text-to-video model. \
Your task is to take a user's JSON prompt and generate {n} creative variations.

Key Constraints:
1. Maintain Structure: Each variation must be a valid JSON object with the exact same structure as the original ('prompt_components' and 'technical_parameters').
2. Focused Variation: You MUST only alter the values related to the aspects specified by the user: \"{list}\". \
All other key-value pairs in the JSON structure MUST remain identical to the original prompt.
   - If 'Background' is chosen, alter 'setting_detail'.
   - If 'Subject' is chosen, alter 'subject'.
   - If 'Colors' is chosen, alter 'lighting_mood' or add color descriptions to other relevant fields.
   - If 'Visual Style' is chosen, alter 'quality_style'.
   - Adapt creatively for other aspects like 'Element', 'Texture', 'Pattern Animations'.
3. Output Format: Your final output MUST be a valid JSON array of these prompt objects. \
Do not add any extra text, commentary, or markdown formatting.
4. Character Limit: The total character count of each generated JSON variation, including all formatting, MUST NOT exceed {CHAR_BUDGET} characters. \
Keep descriptions concise to meet this constraint."
        ),
    }
}

pub fn aspect_variation_user(format: PromptFormat, source: &str, aspects: &[VariationAspect]) -> String {
    let n = ASPECT_VARIATION_COUNT;
    let list = aspect_list(aspects);
    match format {
        PromptFormat::Description => format!(
            "Original prompt description: \"{source}\"\n\nUser-selected aspects to vary:\n\"{list}\"\n\n\
Now, generate {n} English-only variations based on these instructions, ensuring your output is a valid JSON array."
        ),
        PromptFormat::Json => format!(
            "Original JSON prompt:\n```json\n{source}\n```\n\nUser-selected aspects to vary:\n\"{list}\"\n\n\
Now, generate {n} variations based on these instructions."
        ),
    }
}

pub fn rich_variation(video_style: &str, visual_style: &str) -> String {
    let n = RICH_VARIATION_COUNT;
    format!(
        "You are a creative prompt engineer specializing in text-to-video generation. \
Your task is to create {n} distinct variations of a given video prompt.

Key Constraints:
1. Follow the Instruction: Apply the user's variation instruction to every variation. \
If no instruction is given, vary the scene creatively while keeping its core idea.
2. Keep the Style: Genre \"{video_style}\" and quality style \"{visual_style}\" MUST be preserved in every variation.
3. Bilingual Output: Each variation must be written in English (\"english\" key) and translated faithfully into Indonesian (\"indonesian\" key).
4. Output Format: Your final output must be a valid JSON array of objects with both keys. \
Do not add any extra text, commentary, or markdown formatting.
5. Character Limit: Each language version MUST NOT exceed {CHAR_BUDGET} characters."
    )
}

pub fn rich_variation_user(source: &str, instruction: &str) -> String {
    let instruction = if instruction.trim().is_empty() {
        "None"
    } else {
        instruction.trim()
    };
    format!(
        "Original prompt:\n{source}\n\nVariation instruction: \"{instruction}\"\n\n\
Now, generate {RICH_VARIATION_COUNT} variations in English and Indonesian."
    )
}

pub fn analysis(level: AnalysisLevel, format: PromptFormat) -> String {
    match format {
        PromptFormat::Description => {
            let base = format!(
                "The output must be a single block of text and MUST NOT exceed {CHAR_BUDGET} characters. \
Do not use JSON, markdown, or any structured format."
            );
            match level {
                AnalysisLevel::Akurat => format!(
                    "You are a precise and objective video analyst. Your task is to analyze the provided video \
and factually describe its contents in a single, concise paragraph. Focus strictly on what is visually present. \
Avoid interpretation, inferring emotion, or adding creative flair. {base}"
                ),
                AnalysisLevel::Detail => format!(
                    "You are a highly meticulous and descriptive video analyst. Your task is to provide a very detailed, \
exhaustive analysis of the video in a single paragraph. Delve into details like textures, background elements, \
color palettes, lighting, and movements. {base}"
                ),
                AnalysisLevel::Normal => format!(
                    "You are a world-class video analyst. Your task is to analyze the provided video and generate a vivid, \
descriptive paragraph that could be used as a prompt to recreate a similar video. Capture the scene, subjects, \
actions, style, camera work, and mood in a flowing narrative. {base}"
                ),
            }
        }
        PromptFormat::Json => {
            let base = format!(
                "Your final output must be a valid JSON object matching the provided schema, and its total character count \
MUST NOT exceed {CHAR_BUDGET}. Do not include any extra text, commentary, or markdown formatting. \
Keep all text values concise to meet this constraint."
            );
            match level {
                AnalysisLevel::Akurat => format!(
                    "You are a precise and objective video analyst. Your task is to analyze the provided video and factually \
describe its contents in JSON format. Focus strictly on what is visually present. Avoid interpretation or emotion. {base}"
                ),
                AnalysisLevel::Detail => format!(
                    "You are a highly meticulous and descriptive video analyst. Your task is to provide a very detailed, \
exhaustive analysis of the video in JSON format. Delve into details like textures, background elements, \
color palettes, lighting, and movements. {base}"
                ),
                AnalysisLevel::Normal => format!(
                    "You are a world-class video analyst and prompt engineer. Your task is to analyze the provided video and \
generate a structured, detailed prompt in JSON format that could be used to recreate a similar video. {base}"
                ),
            }
        }
    }
}

pub const ANALYSIS_USER: &str =
    "Analyze the attached video and generate a response based on your instructions.";
