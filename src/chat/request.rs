use crate::api::{Content, GenerateContentRequest, GenerationConfig, Modality, Part};
use crate::chat::attachments::history_part;
use crate::models::Message;

/// Knobs applied to every generate-content call.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSettings {
    pub system_prompt: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
}

impl ChatSettings {
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self {
            system_prompt: config.system_prompt.clone(),
            max_output_tokens: config.max_output_tokens,
            temperature: config.temperature,
        }
    }
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            system_prompt: crate::config::DEFAULT_SYSTEM_PROMPT.to_string(),
            max_output_tokens: crate::config::default_max_output_tokens(),
            temperature: crate::config::default_temperature(),
        }
    }
}

/// Models whose name mentions "image" may answer with pictures.
pub fn supports_image_output(model: &str) -> bool {
    model.to_lowercase().contains("image")
}

pub fn history_content(message: &Message) -> Content {
    let mut parts = Vec::with_capacity(1 + message.attachments.len());
    parts.push(Part::text(message.content.clone()));
    parts.extend(message.attachments.iter().map(history_part));
    Content::new(message.role(), parts)
}

/// Assemble the turns for one call.
///
/// `history` is everything recorded before the current prompt. When it is
/// empty the instructions go first as a model turn.
pub fn build_request(
    history: &[Message],
    prompt: &str,
    current_parts: Vec<Part>,
    model: &str,
    settings: &ChatSettings,
) -> GenerateContentRequest {
    let mut contents = Vec::with_capacity(history.len() + 2);

    if history.is_empty() {
        contents.push(Content::new(
            "model",
            vec![Part::text(settings.system_prompt.clone())],
        ));
    }

    contents.extend(history.iter().map(history_content));

    let mut parts = Vec::with_capacity(1 + current_parts.len());
    parts.push(Part::text(prompt));
    parts.extend(current_parts);
    contents.push(Content::new("user", parts));

    let response_modalities = if supports_image_output(model) {
        vec![Modality::Text, Modality::Image]
    } else {
        vec![Modality::Text]
    };

    GenerateContentRequest {
        contents,
        generation_config: GenerationConfig {
            response_modalities,
            max_output_tokens: settings.max_output_tokens,
            temperature: settings.temperature,
        },
    }
}
