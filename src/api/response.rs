use crate::api::models::{GenerateContentResponse, Part};

pub const EMPTY_REPLY_TEXT: &str = "No valid response generated";

/// Decoded model output: concatenated text plus inline images as data URLs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Reply {
    pub text: String,
    pub images: Vec<String>,
}

/// Decode the first candidate of a response.
pub fn parse_reply(response: &GenerateContentResponse) -> Reply {
    let parts = match response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
    {
        Some(content) if !content.parts.is_empty() => &content.parts,
        _ => {
            return Reply {
                text: EMPTY_REPLY_TEXT.to_string(),
                images: Vec::new(),
            }
        }
    };

    parts.iter().fold(Reply::default(), |mut reply, part| {
        match part {
            Part::Text { text } => reply.text.push_str(text),
            Part::InlineData { inline_data } => reply.images.push(inline_data.to_data_url()),
            Part::Unsupported(_) => {}
        }
        reply
    })
}
