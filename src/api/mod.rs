pub mod client;
pub mod models;
pub mod response;

pub use client::{ContentGenerator, GeminiClient};
pub use models::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, InlineData,
    Modality, Part,
};
pub use response::{parse_reply, Reply};
