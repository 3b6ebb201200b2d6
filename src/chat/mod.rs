//! AI tutor conversations.
//!
//! [`ChatManager`] keeps the ordered set of sessions and turns user input into
//! generate-content calls. The user's message is always recorded before the
//! reply or error it produced.

pub mod attachments;
pub mod manager;
pub mod request;

pub use attachments::{
    DocumentTextExtractor, FileUpload, PdfTextExtractor, PDF_EXCERPT_CHARS, PDF_MIME,
};
pub use manager::ChatManager;
pub use request::{build_request, supports_image_output, ChatSettings};
