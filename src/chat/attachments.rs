use crate::api::Part;
use crate::error::{Error, Result};
use crate::models::AttachmentRecord;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;

/// Characters of extracted PDF text forwarded to the model.
pub const PDF_EXCERPT_CHARS: usize = 1000;

pub const PDF_MIME: &str = "application/pdf";

/// A file picked by the user for the current turn.
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub async fn from_path(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("attachment")
            .to_string();
        let mime_type = guess_mime_type(path).to_string();
        Ok(Self {
            name,
            mime_type,
            bytes,
        })
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    pub fn is_pdf(&self) -> bool {
        self.mime_type == PDF_MIME
    }

    /// How this file is remembered on the user's message.
    pub fn to_record(&self) -> AttachmentRecord {
        AttachmentRecord {
            name: self.name.clone(),
            mime_type: self.mime_type.clone(),
            data: self.is_image().then(|| STANDARD.encode(&self.bytes)),
        }
    }
}

pub fn guess_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => PDF_MIME,
        "txt" | "md" => "text/plain",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

/// Pulls readable text out of a document.
pub trait DocumentTextExtractor: Send + Sync {
    fn extract_text(&self, bytes: &[u8]) -> Result<String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl DocumentTextExtractor for PdfTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String> {
        pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| Error::Attachment(format!("Could not read PDF text: {}", e)))
    }
}

/// Request part for a file attached to the current turn.
pub fn current_turn_part(upload: &FileUpload, extractor: &dyn DocumentTextExtractor) -> Result<Part> {
    if upload.is_pdf() {
        let text = extractor.extract_text(&upload.bytes)?;
        let excerpt: String = text.chars().take(PDF_EXCERPT_CHARS).collect();
        return Ok(Part::text(format!("[PDF] {}...", excerpt)));
    }

    if upload.is_image() {
        return Ok(Part::inline(
            upload.mime_type.clone(),
            STANDARD.encode(&upload.bytes),
        ));
    }

    Ok(Part::text(format!("[{}] {}", upload.mime_type, upload.name)))
}

/// Request part replaying an attachment from history.
pub fn history_part(record: &AttachmentRecord) -> Part {
    match &record.data {
        Some(data) => Part::inline(record.mime_type.clone(), data.clone()),
        None => Part::text(record.placeholder()),
    }
}
