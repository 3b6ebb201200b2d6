use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A file the user attached to a turn, as remembered in history.
///
/// `data` holds base64 without a data-URL prefix and is only present for
/// payloads that can be replayed to the model (images).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AttachmentRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl AttachmentRecord {
    pub fn placeholder(&self) -> String {
        format!("[{}] {}", self.mime_type, self.name)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub content: String,
    pub is_user: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentRecord>,
    /// Data URLs of images produced by the assistant.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

impl Message {
    pub fn user(content: impl Into<String>, attachments: Vec<AttachmentRecord>) -> Self {
        Self {
            content: content.into(),
            is_user: true,
            attachments,
            images: Vec::new(),
        }
    }

    pub fn assistant(content: impl Into<String>, images: Vec<String>) -> Self {
        Self {
            content: content.into(),
            is_user: false,
            attachments: Vec::new(),
            images,
        }
    }

    pub fn role(&self) -> &'static str {
        if self.is_user {
            "user"
        } else {
            "model"
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: String,
    pub name: String,
    pub messages: Vec<Message>,
    pub selected_model: String,
    /// Epoch milliseconds.
    pub created_at: i64,
    /// Epoch milliseconds of the last appended message.
    #[serde(default)]
    pub updated_at: i64,
}

impl ChatSession {
    pub fn new(model: impl Into<String>) -> Self {
        let id = Uuid::new_v4().to_string();
        let name = Self::default_name(&id);
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            id,
            name,
            messages: Vec::new(),
            selected_model: model.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Label used until the session is renamed.
    pub fn default_name(id: &str) -> String {
        let short: String = id.chars().take(6).collect();
        format!("Chat {}", short)
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.updated_at = chrono::Utc::now().timestamp_millis();
    }

    pub fn last_updated(&self) -> chrono::DateTime<chrono::Local> {
        chrono::DateTime::from_timestamp_millis(self.updated_at.max(self.created_at))
            .unwrap_or_default()
            .with_timezone(&chrono::Local)
    }
}
