use crate::api::{parse_reply, ContentGenerator, Part};
use crate::chat::attachments::{
    current_turn_part, DocumentTextExtractor, FileUpload, PdfTextExtractor,
};
use crate::chat::request::{build_request, ChatSettings};
use crate::error::{Error, Result};
use crate::models::{ChatSession, Message};
use std::sync::Arc;
use tokio::sync::Mutex;

struct SessionSlot {
    session: ChatSession,
    /// Held for the whole of a turn so turns on one session never interleave.
    turn: Arc<Mutex<()>>,
}

#[derive(Default)]
struct ChatState {
    slots: Vec<SessionSlot>,
    active: Option<String>,
}

impl ChatState {
    fn slot(&self, id: &str) -> Result<&SessionSlot> {
        self.slots
            .iter()
            .find(|slot| slot.session.id == id)
            .ok_or_else(|| Error::SessionNotFound(id.to_string()))
    }

    fn slot_mut(&mut self, id: &str) -> Result<&mut SessionSlot> {
        self.slots
            .iter_mut()
            .find(|slot| slot.session.id == id)
            .ok_or_else(|| Error::SessionNotFound(id.to_string()))
    }
}

/// Owns every conversation and mediates all calls to the model.
pub struct ChatManager {
    generator: Arc<dyn ContentGenerator>,
    extractor: Arc<dyn DocumentTextExtractor>,
    settings: ChatSettings,
    state: Mutex<ChatState>,
}

impl ChatManager {
    pub fn new(generator: Arc<dyn ContentGenerator>, settings: ChatSettings) -> Self {
        Self {
            generator,
            extractor: Arc::new(PdfTextExtractor),
            settings,
            state: Mutex::new(ChatState::default()),
        }
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn DocumentTextExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn settings(&self) -> &ChatSettings {
        &self.settings
    }

    /// Start a conversation and make it the active one.
    pub async fn create_session(&self, model: &str) -> ChatSession {
        let session = ChatSession::new(model);
        tracing::info!(session = %session.id, model, "created chat session");
        self.insert(session.clone()).await;
        session
    }

    /// Re-attach a conversation loaded from elsewhere and make it active.
    pub async fn restore_session(&self, session: ChatSession) {
        tracing::debug!(session = %session.id, messages = session.messages.len(), "restored chat session");
        self.insert(session).await;
    }

    async fn insert(&self, session: ChatSession) {
        let mut state = self.state.lock().await;
        let id = session.id.clone();
        match state.slots.iter_mut().find(|slot| slot.session.id == id) {
            Some(slot) => slot.session = session,
            None => state.slots.push(SessionSlot {
                session,
                turn: Arc::new(Mutex::new(())),
            }),
        }
        state.active = Some(id);
    }

    pub async fn switch_session(&self, id: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        state.slot(id)?;
        state.active = Some(id.to_string());
        Ok(())
    }

    pub async fn active_session_id(&self) -> Option<String> {
        self.state.lock().await.active.clone()
    }

    pub async fn active_session(&self) -> Option<ChatSession> {
        let state = self.state.lock().await;
        let id = state.active.as_deref()?;
        state.slot(id).ok().map(|slot| slot.session.clone())
    }

    pub async fn session(&self, id: &str) -> Result<ChatSession> {
        let state = self.state.lock().await;
        Ok(state.slot(id)?.session.clone())
    }

    /// All sessions in creation order.
    pub async fn sessions(&self) -> Vec<ChatSession> {
        let state = self.state.lock().await;
        state.slots.iter().map(|slot| slot.session.clone()).collect()
    }

    pub async fn rename_session(&self, id: &str, name: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        let slot = state.slot_mut(id)?;
        let name = name.trim();
        slot.session.name = if name.is_empty() {
            ChatSession::default_name(id)
        } else {
            name.to_string()
        };
        Ok(())
    }

    pub async fn select_model(&self, id: &str, model: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        state.slot_mut(id)?.session.selected_model = model.to_string();
        Ok(())
    }

    /// Run one turn of a conversation.
    ///
    /// Returns `Ok(None)` when there is nothing to send. Failures talking to
    /// the model come back as an assistant message starting with `Error:`;
    /// only an unknown session id is reported as an error.
    pub async fn send_message(
        &self,
        id: &str,
        prompt: &str,
        uploads: Vec<FileUpload>,
    ) -> Result<Option<Message>> {
        let turn = {
            let state = self.state.lock().await;
            Arc::clone(&state.slot(id)?.turn)
        };

        if prompt.trim().is_empty() && uploads.is_empty() {
            return Ok(None);
        }

        let _turn = turn.lock().await;

        let (history, model) = {
            let mut state = self.state.lock().await;
            let slot = state.slot_mut(id)?;
            let history = slot.session.messages.clone();
            let model = slot.session.selected_model.clone();
            let records = uploads.iter().map(FileUpload::to_record).collect();
            slot.session.push(Message::user(prompt, records));
            (history, model)
        };

        let reply = match self.prepare_parts(&uploads).await {
            Ok(parts) => self.request_reply(&history, prompt, parts, &model).await,
            Err(e) => Err(e),
        };

        let message = match reply {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(session = %id, error = %e, "chat turn failed");
                Message::assistant(format!("Error: {}", e), Vec::new())
            }
        };

        let mut state = self.state.lock().await;
        state.slot_mut(id)?.session.push(message.clone());
        Ok(Some(message))
    }

    async fn prepare_parts(&self, uploads: &[FileUpload]) -> Result<Vec<Part>> {
        futures::future::try_join_all(uploads.iter().cloned().map(|upload| {
            let extractor = Arc::clone(&self.extractor);
            async move {
                tokio::task::spawn_blocking(move || current_turn_part(&upload, extractor.as_ref()))
                    .await
                    .map_err(|e| Error::Attachment(format!("Attachment task failed: {}", e)))?
            }
        }))
        .await
    }

    async fn request_reply(
        &self,
        history: &[Message],
        prompt: &str,
        parts: Vec<Part>,
        model: &str,
    ) -> Result<Message> {
        let request = build_request(history, prompt, parts, model, &self.settings);
        tracing::debug!(
            model,
            turns = request.contents.len(),
            modalities = ?request.generation_config.response_modalities,
            "requesting reply"
        );

        let response = self.generator.generate(model, &request).await?;
        let reply = parse_reply(&response);
        Ok(Message::assistant(reply.text, reply.images))
    }
}
