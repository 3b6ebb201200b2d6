use async_trait::async_trait;
use serde_json::json;
use startwise::api::{
    ContentGenerator, GenerateContentRequest, GenerateContentResponse, Modality, Part,
};
use startwise::chat::{ChatManager, ChatSettings, FileUpload};
use startwise::error::{Error, Result};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Scripted generator that remembers every request it saw.
struct FakeGenerator {
    replies: Mutex<VecDeque<Result<GenerateContentResponse>>>,
    seen: Mutex<Vec<(String, GenerateContentRequest)>>,
}

impl FakeGenerator {
    fn new(replies: Vec<Result<GenerateContentResponse>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<(String, GenerateContentRequest)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentGenerator for FakeGenerator {
    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        self.seen
            .lock()
            .unwrap()
            .push((model.to_string(), request.clone()));
        tokio::task::yield_now().await;
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(text_response("default reply")))
    }
}

fn text_response(text: &str) -> GenerateContentResponse {
    serde_json::from_value(json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
    }))
    .unwrap()
}

fn settings() -> ChatSettings {
    ChatSettings {
        system_prompt: "Be helpful.".to_string(),
        max_output_tokens: 1024,
        temperature: 1.0,
    }
}

#[tokio::test]
async fn test_hello_round_trip() {
    let generator = FakeGenerator::new(vec![Ok(text_response("Hi there"))]);
    let manager = ChatManager::new(generator.clone(), settings());

    let session = manager.create_session("gpt-x").await;
    let reply = manager
        .send_message(&session.id, "Hello", vec![])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reply.content, "Hi there");

    let session = manager.session(&session.id).await.unwrap();
    assert_eq!(session.messages.len(), 2);
    assert_eq!(session.messages[0].content, "Hello");
    assert!(session.messages[0].is_user);
    assert_eq!(session.messages[1].content, "Hi there");
    assert!(!session.messages[1].is_user);

    let requests = generator.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, "gpt-x");
}

#[tokio::test]
async fn test_new_session_becomes_active() {
    let manager = ChatManager::new(FakeGenerator::new(vec![]), settings());
    let first = manager.create_session("model-a").await;
    let second = manager.create_session("model-b").await;

    assert_eq!(manager.active_session_id().await, Some(second.id.clone()));
    assert!(second.messages.is_empty());
    assert_eq!(second.selected_model, "model-b");
    assert_eq!(second.name, format!("Chat {}", &second.id[..6]));

    manager.switch_session(&first.id).await.unwrap();
    assert_eq!(manager.active_session().await.unwrap().id, first.id);

    let ids: Vec<String> = manager.sessions().await.into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[tokio::test]
async fn test_switch_to_unknown_session_fails() {
    let manager = ChatManager::new(FakeGenerator::new(vec![]), settings());
    let session = manager.create_session("model").await;

    let err = manager.switch_session("missing").await.unwrap_err();
    assert!(matches!(err, Error::SessionNotFound(ref id) if id == "missing"));
    assert_eq!(manager.active_session_id().await, Some(session.id));
    assert_eq!(manager.sessions().await.len(), 1);
}

#[tokio::test]
async fn test_send_to_unknown_session_fails() {
    let generator = FakeGenerator::new(vec![]);
    let manager = ChatManager::new(generator.clone(), settings());

    let err = manager.send_message("nope", "Hello", vec![]).await.unwrap_err();
    assert!(matches!(err, Error::SessionNotFound(_)));
    assert!(generator.requests().is_empty());
}

#[tokio::test]
async fn test_empty_input_is_a_no_op() {
    let generator = FakeGenerator::new(vec![]);
    let manager = ChatManager::new(generator.clone(), settings());
    let session = manager.create_session("model").await;

    let result = manager.send_message(&session.id, "   ", vec![]).await.unwrap();
    assert!(result.is_none());
    assert!(generator.requests().is_empty());
    assert!(manager.session(&session.id).await.unwrap().messages.is_empty());
}

#[tokio::test]
async fn test_user_message_always_precedes_reply() {
    let generator = FakeGenerator::new(vec![
        Ok(text_response("one")),
        Err(Error::Timeout),
        Ok(text_response("three")),
    ]);
    let manager = ChatManager::new(generator, settings());
    let session = manager.create_session("model").await;

    for prompt in ["first", "second", "third"] {
        manager.send_message(&session.id, prompt, vec![]).await.unwrap();
    }

    let messages = manager.session(&session.id).await.unwrap().messages;
    let flags: Vec<bool> = messages.iter().map(|m| m.is_user).collect();
    assert_eq!(flags, vec![true, false, true, false, true, false]);
    assert_eq!(messages[0].content, "first");
    assert_eq!(messages[2].content, "second");
    assert_eq!(messages[4].content, "third");
    assert_eq!(messages[5].content, "three");
}

#[tokio::test]
async fn test_failure_keeps_user_message_and_adds_one_error() {
    let generator = FakeGenerator::new(vec![Err(Error::Api {
        status: 503,
        message: "model overloaded".to_string(),
    })]);
    let manager = ChatManager::new(generator, settings());
    let session = manager.create_session("model").await;

    let reply = manager
        .send_message(&session.id, "Hello", vec![])
        .await
        .unwrap()
        .unwrap();
    assert!(reply.content.starts_with("Error: "));
    assert!(reply.content.contains("model overloaded"));

    let messages = manager.session(&session.id).await.unwrap().messages;
    assert_eq!(messages.len(), 2);
    assert!(messages[0].is_user);
    assert_eq!(messages[0].content, "Hello");
    assert!(!messages[1].is_user);
    assert_eq!(messages[1].content, reply.content);
}

#[tokio::test]
async fn test_first_turn_carries_instructions_only_once() {
    let generator = FakeGenerator::new(vec![]);
    let manager = ChatManager::new(generator.clone(), settings());
    let session = manager.create_session("model").await;

    manager.send_message(&session.id, "one", vec![]).await.unwrap();
    manager.send_message(&session.id, "two", vec![]).await.unwrap();

    let requests = generator.requests();
    let first = &requests[0].1;
    assert_eq!(first.contents.len(), 2);
    assert_eq!(first.contents[0].role.as_deref(), Some("model"));
    assert_eq!(first.contents[0].parts, vec![Part::text("Be helpful.")]);
    assert_eq!(first.contents[1].role.as_deref(), Some("user"));

    let second = &requests[1].1;
    let roles: Vec<_> = second
        .contents
        .iter()
        .map(|c| c.role.clone().unwrap())
        .collect();
    assert_eq!(roles, vec!["user", "model", "user"]);
    assert_eq!(second.contents[0].parts, vec![Part::text("one")]);
    assert_eq!(second.contents[1].parts, vec![Part::text("default reply")]);
    assert_eq!(second.contents[2].parts, vec![Part::text("two")]);
}

#[tokio::test]
async fn test_image_models_request_image_output() {
    let generator = FakeGenerator::new(vec![]);
    let manager = ChatManager::new(generator.clone(), settings());

    let text_session = manager.create_session("gemini-2.0-flash").await;
    manager.send_message(&text_session.id, "hi", vec![]).await.unwrap();

    let image_session = manager
        .create_session("gemini-2.0-flash-preview-Image-generation")
        .await;
    manager.send_message(&image_session.id, "draw", vec![]).await.unwrap();

    let requests = generator.requests();
    assert_eq!(
        requests[0].1.generation_config.response_modalities,
        vec![Modality::Text]
    );
    assert_eq!(
        requests[1].1.generation_config.response_modalities,
        vec![Modality::Text, Modality::Image]
    );
    assert_eq!(requests[1].1.generation_config.max_output_tokens, 1024);
}

#[tokio::test]
async fn test_inline_images_in_reply_are_kept() {
    let response: GenerateContentResponse = serde_json::from_value(json!({
        "candidates": [{ "content": { "parts": [
            { "text": "Here is " },
            { "inlineData": { "mimeType": "image/png", "data": "AAAA" } },
            { "text": "your chart" }
        ] } }]
    }))
    .unwrap();
    let manager = ChatManager::new(FakeGenerator::new(vec![Ok(response)]), settings());
    let session = manager.create_session("image-model").await;

    let reply = manager
        .send_message(&session.id, "chart please", vec![])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reply.content, "Here is your chart");
    assert_eq!(reply.images, vec!["data:image/png;base64,AAAA".to_string()]);
}

#[tokio::test]
async fn test_concurrent_turns_on_one_session_do_not_interleave() {
    let generator = FakeGenerator::new(vec![Ok(text_response("a1")), Ok(text_response("a2"))]);
    let manager = ChatManager::new(generator, settings());
    let session = manager.create_session("model").await;

    let (first, second) = tokio::join!(
        manager.send_message(&session.id, "u1", vec![]),
        manager.send_message(&session.id, "u2", vec![]),
    );
    first.unwrap();
    second.unwrap();

    let contents: Vec<String> = manager
        .session(&session.id)
        .await
        .unwrap()
        .messages
        .into_iter()
        .map(|m| m.content)
        .collect();
    assert_eq!(contents, vec!["u1", "a1", "u2", "a2"]);
}

#[tokio::test]
async fn test_rename_and_select_model() {
    let generator = FakeGenerator::new(vec![]);
    let manager = ChatManager::new(generator.clone(), settings());
    let session = manager.create_session("model-a").await;

    manager.rename_session(&session.id, "Resume help").await.unwrap();
    manager.select_model(&session.id, "model-b").await.unwrap();
    manager.send_message(&session.id, "hi", vec![]).await.unwrap();

    let updated = manager.session(&session.id).await.unwrap();
    assert_eq!(updated.name, "Resume help");
    assert_eq!(updated.selected_model, "model-b");
    assert_eq!(generator.requests()[0].0, "model-b");

    manager.rename_session(&session.id, "  ").await.unwrap();
    let updated = manager.session(&session.id).await.unwrap();
    assert_eq!(updated.name, format!("Chat {}", &session.id[..6]));

    assert!(manager.rename_session("missing", "x").await.is_err());
}

#[tokio::test]
async fn test_restored_session_continues_history() {
    let generator = FakeGenerator::new(vec![]);
    let first = ChatManager::new(generator.clone(), settings());
    let session = first.create_session("model").await;
    first.send_message(&session.id, "earlier", vec![]).await.unwrap();
    let saved = first.session(&session.id).await.unwrap();

    let second = ChatManager::new(generator.clone(), settings());
    second.restore_session(saved).await;
    assert_eq!(second.active_session_id().await, Some(session.id.clone()));

    second.send_message(&session.id, "later", vec![]).await.unwrap();
    let request = &generator.requests()[1].1;
    // no instruction turn once there is history
    assert_eq!(request.contents.len(), 3);
    assert_eq!(request.contents[0].parts, vec![Part::text("earlier")]);
}

#[tokio::test]
async fn test_attachment_only_turn_is_sent() {
    let generator = FakeGenerator::new(vec![]);
    let manager = ChatManager::new(generator.clone(), settings());
    let session = manager.create_session("model").await;

    let upload = FileUpload::new("notes.txt", "text/plain", b"hello".to_vec());
    let reply = manager.send_message(&session.id, "", vec![upload]).await.unwrap();
    assert!(reply.is_some());

    let messages = manager.session(&session.id).await.unwrap().messages;
    assert_eq!(messages[0].attachments.len(), 1);
    assert_eq!(messages[0].attachments[0].name, "notes.txt");
    assert!(messages[0].attachments[0].data.is_none());
    assert_eq!(generator.requests().len(), 1);
}
