use std::sync::Arc;

use log::debug;
use serde_json::Value;

use super::{CompletionRequest, GenerationError, GenerationService};
use crate::config::AppConfig;
use crate::language::{prompt_for, select_language, LanguageTag};
use crate::web::models::{Message, Role};

#[derive(Debug, Clone, PartialEq)]
pub struct RelayReply {
    pub reply: String,
    pub language: LanguageTag,
    pub usage: Value,
}

/// Forwards one user turn, with its history, to the generation service.
///
/// Holds no per-conversation state; a single instance serves every request.
#[derive(Clone)]
pub struct ConversationRelay {
    service: Arc<dyn GenerationService>,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl ConversationRelay {
    pub fn new(service: Arc<dyn GenerationService>, config: &AppConfig) -> Self {
        Self {
            service,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    /// System prompt first, then history in order, then the new user turn.
    /// System entries smuggled into the history are dropped.
    pub fn build_messages(prompt: &str, history: &[Message], user_message: &str) -> Vec<Message> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(Message::new(Role::System, prompt));
        messages.extend(
            history
                .iter()
                .filter(|message| message.role != Role::System)
                .cloned(),
        );
        messages.push(Message::new(Role::User, user_message));
        messages
    }

    pub async fn relay(
        &self,
        user_message: &str,
        history: &[Message],
        explicit_language: Option<&str>,
    ) -> Result<RelayReply, GenerationError> {
        let language = select_language(user_message, explicit_language);
        debug!("Resolved reply language: {}", language.display_name());

        let request = CompletionRequest {
            model: self.model.clone(),
            messages: Self::build_messages(prompt_for(language), history, user_message),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let completion = self.service.complete(&request).await?;

        Ok(RelayReply {
            reply: completion.content,
            language,
            usage: completion.usage,
        })
    }
}
