// Chainable builder for CompletionRequest

use super::error::EngineError;
use super::types::{ChatMessage, CompletionRequest, ContentBlock, Role, ToolDefinition};

pub struct RequestBuilder {
    model: String,
    system: Option<String>,
    messages: Vec<ChatMessage>,
    tools: Option<Vec<ToolDefinition>>,
    max_tokens: u32,
    temperature: Option<f32>,
}

impl RequestBuilder {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system: None,
            messages: Vec::new(),
            tools: None,
            max_tokens: 4096,
            temperature: None,
        }
    }

    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn user_text(mut self, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage::user_text(content));
        self
    }

    pub fn message(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn messages(mut self, messages: impl IntoIterator<Item = ChatMessage>) -> Self {
        self.messages.extend(messages);
        self
    }

    pub fn tool_result(
        mut self,
        tool_use_id: impl Into<String>,
        content: impl Into<String>,
        is_error: Option<bool>,
    ) -> Self {
        self.messages.push(ChatMessage {
            role: Role::User,
            content: vec![ContentBlock::ToolResult {
                tool_use_id: tool_use_id.into(),
                content: content.into(),
                is_error,
            }],
        });
        self
    }

    pub fn tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        if !tools.is_empty() {
            self.tools = Some(tools);
        }
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn build(self) -> Result<CompletionRequest, EngineError> {
        if self.messages.is_empty() {
            return Err(EngineError::InvalidRequest(
                "messages cannot be empty".into(),
            ));
        }

        if self.messages.first().map(|m| m.role) != Some(Role::User) {
            return Err(EngineError::InvalidRequest(
                "first message must have user role".into(),
            ));
        }

        Ok(CompletionRequest {
            model: self.model,
            system: self.system,
            messages: self.messages,
            tools: self.tools,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        })
    }
}
