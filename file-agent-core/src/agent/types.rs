use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One structured instruction from the reasoning engine to run a named tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationRequest {
    /// Unique within the assistant message that carries it
    pub id: String,
    pub name: String,
    pub arguments: Value,
}

impl OperationRequest {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Message {
    System {
        text: String,
    },
    User {
        text: String,
    },
    Assistant {
        text: String,
        requests: Vec<OperationRequest>,
    },
    OperationResult {
        request_id: String,
        text: String,
    },
}

impl Message {
    pub fn is_system(&self) -> bool {
        matches!(self, Self::System { .. })
    }
}

/// Ordered conversation history for one run.
///
/// Messages are only ever appended; the single exception is the system
/// instruction, which [`ConversationState::seed_system`] places first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    messages: Vec<Message>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a system instruction unless one is already present.
    ///
    /// Returns whether the instruction was added.
    pub fn seed_system(&mut self, text: impl Into<String>) -> bool {
        if self.messages.iter().any(Message::is_system) {
            return false;
        }
        self.messages.insert(0, Message::System { text: text.into() });
        true
    }

    /// Append a message. A system message goes through [`Self::seed_system`], so a
    /// second one is dropped rather than appended.
    pub fn push(&mut self, message: Message) {
        match message {
            Message::System { text } => {
                self.seed_system(text);
            }
            other => self.messages.push(other),
        }
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.push(Message::User { text: text.into() });
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn operation_results(&self) -> impl Iterator<Item = (&str, &str)> {
        self.messages.iter().filter_map(|message| match message {
            Message::OperationResult { request_id, text } => Some((request_id.as_str(), text.as_str())),
            _ => None,
        })
    }
}

/// What the reasoning engine wants to happen next
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    FinalAnswer(String),
    Requests {
        /// Text the engine produced alongside the requests, often empty
        text: String,
        requests: Vec<OperationRequest>,
    },
}
