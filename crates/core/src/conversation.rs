//! Conversation-related types.

use serde::{Deserialize, Serialize};

/// Who produced a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person typing (or dictating) into the input box.
    User,
    /// The assistant, including its canned rejection and error notices.
    Assistant,
}

/// A single entry in the transcript.
///
/// Messages are immutable once created. The content is plain text or
/// structured markdown, never pre-rendered markup; rendering hosts do
/// their own markdown-to-DOM work.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    id: u64,
    content: String,
    sender: Sender,
}

impl Message {
    /// The message id. Ids are assigned in append order and are strictly
    /// increasing within one conversation.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The message text.
    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Who sent this message.
    #[inline]
    pub fn sender(&self) -> Sender {
        self.sender
    }
}

/// Represents a conversation.
///
/// The log is append-only: no reordering, no removal, no mutation of
/// existing entries. Insertion order is the chat transcript order.
#[derive(Clone, Debug, Default)]
pub struct Conversation {
    messages: Vec<Message>,
    next_id: u64,
}

impl Conversation {
    /// Creates an empty conversation.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message and returns a reference to it.
    pub fn push(&mut self, sender: Sender, content: String) -> &Message {
        self.next_id += 1;
        self.messages.push(Message {
            id: self.next_id,
            content,
            sender,
        });
        self.messages.last().expect("just pushed")
    }

    /// The messages in transcript order.
    #[inline]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The number of messages.
    #[inline]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the conversation has no messages yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
