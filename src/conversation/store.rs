use crate::models::{ChatTurn, Message};

/// Read-only copy of a conversation, handed to whatever renders it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conversation {
    pub messages: Vec<Message>,
    pub is_loading: bool,
    pub last_error: Option<String>,
}

/// Append-only message log plus the in-flight and last-error flags.
///
/// `is_loading` is the only admission gate: while it is set no new user
/// message is accepted, so a turn always completes (assistant message or
/// error) before the next one starts.
#[derive(Debug, Default)]
pub struct ConversationStore {
    messages: Vec<Message>,
    is_loading: bool,
    last_error: Option<String>,
    epoch: u64,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Bumped by `clear`; an outcome belonging to an older epoch must be dropped.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// `{role, content}` projection of the whole log, in insertion order.
    pub fn history(&self) -> Vec<ChatTurn> {
        self.messages.iter().map(ChatTurn::from).collect()
    }

    pub fn snapshot(&self) -> Conversation {
        Conversation {
            messages: self.messages.clone(),
            is_loading: self.is_loading,
            last_error: self.last_error.clone(),
        }
    }

    /// Returns `None` (and changes nothing) for blank text or while a turn is in flight.
    pub fn append_user_message(&mut self, text: &str) -> Option<&Message> {
        if self.is_loading || text.trim().is_empty() {
            return None;
        }

        self.messages.push(Message::user(text));
        self.is_loading = true;
        self.last_error = None;
        self.messages.last()
    }

    pub fn append_assistant_message(&mut self, text: &str) -> Option<&Message> {
        if !self.is_loading {
            tracing::debug!("Ignoring assistant message outside of a pending turn");
            return None;
        }

        self.messages.push(Message::assistant(text));
        self.is_loading = false;
        self.messages.last()
    }

    /// Ends the pending turn without appending anything.
    pub fn fail_exchange(&mut self, error_description: &str) {
        if !self.is_loading {
            tracing::debug!("Ignoring exchange failure outside of a pending turn");
            return;
        }

        self.last_error = Some(error_description.to_string());
        self.is_loading = false;
    }

    /// Empties the log. A turn still in flight is abandoned: its outcome
    /// carries the old epoch and will not be applied.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.last_error = None;
        self.is_loading = false;
        self.epoch += 1;
    }
}
