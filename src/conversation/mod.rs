pub mod session;
pub mod store;

pub use session::{ChatSession, SendOutcome};
pub use store::{Conversation, ConversationStore};
