use crate::models::ChatTurn;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

/// Body of `POST /api/chat`: the full history, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(min_items = 1)]
    pub messages: Vec<ChatTurn>,
}
