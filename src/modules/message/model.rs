use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::modules::message::schema::MessageType;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageBody {
    pub recipient_id: Uuid,
    #[validate(length(min = 1, max = 4000, message = "Message must be 1-4000 characters"))]
    pub content: String,
    #[serde(rename = "type")]
    pub _type: Option<MessageType>,
}

#[derive(Deserialize, Validate)]
pub struct PageQuery {
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
    #[validate(range(min = 0))]
    pub offset: Option<i64>,
}

pub struct InsertDirectMessage {
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
    pub _type: MessageType,
}

/// One entry of the derived conversation list: the counterparty, the latest
/// message still visible to the viewer, and how many of the counterparty's
/// messages the viewer has not read yet.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ConversationRow {
    pub counterparty_id: Uuid,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub last_message_id: Uuid,
    pub last_sender_id: Uuid,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub _type: MessageType,
    pub content: String,
    pub is_read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub unread_count: i64,
}

#[derive(Serialize)]
pub struct UnreadCountResponse {
    pub unread: i64,
}
