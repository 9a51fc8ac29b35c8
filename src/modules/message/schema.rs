use serde::{Deserialize, Serialize};
use sqlx::prelude::{FromRow, Type};
use uuid::Uuid;

#[derive(Debug, PartialEq, Clone, Copy, Type, Serialize, Deserialize)]
#[sqlx(type_name = "message_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Text,
    Image,
    File,
}

/// Which side of a message a given user is on. Soft deletion is tracked per
/// side, so each participant's view is independent of the other's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSide {
    Sender,
    Receiver,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DirectMessageEntity {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub _type: MessageType,
    pub content: String,
    pub is_read: bool,
    pub deleted_by_sender: bool,
    pub deleted_by_receiver: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl DirectMessageEntity {
    pub fn side_of(&self, user_id: &Uuid) -> Option<MessageSide> {
        if self.sender_id == *user_id {
            Some(MessageSide::Sender)
        } else if self.receiver_id == *user_id {
            Some(MessageSide::Receiver)
        } else {
            None
        }
    }

    /// A message stays visible to a participant until that participant
    /// deletes it; the row itself is never destroyed.
    pub fn visible_to(&self, user_id: &Uuid) -> bool {
        match self.side_of(user_id) {
            Some(MessageSide::Sender) => !self.deleted_by_sender,
            Some(MessageSide::Receiver) => !self.deleted_by_receiver,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(sender: Uuid, receiver: Uuid) -> DirectMessageEntity {
        DirectMessageEntity {
            id: Uuid::now_v7(),
            sender_id: sender,
            receiver_id: receiver,
            _type: MessageType::Text,
            content: "hi".into(),
            is_read: false,
            deleted_by_sender: false,
            deleted_by_receiver: false,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn deletion_flags_are_per_side() {
        let (a, b) = (Uuid::now_v7(), Uuid::now_v7());
        let mut msg = message(a, b);

        assert!(msg.visible_to(&a));
        assert!(msg.visible_to(&b));

        msg.deleted_by_receiver = true;
        assert!(msg.visible_to(&a));
        assert!(!msg.visible_to(&b));

        msg.deleted_by_sender = true;
        assert!(!msg.visible_to(&a));
        assert!(!msg.visible_to(&b));
    }

    #[test]
    fn outsiders_never_see_a_message() {
        let msg = message(Uuid::now_v7(), Uuid::now_v7());
        let stranger = Uuid::now_v7();
        assert_eq!(msg.side_of(&stranger), None);
        assert!(!msg.visible_to(&stranger));
    }
}
