use uuid::Uuid;

use crate::api::error;
use crate::modules::message::model::{ConversationRow, InsertDirectMessage};
use crate::modules::message::schema::{DirectMessageEntity, MessageSide};

#[async_trait::async_trait]
pub trait MessageRepository {
    async fn create(
        &self,
        message: &InsertDirectMessage,
    ) -> Result<DirectMessageEntity, error::SystemError>;

    async fn find_by_id(
        &self,
        message_id: &Uuid,
    ) -> Result<Option<DirectMessageEntity>, error::SystemError>;

    /// Messages between the pair that are visible to `viewer`, most recent
    /// first. Callers reverse the page to present it oldest-first.
    async fn list_between(
        &self,
        viewer: &Uuid,
        counterparty: &Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<DirectMessageEntity>, error::SystemError>;

    /// One row per distinct counterparty, carrying the latest message
    /// visible to the viewer and the viewer's unread count, ordered by that
    /// latest message descending.
    async fn list_conversations(
        &self,
        viewer: &Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ConversationRow>, error::SystemError>;

    /// Marks every unread message from `counterparty` to `viewer` as read.
    /// Returns the number of rows touched; repeat calls are no-ops.
    async fn mark_read(
        &self,
        viewer: &Uuid,
        counterparty: &Uuid,
    ) -> Result<u64, error::SystemError>;

    /// Flips the deletion flag for one side of one message.
    async fn set_deleted(
        &self,
        message_id: &Uuid,
        side: MessageSide,
    ) -> Result<bool, error::SystemError>;

    /// Flips the viewer-side deletion flag on every message of the pair.
    async fn delete_conversation_for(
        &self,
        viewer: &Uuid,
        counterparty: &Uuid,
    ) -> Result<u64, error::SystemError>;

    async fn count_unread(&self, viewer: &Uuid) -> Result<i64, error::SystemError>;

    async fn count_unread_from(
        &self,
        viewer: &Uuid,
        counterparty: &Uuid,
    ) -> Result<i64, error::SystemError>;
}
