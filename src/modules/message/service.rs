use std::sync::Arc;
use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        friend::repository::BlockRepository,
        message::{
            model::{ConversationRow, InsertDirectMessage},
            repository::MessageRepository,
            schema::{DirectMessageEntity, MessageType},
        },
        user::repository::UserRepository,
    },
};

/// Direct messages and their derived, per-viewer conversation views. Every
/// send is gated on the block graph; deletion only ever hides a message from
/// the acting participant.
#[derive(Clone)]
pub struct MessageService<M, B, U>
where
    M: MessageRepository + Send + Sync,
    B: BlockRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    message_repo: Arc<M>,
    block_repo: Arc<B>,
    user_repo: Arc<U>,
}

impl<M, B, U> MessageService<M, B, U>
where
    M: MessageRepository + Send + Sync,
    B: BlockRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    pub fn with_dependencies(message_repo: Arc<M>, block_repo: Arc<B>, user_repo: Arc<U>) -> Self {
        MessageService { message_repo, block_repo, user_repo }
    }

    pub async fn send(
        &self,
        sender_id: Uuid,
        recipient_id: Uuid,
        content: String,
        _type: MessageType,
    ) -> Result<DirectMessageEntity, error::SystemError> {
        if sender_id == recipient_id {
            return Err(error::SystemError::bad_request("Cannot send a message to yourself"));
        }

        if self.user_repo.find_by_id(&recipient_id).await?.is_none() {
            return Err(error::SystemError::not_found("Recipient not found"));
        }

        // a block in either direction suppresses the interaction
        if self.block_repo.is_blocked_either(&sender_id, &recipient_id).await? {
            return Err(error::SystemError::forbidden("You cannot message this user"));
        }

        let message = self
            .message_repo
            .create(&InsertDirectMessage {
                sender_id,
                receiver_id: recipient_id,
                content,
                _type,
            })
            .await?;

        Ok(message)
    }

    /// One page of the conversation with `counterparty`, oldest first. The
    /// repository returns the most recent rows; reversing here keeps page
    /// boundaries stable while presenting chronological order.
    pub async fn get_conversation(
        &self,
        viewer: Uuid,
        counterparty: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<DirectMessageEntity>, error::SystemError> {
        let mut messages =
            self.message_repo.list_between(&viewer, &counterparty, limit, offset).await?;

        messages.reverse();
        Ok(messages)
    }

    pub async fn get_conversations(
        &self,
        viewer: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ConversationRow>, error::SystemError> {
        self.message_repo.list_conversations(&viewer, limit, offset).await
    }

    pub async fn mark_conversation_read(
        &self,
        viewer: Uuid,
        counterparty: Uuid,
    ) -> Result<(), error::SystemError> {
        self.message_repo.mark_read(&viewer, &counterparty).await?;
        Ok(())
    }

    /// Hides one message from the acting participant only.
    pub async fn delete_message(
        &self,
        viewer: Uuid,
        message_id: Uuid,
    ) -> Result<(), error::SystemError> {
        let message = self
            .message_repo
            .find_by_id(&message_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Message not found"))?;

        let side = message
            .side_of(&viewer)
            .ok_or_else(|| error::SystemError::forbidden("You are not part of this message"))?;

        self.message_repo.set_deleted(&message_id, side).await?;

        Ok(())
    }

    /// Hides the whole conversation with `counterparty` from the viewer.
    /// The counterparty keeps seeing every message.
    pub async fn delete_conversation(
        &self,
        viewer: Uuid,
        counterparty: Uuid,
    ) -> Result<(), error::SystemError> {
        self.message_repo.delete_conversation_for(&viewer, &counterparty).await?;
        Ok(())
    }

    pub async fn count_unread(&self, viewer: Uuid) -> Result<i64, error::SystemError> {
        self.message_repo.count_unread(&viewer).await
    }

    pub async fn count_unread_from(
        &self,
        viewer: Uuid,
        counterparty: Uuid,
    ) -> Result<i64, error::SystemError> {
        self.message_repo.count_unread_from(&viewer, &counterparty).await
    }
}
