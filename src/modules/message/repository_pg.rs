use uuid::Uuid;

use crate::{
    api::error,
    modules::message::{
        model::{ConversationRow, InsertDirectMessage},
        repository::MessageRepository,
        schema::{DirectMessageEntity, MessageSide},
    },
};

#[derive(Clone)]
pub struct MessageRepositoryPg {
    pool: sqlx::PgPool,
}

impl MessageRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl MessageRepository for MessageRepositoryPg {
    async fn create(
        &self,
        message: &InsertDirectMessage,
    ) -> Result<DirectMessageEntity, error::SystemError> {
        let id = Uuid::now_v7();
        let message = sqlx::query_as::<_, DirectMessageEntity>(
            r#"
            INSERT INTO direct_messages (id, sender_id, receiver_id, type, content)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(message.sender_id)
        .bind(message.receiver_id)
        .bind(message._type)
        .bind(&message.content)
        .fetch_one(&self.pool)
        .await?;

        Ok(message)
    }

    async fn find_by_id(
        &self,
        message_id: &Uuid,
    ) -> Result<Option<DirectMessageEntity>, error::SystemError> {
        let message = sqlx::query_as::<_, DirectMessageEntity>(
            "SELECT * FROM direct_messages WHERE id = $1",
        )
        .bind(message_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(message)
    }

    async fn list_between(
        &self,
        viewer: &Uuid,
        counterparty: &Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<DirectMessageEntity>, error::SystemError> {
        // the deletion flag checked is the one for the viewer's side of
        // each direction
        let messages = sqlx::query_as::<_, DirectMessageEntity>(
            r#"
            SELECT *
            FROM direct_messages
            WHERE (sender_id = $1 AND receiver_id = $2 AND deleted_by_sender = FALSE)
               OR (sender_id = $2 AND receiver_id = $1 AND deleted_by_receiver = FALSE)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(viewer)
        .bind(counterparty)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    async fn list_conversations(
        &self,
        viewer: &Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ConversationRow>, error::SystemError> {
        // grouped on the unordered pair: the counterparty is whichever end
        // of the row is not the viewer, so directional rows never produce
        // two entries for one conversation
        let rows = sqlx::query_as::<_, ConversationRow>(
            r#"
            SELECT
                c.counterparty_id,
                u.username,
                u.display_name,
                u.avatar_url,
                c.id AS last_message_id,
                c.sender_id AS last_sender_id,
                c.type,
                c.content,
                c.is_read,
                c.created_at,
                (
                    SELECT COUNT(*)
                    FROM direct_messages un
                    WHERE un.sender_id = c.counterparty_id
                      AND un.receiver_id = $1
                      AND un.is_read = FALSE
                      AND un.deleted_by_receiver = FALSE
                ) AS unread_count
            FROM (
                SELECT DISTINCT ON (counterparty_id) *
                FROM (
                    SELECT
                        m.id, m.sender_id, m.receiver_id, m.type, m.content,
                        m.is_read, m.created_at,
                        CASE WHEN m.sender_id = $1 THEN m.receiver_id ELSE m.sender_id END
                            AS counterparty_id
                    FROM direct_messages m
                    WHERE (m.sender_id = $1 AND m.deleted_by_sender = FALSE)
                       OR (m.receiver_id = $1 AND m.deleted_by_receiver = FALSE)
                ) v
                ORDER BY counterparty_id, created_at DESC
            ) c
            JOIN users u ON u.id = c.counterparty_id
            ORDER BY c.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(viewer)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn mark_read(
        &self,
        viewer: &Uuid,
        counterparty: &Uuid,
    ) -> Result<u64, error::SystemError> {
        let rows = sqlx::query(
            r#"
            UPDATE direct_messages
            SET is_read = TRUE
            WHERE sender_id = $2 AND receiver_id = $1 AND is_read = FALSE
            "#,
        )
        .bind(viewer)
        .bind(counterparty)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows)
    }

    async fn set_deleted(
        &self,
        message_id: &Uuid,
        side: MessageSide,
    ) -> Result<bool, error::SystemError> {
        let sql = match side {
            MessageSide::Sender => {
                "UPDATE direct_messages SET deleted_by_sender = TRUE WHERE id = $1"
            }
            MessageSide::Receiver => {
                "UPDATE direct_messages SET deleted_by_receiver = TRUE WHERE id = $1"
            }
        };

        let rows = sqlx::query(sql).bind(message_id).execute(&self.pool).await?.rows_affected();

        Ok(rows > 0)
    }

    async fn delete_conversation_for(
        &self,
        viewer: &Uuid,
        counterparty: &Uuid,
    ) -> Result<u64, error::SystemError> {
        let rows = sqlx::query(
            r#"
            UPDATE direct_messages
            SET deleted_by_sender   = deleted_by_sender OR sender_id = $1,
                deleted_by_receiver = deleted_by_receiver OR receiver_id = $1
            WHERE (sender_id = $1 AND receiver_id = $2)
               OR (sender_id = $2 AND receiver_id = $1)
            "#,
        )
        .bind(viewer)
        .bind(counterparty)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows)
    }

    async fn count_unread(&self, viewer: &Uuid) -> Result<i64, error::SystemError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM direct_messages
            WHERE receiver_id = $1 AND is_read = FALSE AND deleted_by_receiver = FALSE
            "#,
        )
        .bind(viewer)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn count_unread_from(
        &self,
        viewer: &Uuid,
        counterparty: &Uuid,
    ) -> Result<i64, error::SystemError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM direct_messages
            WHERE receiver_id = $1 AND sender_id = $2
              AND is_read = FALSE AND deleted_by_receiver = FALSE
            "#,
        )
        .bind(viewer)
        .bind(counterparty)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
