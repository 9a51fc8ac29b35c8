use uuid::Uuid;

use crate::{
    api::error,
    modules::friend::{
        model::{BlockedUserRow, FriendRequestRow, FriendResponse},
        repository::{BlockRepository, FriendshipRepository, RelationshipRepo},
        schema::FriendshipEntity,
    },
};

#[derive(Clone)]
pub struct FriendRepositoryPg {
    pool: sqlx::PgPool,
}

impl FriendRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl FriendshipRepository for FriendRepositoryPg {
    async fn find_edge(
        &self,
        source: &Uuid,
        target: &Uuid,
    ) -> Result<Option<FriendshipEntity>, error::SystemError> {
        let edge = sqlx::query_as::<_, FriendshipEntity>(
            "SELECT * FROM friendships WHERE user_id = $1 AND friend_id = $2",
        )
        .bind(source)
        .bind(target)
        .fetch_optional(&self.pool)
        .await?;

        Ok(edge)
    }

    async fn create_request(
        &self,
        source: &Uuid,
        target: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let rows = sqlx::query(
            r#"
            INSERT INTO friendships (user_id, friend_id, status)
            VALUES ($1, $2, 'pending')
            ON CONFLICT (user_id, friend_id) DO NOTHING
            "#,
        )
        .bind(source)
        .bind(target)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows > 0)
    }

    async fn reject_request(
        &self,
        source: &Uuid,
        target: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let rows = sqlx::query(
            r#"
            UPDATE friendships
            SET status = 'rejected', updated_at = NOW()
            WHERE user_id = $1 AND friend_id = $2 AND status = 'pending'
            "#,
        )
        .bind(source)
        .bind(target)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows > 0)
    }

    async fn delete_edges(&self, a: &Uuid, b: &Uuid) -> Result<u64, error::SystemError> {
        let rows = sqlx::query(
            r#"
            DELETE FROM friendships
            WHERE (user_id = $1 AND friend_id = $2)
               OR (user_id = $2 AND friend_id = $1)
            "#,
        )
        .bind(a)
        .bind(b)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows)
    }

    async fn are_friends(&self, a: &Uuid, b: &Uuid) -> Result<bool, error::SystemError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM friendships
                WHERE user_id = $1 AND friend_id = $2 AND status = 'accepted'
            )
            "#,
        )
        .bind(a)
        .bind(b)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn list_friends(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendResponse>, error::SystemError> {
        let friends = sqlx::query_as::<_, FriendResponse>(
            r#"
            SELECT u.id, u.username, u.display_name, u.status, u.avatar_url
            FROM friendships f
            JOIN users u ON u.id = f.friend_id
            WHERE f.user_id = $1 AND f.status = 'accepted' AND u.deleted_at IS NULL
            ORDER BY u.display_name
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(friends)
    }

    async fn list_incoming_requests(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendRequestRow>, error::SystemError> {
        let requests = sqlx::query_as::<_, FriendRequestRow>(
            r#"
            SELECT u.id AS user_id, u.username, u.display_name, u.avatar_url, f.created_at
            FROM friendships f
            JOIN users u ON u.id = f.user_id
            WHERE f.friend_id = $1 AND f.status = 'pending' AND u.deleted_at IS NULL
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    async fn list_outgoing_requests(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendRequestRow>, error::SystemError> {
        let requests = sqlx::query_as::<_, FriendRequestRow>(
            r#"
            SELECT u.id AS user_id, u.username, u.display_name, u.avatar_url, f.created_at
            FROM friendships f
            JOIN users u ON u.id = f.friend_id
            WHERE f.user_id = $1 AND f.status = 'pending' AND u.deleted_at IS NULL
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }
}

#[async_trait::async_trait]
impl BlockRepository for FriendRepositoryPg {
    async fn create_block(
        &self,
        blocker: &Uuid,
        blocked: &Uuid,
    ) -> Result<(), error::SystemError> {
        sqlx::query("INSERT INTO blocked_users (blocker_id, blocked_id) VALUES ($1, $2)")
            .bind(blocker)
            .bind(blocked)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_block(
        &self,
        blocker: &Uuid,
        blocked: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let rows = sqlx::query(
            "DELETE FROM blocked_users WHERE blocker_id = $1 AND blocked_id = $2",
        )
        .bind(blocker)
        .bind(blocked)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows > 0)
    }

    async fn is_blocked_either(&self, a: &Uuid, b: &Uuid) -> Result<bool, error::SystemError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM blocked_users
                WHERE (blocker_id = $1 AND blocked_id = $2)
                   OR (blocker_id = $2 AND blocked_id = $1)
            )
            "#,
        )
        .bind(a)
        .bind(b)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn list_blocked(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<BlockedUserRow>, error::SystemError> {
        let blocked = sqlx::query_as::<_, BlockedUserRow>(
            r#"
            SELECT u.id, u.username, u.display_name, u.avatar_url, b.created_at
            FROM blocked_users b
            JOIN users u ON u.id = b.blocked_id
            WHERE b.blocker_id = $1
            ORDER BY b.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(blocked)
    }
}

#[async_trait::async_trait]
impl RelationshipRepo for FriendRepositoryPg {
    async fn accept_request_atomic(
        &self,
        source: &Uuid,
        target: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE friendships
            SET status = 'accepted', updated_at = NOW()
            WHERE user_id = $1 AND friend_id = $2 AND status = 'pending'
            "#,
        )
        .bind(source)
        .bind(target)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if updated == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        // the mirror edge may already exist as a crossed request from the
        // accepting side; the upsert resolves both edges to accepted
        sqlx::query(
            r#"
            INSERT INTO friendships (user_id, friend_id, status)
            VALUES ($1, $2, 'accepted')
            ON CONFLICT (user_id, friend_id)
            DO UPDATE SET status = 'accepted', updated_at = NOW()
            "#,
        )
        .bind(target)
        .bind(source)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(true)
    }
}