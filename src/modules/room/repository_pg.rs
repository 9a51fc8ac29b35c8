use uuid::Uuid;

use crate::{
    api::error,
    modules::room::{
        model::{InsertRoom, RoomMemberRow, UpdateRoom},
        repository::RoomRepository,
        schema::{RoomEntity, RoomMemberEntity, RoomRole},
    },
};

#[derive(Clone)]
pub struct RoomRepositoryPg {
    pool: sqlx::PgPool,
}

impl RoomRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl RoomRepository for RoomRepositoryPg {
    async fn create_room(&self, room: &InsertRoom) -> Result<RoomEntity, error::SystemError> {
        let mut tx = self.pool.begin().await?;

        let id = Uuid::now_v7();
        let entity = sqlx::query_as::<_, RoomEntity>(
            r#"
            INSERT INTO rooms (id, name, description, owner_id, max_members, is_private)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&room.name)
        .bind(&room.description)
        .bind(room.owner_id)
        .bind(room.max_members)
        .bind(room.is_private)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO room_members (room_id, user_id, role) VALUES ($1, $2, 'owner')")
            .bind(id)
            .bind(room.owner_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(entity)
    }

    async fn find_by_id(&self, room_id: &Uuid) -> Result<Option<RoomEntity>, error::SystemError> {
        let room = sqlx::query_as::<_, RoomEntity>("SELECT * FROM rooms WHERE id = $1")
            .bind(room_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(room)
    }

    async fn update_room(
        &self,
        room_id: &Uuid,
        update: &UpdateRoom,
    ) -> Result<RoomEntity, error::SystemError> {
        let room = sqlx::query_as::<_, RoomEntity>(
            r#"
            UPDATE rooms
            SET
                name        = COALESCE($2, name),
                description = CASE WHEN $3::boolean THEN $4 ELSE description END,
                max_members = COALESCE($5, max_members),
                updated_at  = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(room_id)
        .bind(&update.name)
        .bind(update.description.is_some())
        .bind(update.description.as_ref().and_then(|v| v.as_ref()))
        .bind(update.max_members)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| error::SystemError::not_found("Room not found"))?;

        Ok(room)
    }

    async fn delete_room(&self, room_id: &Uuid) -> Result<bool, error::SystemError> {
        // memberships go with the room via ON DELETE CASCADE
        let rows = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(room_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows > 0)
    }

    async fn list_rooms_for_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<RoomEntity>, error::SystemError> {
        let rooms = sqlx::query_as::<_, RoomEntity>(
            r#"
            SELECT r.*
            FROM rooms r
            JOIN room_members rm ON rm.room_id = r.id
            WHERE rm.user_id = $1
            ORDER BY rm.joined_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rooms)
    }

    async fn add_member(
        &self,
        room_id: &Uuid,
        user_id: &Uuid,
        role: RoomRole,
        max_members: i32,
    ) -> Result<Option<RoomMemberEntity>, error::SystemError> {
        // capacity check and insert in a single statement, so concurrent
        // joins can never overshoot max_members
        let member = sqlx::query_as::<_, RoomMemberEntity>(
            r#"
            INSERT INTO room_members (room_id, user_id, role)
            SELECT $1, $2, $3
            WHERE (SELECT COUNT(*) FROM room_members WHERE room_id = $1) < $4
            RETURNING *
            "#,
        )
        .bind(room_id)
        .bind(user_id)
        .bind(role)
        .bind(max_members)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    async fn remove_member(
        &self,
        room_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let rows = sqlx::query("DELETE FROM room_members WHERE room_id = $1 AND user_id = $2")
            .bind(room_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows > 0)
    }

    async fn update_role(
        &self,
        room_id: &Uuid,
        user_id: &Uuid,
        role: RoomRole,
    ) -> Result<bool, error::SystemError> {
        let rows =
            sqlx::query("UPDATE room_members SET role = $3 WHERE room_id = $1 AND user_id = $2")
                .bind(room_id)
                .bind(user_id)
                .bind(role)
                .execute(&self.pool)
                .await?
                .rows_affected();

        Ok(rows > 0)
    }

    async fn find_member(
        &self,
        room_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Option<RoomMemberEntity>, error::SystemError> {
        let member = sqlx::query_as::<_, RoomMemberEntity>(
            "SELECT * FROM room_members WHERE room_id = $1 AND user_id = $2",
        )
        .bind(room_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    async fn list_members(
        &self,
        room_id: &Uuid,
    ) -> Result<Vec<RoomMemberRow>, error::SystemError> {
        let members = sqlx::query_as::<_, RoomMemberRow>(
            r#"
            SELECT
                rm.user_id,
                u.username,
                u.display_name,
                u.status,
                u.avatar_url,
                rm.role,
                rm.is_muted,
                rm.joined_at
            FROM room_members rm
            JOIN users u ON u.id = rm.user_id
            WHERE rm.room_id = $1
            ORDER BY
                CASE rm.role WHEN 'owner' THEN 0 WHEN 'admin' THEN 1 ELSE 2 END,
                rm.joined_at
            "#,
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    async fn count_members(&self, room_id: &Uuid) -> Result<i64, error::SystemError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM room_members WHERE room_id = $1")
                .bind(room_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn set_muted(
        &self,
        room_id: &Uuid,
        user_id: &Uuid,
        muted: bool,
    ) -> Result<bool, error::SystemError> {
        let rows = sqlx::query(
            "UPDATE room_members SET is_muted = $3 WHERE room_id = $1 AND user_id = $2",
        )
        .bind(room_id)
        .bind(user_id)
        .bind(muted)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows > 0)
    }

    async fn mark_read(
        &self,
        room_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let rows = sqlx::query(
            "UPDATE room_members SET last_read_at = NOW() WHERE room_id = $1 AND user_id = $2",
        )
        .bind(room_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows > 0)
    }
}
