use uuid::Uuid;

use crate::api::error;
use crate::modules::room::model::{InsertRoom, RoomMemberRow, UpdateRoom};
use crate::modules::room::schema::{RoomEntity, RoomMemberEntity, RoomRole};

#[async_trait::async_trait]
pub trait RoomRepository {
    /// Inserts the room and its owner membership in one transaction.
    async fn create_room(&self, room: &InsertRoom) -> Result<RoomEntity, error::SystemError>;

    async fn find_by_id(&self, room_id: &Uuid) -> Result<Option<RoomEntity>, error::SystemError>;

    async fn update_room(
        &self,
        room_id: &Uuid,
        update: &UpdateRoom,
    ) -> Result<RoomEntity, error::SystemError>;

    async fn delete_room(&self, room_id: &Uuid) -> Result<bool, error::SystemError>;

    async fn list_rooms_for_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<RoomEntity>, error::SystemError>;

    /// Conditionally inserts a membership: the insert only happens while the
    /// room holds fewer than `max_members` members, in the same statement
    /// that counts them. Returns `None` when the room is full; a duplicate
    /// (room, user) pair surfaces as a Conflict from the unique constraint.
    async fn add_member(
        &self,
        room_id: &Uuid,
        user_id: &Uuid,
        role: RoomRole,
        max_members: i32,
    ) -> Result<Option<RoomMemberEntity>, error::SystemError>;

    /// Returns false when no membership row existed.
    async fn remove_member(
        &self,
        room_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<bool, error::SystemError>;

    /// Returns false when no membership row existed.
    async fn update_role(
        &self,
        room_id: &Uuid,
        user_id: &Uuid,
        role: RoomRole,
    ) -> Result<bool, error::SystemError>;

    async fn find_member(
        &self,
        room_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Option<RoomMemberEntity>, error::SystemError>;

    async fn list_members(
        &self,
        room_id: &Uuid,
    ) -> Result<Vec<RoomMemberRow>, error::SystemError>;

    async fn count_members(&self, room_id: &Uuid) -> Result<i64, error::SystemError>;

    async fn set_muted(
        &self,
        room_id: &Uuid,
        user_id: &Uuid,
        muted: bool,
    ) -> Result<bool, error::SystemError>;

    async fn mark_read(&self, room_id: &Uuid, user_id: &Uuid)
        -> Result<bool, error::SystemError>;
}
