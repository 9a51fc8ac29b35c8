use std::sync::Arc;
use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        room::{
            model::{InsertRoom, RoomMemberRow, UpdateRoom},
            repository::RoomRepository,
            schema::{RoomEntity, RoomMemberEntity, RoomRole},
        },
        user::repository::UserRepository,
    },
};

/// Membership rules enforced here, on top of the repository primitives:
/// capacity and uniqueness come from the store's constraints, the moderation
/// hierarchy (owner > admin > member) is decided before any write.
#[derive(Clone)]
pub struct RoomService<R, U>
where
    R: RoomRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    room_repo: Arc<R>,
    user_repo: Arc<U>,
}

impl<R, U> RoomService<R, U>
where
    R: RoomRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    pub fn with_dependencies(room_repo: Arc<R>, user_repo: Arc<U>) -> Self {
        RoomService { room_repo, user_repo }
    }

    pub async fn create_room(
        &self,
        owner_id: Uuid,
        name: String,
        description: Option<String>,
        max_members: i32,
        is_private: bool,
    ) -> Result<RoomEntity, error::SystemError> {
        if max_members < 2 {
            return Err(error::SystemError::bad_request("A room needs at least 2 seats"));
        }

        let room = self
            .room_repo
            .create_room(&InsertRoom { name, description, owner_id, max_members, is_private })
            .await?;

        Ok(room)
    }

    pub async fn get_room(&self, room_id: Uuid) -> Result<RoomEntity, error::SystemError> {
        self.room_repo
            .find_by_id(&room_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Room not found"))
    }

    pub async fn list_my_rooms(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<RoomEntity>, error::SystemError> {
        self.room_repo.list_rooms_for_user(&user_id).await
    }

    pub async fn list_members(
        &self,
        room_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<RoomMemberRow>, error::SystemError> {
        self.get_room(room_id).await?;
        self.require_membership(room_id, user_id).await?;
        self.room_repo.list_members(&room_id).await
    }

    /// Self-join into a public room. Private rooms are invite-only.
    pub async fn join_room(
        &self,
        room_id: Uuid,
        user_id: Uuid,
    ) -> Result<RoomMemberEntity, error::SystemError> {
        let room = self.get_room(room_id).await?;

        if room.is_private {
            return Err(error::SystemError::forbidden("This room is invite-only"));
        }

        self.insert_member(&room, user_id).await
    }

    pub async fn invite_member(
        &self,
        room_id: Uuid,
        actor_id: Uuid,
        target_id: Uuid,
    ) -> Result<RoomMemberEntity, error::SystemError> {
        let room = self.get_room(room_id).await?;

        let actor = self.require_membership(room_id, actor_id).await?;
        if !actor.role.can_moderate() {
            return Err(error::SystemError::forbidden("Only the owner or admins may invite"));
        }

        if self.user_repo.find_by_id(&target_id).await?.is_none() {
            return Err(error::SystemError::not_found("User not found"));
        }

        self.insert_member(&room, target_id).await
    }

    pub async fn leave_room(&self, room_id: Uuid, user_id: Uuid) -> Result<(), error::SystemError> {
        let member = self.require_membership(room_id, user_id).await?;

        if member.role == RoomRole::Owner {
            return Err(error::SystemError::forbidden(
                "The owner cannot leave the room; delete it instead",
            ));
        }

        if !self.room_repo.remove_member(&room_id, &user_id).await? {
            return Err(error::SystemError::not_found("Not a member of this room"));
        }

        Ok(())
    }

    pub async fn kick_member(
        &self,
        room_id: Uuid,
        actor_id: Uuid,
        target_id: Uuid,
    ) -> Result<(), error::SystemError> {
        if actor_id == target_id {
            return Err(error::SystemError::bad_request("Leave the room instead"));
        }

        self.get_room(room_id).await?;

        let actor = self.require_membership(room_id, actor_id).await?;
        let target = self
            .room_repo
            .find_member(&room_id, &target_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Not a member of this room"))?;

        if !actor.role.can_kick(target.role) {
            return Err(error::SystemError::forbidden(
                "You do not have permission to kick this member",
            ));
        }

        if !self.room_repo.remove_member(&room_id, &target_id).await? {
            return Err(error::SystemError::not_found("Not a member of this room"));
        }

        Ok(())
    }

    pub async fn update_member_role(
        &self,
        room_id: Uuid,
        actor_id: Uuid,
        target_id: Uuid,
        new_role: RoomRole,
    ) -> Result<(), error::SystemError> {
        self.get_room(room_id).await?;

        let actor = self.require_membership(room_id, actor_id).await?;
        if !actor.role.can_assign_roles() {
            return Err(error::SystemError::forbidden("Only the owner may change roles"));
        }

        // ownership never moves through a role update
        if new_role == RoomRole::Owner {
            return Err(error::SystemError::bad_request("Ownership cannot be assigned"));
        }

        let target = self
            .room_repo
            .find_member(&room_id, &target_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Not a member of this room"))?;

        if target.role == RoomRole::Owner {
            return Err(error::SystemError::bad_request("The owner role cannot be changed"));
        }

        if !self.room_repo.update_role(&room_id, &target_id, new_role).await? {
            return Err(error::SystemError::not_found("Not a member of this room"));
        }

        Ok(())
    }

    pub async fn update_room(
        &self,
        room_id: Uuid,
        actor_id: Uuid,
        update: UpdateRoom,
    ) -> Result<RoomEntity, error::SystemError> {
        self.get_room(room_id).await?;

        let actor = self.require_membership(room_id, actor_id).await?;
        if !actor.role.can_moderate() {
            return Err(error::SystemError::forbidden(
                "Only the owner or admins may update room settings",
            ));
        }

        if let Some(max_members) = update.max_members {
            if max_members < 2 {
                return Err(error::SystemError::bad_request("A room needs at least 2 seats"));
            }
            let current = self.room_repo.count_members(&room_id).await?;
            if (max_members as i64) < current {
                return Err(error::SystemError::conflict(
                    "Room capacity cannot be lower than the current member count",
                ));
            }
        }

        self.room_repo.update_room(&room_id, &update).await
    }

    pub async fn delete_room(&self, room_id: Uuid, actor_id: Uuid) -> Result<(), error::SystemError> {
        self.get_room(room_id).await?;

        let actor = self.require_membership(room_id, actor_id).await?;
        if actor.role != RoomRole::Owner {
            return Err(error::SystemError::forbidden("Only the owner may delete the room"));
        }

        if !self.room_repo.delete_room(&room_id).await? {
            return Err(error::SystemError::not_found("Room not found"));
        }

        Ok(())
    }

    pub async fn set_muted(
        &self,
        room_id: Uuid,
        user_id: Uuid,
        muted: bool,
    ) -> Result<(), error::SystemError> {
        if !self.room_repo.set_muted(&room_id, &user_id, muted).await? {
            return Err(error::SystemError::not_found("Not a member of this room"));
        }
        Ok(())
    }

    pub async fn mark_room_read(
        &self,
        room_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), error::SystemError> {
        if !self.room_repo.mark_read(&room_id, &user_id).await? {
            return Err(error::SystemError::not_found("Not a member of this room"));
        }
        Ok(())
    }

    async fn require_membership(
        &self,
        room_id: Uuid,
        user_id: Uuid,
    ) -> Result<RoomMemberEntity, error::SystemError> {
        self.room_repo
            .find_member(&room_id, &user_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Not a member of this room"))
    }

    async fn insert_member(
        &self,
        room: &RoomEntity,
        user_id: Uuid,
    ) -> Result<RoomMemberEntity, error::SystemError> {
        match self.room_repo.add_member(&room.id, &user_id, RoomRole::Member, room.max_members).await
        {
            Ok(Some(member)) => Ok(member),
            Ok(None) => Err(error::SystemError::conflict("Room is full")),
            Err(e) if e.is_conflict() => {
                Err(error::SystemError::conflict("User is already a member of this room"))
            }
            Err(e) => Err(e),
        }
    }
}
