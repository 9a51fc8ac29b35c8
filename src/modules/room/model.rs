use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::modules::room::schema::RoomRole;
use crate::modules::user::schema::UserStatus;
use crate::utils::double_option;

#[derive(Deserialize, Validate)]
pub struct CreateRoomBody {
    #[validate(length(min = 1, max = 100, message = "Room name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
    #[validate(range(min = 2, message = "A room needs at least 2 seats"))]
    pub max_members: i32,
    #[serde(default)]
    pub is_private: bool,
}

#[derive(Deserialize, Validate)]
pub struct UpdateRoomBody {
    #[validate(length(min = 1, max = 100, message = "Room name must be 1-100 characters"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[validate(range(min = 2, message = "A room needs at least 2 seats"))]
    pub max_members: Option<i32>,
}

#[derive(Deserialize, Validate)]
pub struct InviteMemberBody {
    pub user_id: Uuid,
}

#[derive(Deserialize, Validate)]
pub struct UpdateMemberRoleBody {
    pub role: RoomRole,
}

#[derive(Deserialize, Validate)]
pub struct SetMutedBody {
    pub is_muted: bool,
}

pub struct InsertRoom {
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub max_members: i32,
    pub is_private: bool,
}

pub struct UpdateRoom {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub max_members: Option<i32>,
}

/// One row of the member list: membership joined with user identity,
/// ordered owner first, then admins, then members.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RoomMemberRow {
    pub user_id: Uuid,
    pub username: String,
    pub display_name: String,
    pub status: UserStatus,
    pub avatar_url: Option<String>,
    pub role: RoomRole,
    pub is_muted: bool,
    pub joined_at: chrono::DateTime<chrono::Utc>,
}
