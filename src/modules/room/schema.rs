use serde::{Deserialize, Serialize};
use sqlx::prelude::{FromRow, Type};
use uuid::Uuid;

/// Moderation role inside a room. Variant order is the moderation order:
/// member < admin < owner, so authority checks are plain comparisons.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Type, Serialize, Deserialize)]
#[sqlx(type_name = "room_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RoomRole {
    Member,
    Admin,
    Owner,
}

impl RoomRole {
    /// Owners and admins may moderate (kick, invite).
    pub fn can_moderate(&self) -> bool {
        *self >= RoomRole::Admin
    }

    /// An actor may kick a target of strictly lower rank. This encodes the
    /// whole kick table: owners kick admins and members, admins kick members
    /// only, members kick nobody, and the owner is never kickable.
    pub fn can_kick(&self, target: RoomRole) -> bool {
        self.can_moderate() && *self > target
    }

    /// Only the owner may promote, demote, delete the room, or transfer it.
    pub fn can_assign_roles(&self) -> bool {
        matches!(self, RoomRole::Owner)
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RoomEntity {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub max_members: i32,
    pub is_private: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RoomMemberEntity {
    pub room_id: Uuid,
    pub user_id: Uuid,
    pub role: RoomRole,
    pub is_muted: bool,
    pub last_read_at: chrono::DateTime<chrono::Utc>,
    pub joined_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_order_is_member_admin_owner() {
        assert!(RoomRole::Member < RoomRole::Admin);
        assert!(RoomRole::Admin < RoomRole::Owner);
    }

    #[test]
    fn only_owner_and_admin_moderate() {
        assert!(RoomRole::Owner.can_moderate());
        assert!(RoomRole::Admin.can_moderate());
        assert!(!RoomRole::Member.can_moderate());
    }

    #[test]
    fn kick_table_matches_hierarchy() {
        // owner kicks admins and members, never another owner
        assert!(RoomRole::Owner.can_kick(RoomRole::Admin));
        assert!(RoomRole::Owner.can_kick(RoomRole::Member));
        assert!(!RoomRole::Owner.can_kick(RoomRole::Owner));

        // admin kicks members only
        assert!(RoomRole::Admin.can_kick(RoomRole::Member));
        assert!(!RoomRole::Admin.can_kick(RoomRole::Admin));
        assert!(!RoomRole::Admin.can_kick(RoomRole::Owner));

        // member kicks nobody
        assert!(!RoomRole::Member.can_kick(RoomRole::Member));
        assert!(!RoomRole::Member.can_kick(RoomRole::Admin));
        assert!(!RoomRole::Member.can_kick(RoomRole::Owner));
    }

    #[test]
    fn only_owner_assigns_roles() {
        assert!(RoomRole::Owner.can_assign_roles());
        assert!(!RoomRole::Admin.can_assign_roles());
        assert!(!RoomRole::Member.can_assign_roles());
    }
}
