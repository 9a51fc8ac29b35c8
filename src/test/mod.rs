#![allow(dead_code)]

//! In-memory repositories for exercising the services without a database.
//! They mimic the store's behavior at the seams the services rely on:
//! duplicate writes surface as Conflict and the capacity check happens
//! inside `add_member`, the same way the conditional insert does.

use std::cmp::Reverse;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::api::error;
use crate::modules::friend::model::{BlockedUserRow, FriendRequestRow, FriendResponse};
use crate::modules::friend::repository::{BlockRepository, FriendshipRepository, RelationshipRepo};
use crate::modules::friend::schema::{BlockedUserEntity, FriendshipEntity, FriendshipStatus};
use crate::modules::message::model::{ConversationRow, InsertDirectMessage};
use crate::modules::message::repository::MessageRepository;
use crate::modules::message::schema::{DirectMessageEntity, MessageSide};
use crate::modules::room::model::{InsertRoom, RoomMemberRow, UpdateRoom};
use crate::modules::room::repository::RoomRepository;
use crate::modules::room::schema::{RoomEntity, RoomMemberEntity, RoomRole};
use crate::modules::user::model::{InsertUser, UpdateUser};
use crate::modules::user::repository::UserRepository;
use crate::modules::user::schema::{UserEntity, UserRole, UserStatus};

pub fn user_fixture(username: &str) -> UserEntity {
    let now = chrono::Utc::now();
    UserEntity {
        id: Uuid::now_v7(),
        username: username.to_string(),
        email: format!("{username}@example.com"),
        hash_password: "hash".to_string(),
        role: UserRole::User,
        display_name: username.to_string(),
        status: UserStatus::Offline,
        avatar_url: None,
        bio: None,
        deleted_at: None,
        created_at: now,
        updated_at: now,
    }
}

#[derive(Default)]
pub struct MemoryUserRepo {
    users: Mutex<Vec<UserEntity>>,
}

impl MemoryUserRepo {
    pub fn seed(&self, username: &str) -> Uuid {
        let user = user_fixture(username);
        let id = user.id;
        self.users.lock().unwrap().push(user);
        id
    }

    fn get(&self, id: &Uuid) -> Option<UserEntity> {
        self.users.lock().unwrap().iter().find(|u| u.id == *id).cloned()
    }
}

#[async_trait::async_trait]
impl UserRepository for MemoryUserRepo {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError> {
        Ok(self.get(id).filter(|u| u.deleted_at.is_none()))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserEntity>, error::SystemError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.username.eq_ignore_ascii_case(username) && u.deleted_at.is_none())
            .cloned())
    }

    async fn create(&self, user: &InsertUser) -> Result<Uuid, error::SystemError> {
        let mut users = self.users.lock().unwrap();

        if users.iter().any(|u| u.username.eq_ignore_ascii_case(&user.username)) {
            return Err(error::SystemError::conflict("Username already exists"));
        }
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(error::SystemError::conflict("Email already exists"));
        }

        let mut entity = user_fixture(&user.username);
        entity.email = user.email.clone();
        entity.hash_password = user.hash_password.clone();
        entity.display_name = user.display_name.clone();
        let id = entity.id;
        users.push(entity);

        Ok(id)
    }

    async fn update(&self, id: &Uuid, user: &UpdateUser) -> Result<UserEntity, error::SystemError> {
        let mut users = self.users.lock().unwrap();
        let entity = users
            .iter_mut()
            .find(|u| u.id == *id && u.deleted_at.is_none())
            .ok_or_else(|| error::SystemError::not_found("User not found"))?;

        if let Some(username) = &user.username {
            entity.username = username.clone();
        }
        if let Some(email) = &user.email {
            entity.email = email.clone();
        }
        if let Some(display_name) = &user.display_name {
            entity.display_name = display_name.clone();
        }
        if let Some(avatar_url) = &user.avatar_url {
            entity.avatar_url = avatar_url.clone();
        }
        if let Some(bio) = &user.bio {
            entity.bio = bio.clone();
        }
        entity.updated_at = chrono::Utc::now();

        Ok(entity.clone())
    }

    async fn update_status(
        &self,
        id: &Uuid,
        status: &UserStatus,
    ) -> Result<bool, error::SystemError> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == *id && u.deleted_at.is_none()) {
            Some(entity) => {
                entity.status = status.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, error::SystemError> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == *id && u.deleted_at.is_none()) {
            Some(entity) => {
                entity.deleted_at = Some(chrono::Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn search_users(
        &self,
        query: &str,
        limit: i32,
    ) -> Result<Vec<UserEntity>, error::SystemError> {
        let query = query.to_lowercase();
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .filter(|u| {
                u.deleted_at.is_none()
                    && (u.username.to_lowercase().contains(&query)
                        || u.display_name.to_lowercase().contains(&query))
            })
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryRoomRepo {
    pub users: Arc<MemoryUserRepo>,
    rooms: Mutex<Vec<RoomEntity>>,
    members: Mutex<Vec<RoomMemberEntity>>,
}

impl MemoryRoomRepo {
    pub fn with_users(users: Arc<MemoryUserRepo>) -> Self {
        MemoryRoomRepo { users, rooms: Mutex::default(), members: Mutex::default() }
    }
}

#[async_trait::async_trait]
impl RoomRepository for MemoryRoomRepo {
    async fn create_room(&self, room: &InsertRoom) -> Result<RoomEntity, error::SystemError> {
        let now = chrono::Utc::now();
        let entity = RoomEntity {
            id: Uuid::now_v7(),
            name: room.name.clone(),
            description: room.description.clone(),
            owner_id: room.owner_id,
            max_members: room.max_members,
            is_private: room.is_private,
            created_at: now,
            updated_at: now,
        };

        self.members.lock().unwrap().push(RoomMemberEntity {
            room_id: entity.id,
            user_id: room.owner_id,
            role: RoomRole::Owner,
            is_muted: false,
            last_read_at: now,
            joined_at: now,
        });
        self.rooms.lock().unwrap().push(entity.clone());

        Ok(entity)
    }

    async fn find_by_id(&self, room_id: &Uuid) -> Result<Option<RoomEntity>, error::SystemError> {
        Ok(self.rooms.lock().unwrap().iter().find(|r| r.id == *room_id).cloned())
    }

    async fn update_room(
        &self,
        room_id: &Uuid,
        update: &UpdateRoom,
    ) -> Result<RoomEntity, error::SystemError> {
        let mut rooms = self.rooms.lock().unwrap();
        let room = rooms
            .iter_mut()
            .find(|r| r.id == *room_id)
            .ok_or_else(|| error::SystemError::not_found("Room not found"))?;

        if let Some(name) = &update.name {
            room.name = name.clone();
        }
        if let Some(description) = &update.description {
            room.description = description.clone();
        }
        if let Some(max_members) = update.max_members {
            room.max_members = max_members;
        }
        room.updated_at = chrono::Utc::now();

        Ok(room.clone())
    }

    async fn delete_room(&self, room_id: &Uuid) -> Result<bool, error::SystemError> {
        let mut rooms = self.rooms.lock().unwrap();
        let before = rooms.len();
        rooms.retain(|r| r.id != *room_id);
        self.members.lock().unwrap().retain(|m| m.room_id != *room_id);

        Ok(rooms.len() < before)
    }

    async fn list_rooms_for_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<RoomEntity>, error::SystemError> {
        let members = self.members.lock().unwrap();
        let rooms = self.rooms.lock().unwrap();
        Ok(rooms
            .iter()
            .filter(|r| members.iter().any(|m| m.room_id == r.id && m.user_id == *user_id))
            .cloned()
            .collect())
    }

    async fn add_member(
        &self,
        room_id: &Uuid,
        user_id: &Uuid,
        role: RoomRole,
        max_members: i32,
    ) -> Result<Option<RoomMemberEntity>, error::SystemError> {
        // single critical section, like the conditional insert
        let mut members = self.members.lock().unwrap();

        if members.iter().any(|m| m.room_id == *room_id && m.user_id == *user_id) {
            return Err(error::SystemError::conflict("Duplicate value"));
        }

        let count = members.iter().filter(|m| m.room_id == *room_id).count();
        if count as i32 >= max_members {
            return Ok(None);
        }

        let now = chrono::Utc::now();
        let member = RoomMemberEntity {
            room_id: *room_id,
            user_id: *user_id,
            role,
            is_muted: false,
            last_read_at: now,
            joined_at: now,
        };
        members.push(member.clone());

        Ok(Some(member))
    }

    async fn remove_member(
        &self,
        room_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let mut members = self.members.lock().unwrap();
        let before = members.len();
        members.retain(|m| !(m.room_id == *room_id && m.user_id == *user_id));

        Ok(members.len() < before)
    }

    async fn update_role(
        &self,
        room_id: &Uuid,
        user_id: &Uuid,
        role: RoomRole,
    ) -> Result<bool, error::SystemError> {
        let mut members = self.members.lock().unwrap();
        match members.iter_mut().find(|m| m.room_id == *room_id && m.user_id == *user_id) {
            Some(member) => {
                member.role = role;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_member(
        &self,
        room_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Option<RoomMemberEntity>, error::SystemError> {
        let members = self.members.lock().unwrap();
        Ok(members.iter().find(|m| m.room_id == *room_id && m.user_id == *user_id).cloned())
    }

    async fn list_members(&self, room_id: &Uuid) -> Result<Vec<RoomMemberRow>, error::SystemError> {
        let members = self.members.lock().unwrap();
        let mut rows: Vec<RoomMemberRow> = members
            .iter()
            .filter(|m| m.room_id == *room_id)
            .filter_map(|m| {
                let user = self.users.get(&m.user_id)?;
                Some(RoomMemberRow {
                    user_id: m.user_id,
                    username: user.username,
                    display_name: user.display_name,
                    status: user.status,
                    avatar_url: user.avatar_url,
                    role: m.role,
                    is_muted: m.is_muted,
                    joined_at: m.joined_at,
                })
            })
            .collect();

        rows.sort_by_key(|r| (Reverse(r.role), r.joined_at));

        Ok(rows)
    }

    async fn count_members(&self, room_id: &Uuid) -> Result<i64, error::SystemError> {
        let members = self.members.lock().unwrap();
        Ok(members.iter().filter(|m| m.room_id == *room_id).count() as i64)
    }

    async fn set_muted(
        &self,
        room_id: &Uuid,
        user_id: &Uuid,
        muted: bool,
    ) -> Result<bool, error::SystemError> {
        let mut members = self.members.lock().unwrap();
        match members.iter_mut().find(|m| m.room_id == *room_id && m.user_id == *user_id) {
            Some(member) => {
                member.is_muted = muted;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_read(&self, room_id: &Uuid, user_id: &Uuid) -> Result<bool, error::SystemError> {
        let mut members = self.members.lock().unwrap();
        match members.iter_mut().find(|m| m.room_id == *room_id && m.user_id == *user_id) {
            Some(member) => {
                member.last_read_at = chrono::Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct MemoryMessageRepo {
    pub users: Arc<MemoryUserRepo>,
    messages: Mutex<Vec<DirectMessageEntity>>,
}

impl MemoryMessageRepo {
    pub fn with_users(users: Arc<MemoryUserRepo>) -> Self {
        MemoryMessageRepo { users, messages: Mutex::default() }
    }
}

#[async_trait::async_trait]
impl MessageRepository for MemoryMessageRepo {
    async fn create(
        &self,
        message: &InsertDirectMessage,
    ) -> Result<DirectMessageEntity, error::SystemError> {
        let entity = DirectMessageEntity {
            id: Uuid::now_v7(),
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            _type: message._type,
            content: message.content.clone(),
            is_read: false,
            deleted_by_sender: false,
            deleted_by_receiver: false,
            created_at: chrono::Utc::now(),
        };
        self.messages.lock().unwrap().push(entity.clone());

        Ok(entity)
    }

    async fn find_by_id(
        &self,
        message_id: &Uuid,
    ) -> Result<Option<DirectMessageEntity>, error::SystemError> {
        Ok(self.messages.lock().unwrap().iter().find(|m| m.id == *message_id).cloned())
    }

    async fn list_between(
        &self,
        viewer: &Uuid,
        counterparty: &Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<DirectMessageEntity>, error::SystemError> {
        let messages = self.messages.lock().unwrap();
        let mut page: Vec<DirectMessageEntity> = messages
            .iter()
            .filter(|m| {
                (m.sender_id == *viewer && m.receiver_id == *counterparty
                    || m.sender_id == *counterparty && m.receiver_id == *viewer)
                    && m.visible_to(viewer)
            })
            .cloned()
            .collect();

        // uuid v7 ids order identically-timestamped rows
        page.sort_by_key(|m| Reverse((m.created_at, m.id)));

        Ok(page.into_iter().skip(offset as usize).take(limit as usize).collect())
    }

    async fn list_conversations(
        &self,
        viewer: &Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ConversationRow>, error::SystemError> {
        let messages = self.messages.lock().unwrap();

        let mut latest: Vec<DirectMessageEntity> = Vec::new();
        for m in messages.iter().filter(|m| m.visible_to(viewer)) {
            let counterparty =
                if m.sender_id == *viewer { m.receiver_id } else { m.sender_id };
            if counterparty == *viewer {
                continue;
            }
            let current = latest.iter_mut().find(|l| {
                let l_cp = if l.sender_id == *viewer { l.receiver_id } else { l.sender_id };
                l_cp == counterparty
            });
            match current {
                Some(l) if (l.created_at, l.id) < (m.created_at, m.id) => *l = m.clone(),
                Some(_) => {}
                None => latest.push(m.clone()),
            }
        }

        latest.sort_by_key(|m| Reverse((m.created_at, m.id)));

        let rows = latest
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .filter_map(|m| {
                let counterparty_id =
                    if m.sender_id == *viewer { m.receiver_id } else { m.sender_id };
                let user = self.users.get(&counterparty_id)?;
                let unread_count = messages
                    .iter()
                    .filter(|u| {
                        u.sender_id == counterparty_id
                            && u.receiver_id == *viewer
                            && !u.is_read
                            && !u.deleted_by_receiver
                    })
                    .count() as i64;
                Some(ConversationRow {
                    counterparty_id,
                    username: user.username,
                    display_name: user.display_name,
                    avatar_url: user.avatar_url,
                    last_message_id: m.id,
                    last_sender_id: m.sender_id,
                    _type: m._type,
                    content: m.content,
                    is_read: m.is_read,
                    created_at: m.created_at,
                    unread_count,
                })
            })
            .collect();

        Ok(rows)
    }

    async fn mark_read(&self, viewer: &Uuid, counterparty: &Uuid) -> Result<u64, error::SystemError> {
        let mut messages = self.messages.lock().unwrap();
        let mut touched = 0;
        for m in messages
            .iter_mut()
            .filter(|m| m.sender_id == *counterparty && m.receiver_id == *viewer && !m.is_read)
        {
            m.is_read = true;
            touched += 1;
        }

        Ok(touched)
    }

    async fn set_deleted(
        &self,
        message_id: &Uuid,
        side: MessageSide,
    ) -> Result<bool, error::SystemError> {
        let mut messages = self.messages.lock().unwrap();
        match messages.iter_mut().find(|m| m.id == *message_id) {
            Some(m) => {
                match side {
                    MessageSide::Sender => m.deleted_by_sender = true,
                    MessageSide::Receiver => m.deleted_by_receiver = true,
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_conversation_for(
        &self,
        viewer: &Uuid,
        counterparty: &Uuid,
    ) -> Result<u64, error::SystemError> {
        let mut messages = self.messages.lock().unwrap();
        let mut touched = 0;
        for m in messages.iter_mut().filter(|m| {
            m.sender_id == *viewer && m.receiver_id == *counterparty
                || m.sender_id == *counterparty && m.receiver_id == *viewer
        }) {
            if m.sender_id == *viewer {
                m.deleted_by_sender = true;
            } else {
                m.deleted_by_receiver = true;
            }
            touched += 1;
        }

        Ok(touched)
    }

    async fn count_unread(&self, viewer: &Uuid) -> Result<i64, error::SystemError> {
        let messages = self.messages.lock().unwrap();
        Ok(messages
            .iter()
            .filter(|m| m.receiver_id == *viewer && !m.is_read && !m.deleted_by_receiver)
            .count() as i64)
    }

    async fn count_unread_from(
        &self,
        viewer: &Uuid,
        counterparty: &Uuid,
    ) -> Result<i64, error::SystemError> {
        let messages = self.messages.lock().unwrap();
        Ok(messages
            .iter()
            .filter(|m| {
                m.sender_id == *counterparty
                    && m.receiver_id == *viewer
                    && !m.is_read
                    && !m.deleted_by_receiver
            })
            .count() as i64)
    }
}

#[derive(Default)]
pub struct MemoryRelationshipRepo {
    pub users: Arc<MemoryUserRepo>,
    edges: Mutex<Vec<FriendshipEntity>>,
    blocks: Mutex<Vec<BlockedUserEntity>>,
}

impl MemoryRelationshipRepo {
    pub fn with_users(users: Arc<MemoryUserRepo>) -> Self {
        MemoryRelationshipRepo { users, edges: Mutex::default(), blocks: Mutex::default() }
    }
}

#[async_trait::async_trait]
impl FriendshipRepository for MemoryRelationshipRepo {
    async fn find_edge(
        &self,
        source: &Uuid,
        target: &Uuid,
    ) -> Result<Option<FriendshipEntity>, error::SystemError> {
        let edges = self.edges.lock().unwrap();
        Ok(edges.iter().find(|e| e.user_id == *source && e.friend_id == *target).cloned())
    }

    async fn create_request(
        &self,
        source: &Uuid,
        target: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let mut edges = self.edges.lock().unwrap();
        if edges.iter().any(|e| e.user_id == *source && e.friend_id == *target) {
            return Ok(false);
        }

        let now = chrono::Utc::now();
        edges.push(FriendshipEntity {
            user_id: *source,
            friend_id: *target,
            status: FriendshipStatus::Pending,
            created_at: now,
            updated_at: now,
        });

        Ok(true)
    }

    async fn reject_request(
        &self,
        source: &Uuid,
        target: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let mut edges = self.edges.lock().unwrap();
        match edges.iter_mut().find(|e| {
            e.user_id == *source && e.friend_id == *target && e.status == FriendshipStatus::Pending
        }) {
            Some(edge) => {
                edge.status = FriendshipStatus::Rejected;
                edge.updated_at = chrono::Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_edges(&self, a: &Uuid, b: &Uuid) -> Result<u64, error::SystemError> {
        let mut edges = self.edges.lock().unwrap();
        let before = edges.len();
        edges.retain(|e| {
            !(e.user_id == *a && e.friend_id == *b || e.user_id == *b && e.friend_id == *a)
        });

        Ok((before - edges.len()) as u64)
    }

    async fn are_friends(&self, a: &Uuid, b: &Uuid) -> Result<bool, error::SystemError> {
        let edges = self.edges.lock().unwrap();
        Ok(edges.iter().any(|e| {
            e.user_id == *a && e.friend_id == *b && e.status == FriendshipStatus::Accepted
        }))
    }

    async fn list_friends(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendResponse>, error::SystemError> {
        let edges = self.edges.lock().unwrap();
        let mut friends: Vec<FriendResponse> = edges
            .iter()
            .filter(|e| e.user_id == *user_id && e.status == FriendshipStatus::Accepted)
            .filter_map(|e| self.users.get(&e.friend_id).map(FriendResponse::from))
            .collect();

        friends.sort_by(|a, b| a.display_name.cmp(&b.display_name));

        Ok(friends)
    }

    async fn list_incoming_requests(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendRequestRow>, error::SystemError> {
        let edges = self.edges.lock().unwrap();
        Ok(edges
            .iter()
            .filter(|e| e.friend_id == *user_id && e.status == FriendshipStatus::Pending)
            .filter_map(|e| {
                let user = self.users.get(&e.user_id)?;
                Some(FriendRequestRow {
                    user_id: e.user_id,
                    username: user.username,
                    display_name: user.display_name,
                    avatar_url: user.avatar_url,
                    created_at: e.created_at,
                })
            })
            .collect())
    }

    async fn list_outgoing_requests(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendRequestRow>, error::SystemError> {
        let edges = self.edges.lock().unwrap();
        Ok(edges
            .iter()
            .filter(|e| e.user_id == *user_id && e.status == FriendshipStatus::Pending)
            .filter_map(|e| {
                let user = self.users.get(&e.friend_id)?;
                Some(FriendRequestRow {
                    user_id: e.friend_id,
                    username: user.username,
                    display_name: user.display_name,
                    avatar_url: user.avatar_url,
                    created_at: e.created_at,
                })
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl BlockRepository for MemoryRelationshipRepo {
    async fn create_block(&self, blocker: &Uuid, blocked: &Uuid) -> Result<(), error::SystemError> {
        let mut blocks = self.blocks.lock().unwrap();
        if blocks.iter().any(|b| b.blocker_id == *blocker && b.blocked_id == *blocked) {
            return Err(error::SystemError::conflict("Duplicate value"));
        }

        blocks.push(BlockedUserEntity {
            blocker_id: *blocker,
            blocked_id: *blocked,
            created_at: chrono::Utc::now(),
        });

        Ok(())
    }

    async fn delete_block(
        &self,
        blocker: &Uuid,
        blocked: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let mut blocks = self.blocks.lock().unwrap();
        let before = blocks.len();
        blocks.retain(|b| !(b.blocker_id == *blocker && b.blocked_id == *blocked));

        Ok(blocks.len() < before)
    }

    async fn is_blocked_either(&self, a: &Uuid, b: &Uuid) -> Result<bool, error::SystemError> {
        let blocks = self.blocks.lock().unwrap();
        Ok(blocks.iter().any(|blk| {
            blk.blocker_id == *a && blk.blocked_id == *b
                || blk.blocker_id == *b && blk.blocked_id == *a
        }))
    }

    async fn list_blocked(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<BlockedUserRow>, error::SystemError> {
        let blocks = self.blocks.lock().unwrap();
        Ok(blocks
            .iter()
            .filter(|b| b.blocker_id == *user_id)
            .filter_map(|b| {
                let user = self.users.get(&b.blocked_id)?;
                Some(BlockedUserRow {
                    id: b.blocked_id,
                    username: user.username,
                    display_name: user.display_name,
                    avatar_url: user.avatar_url,
                    created_at: b.created_at,
                })
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl RelationshipRepo for MemoryRelationshipRepo {
    async fn accept_request_atomic(
        &self,
        source: &Uuid,
        target: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let mut edges = self.edges.lock().unwrap();

        let pending = edges.iter_mut().find(|e| {
            e.user_id == *source && e.friend_id == *target && e.status == FriendshipStatus::Pending
        });
        let Some(edge) = pending else {
            return Ok(false);
        };
        edge.status = FriendshipStatus::Accepted;
        edge.updated_at = chrono::Utc::now();

        let now = chrono::Utc::now();
        match edges.iter_mut().find(|e| e.user_id == *target && e.friend_id == *source) {
            Some(mirror) => {
                mirror.status = FriendshipStatus::Accepted;
                mirror.updated_at = now;
            }
            None => edges.push(FriendshipEntity {
                user_id: *target,
                friend_id: *source,
                status: FriendshipStatus::Accepted,
                created_at: now,
                updated_at: now,
            }),
        }

        Ok(true)
    }
}
