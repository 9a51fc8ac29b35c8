use uuid::Uuid;

use crate::api::error;
use crate::modules::friend::model::{BlockedUserRow, FriendRequestRow, FriendResponse};
use crate::modules::friend::schema::FriendshipEntity;

#[async_trait::async_trait]
pub trait FriendshipRepository {
    async fn find_edge(
        &self,
        source: &Uuid,
        target: &Uuid,
    ) -> Result<Option<FriendshipEntity>, error::SystemError>;

    /// Insert-or-nothing on the (source, target) unique pair. Returns false
    /// when an edge for that exact direction already exists.
    async fn create_request(
        &self,
        source: &Uuid,
        target: &Uuid,
    ) -> Result<bool, error::SystemError>;

    /// Transitions pending (source -> target) to rejected. Returns false
    /// when no pending edge existed.
    async fn reject_request(
        &self,
        source: &Uuid,
        target: &Uuid,
    ) -> Result<bool, error::SystemError>;

    /// Removes edges in both directions regardless of status; returns the
    /// number of rows deleted.
    async fn delete_edges(&self, a: &Uuid, b: &Uuid) -> Result<u64, error::SystemError>;

    /// True only if an accepted (a -> b) edge exists; never assumes the
    /// mirror edge.
    async fn are_friends(&self, a: &Uuid, b: &Uuid) -> Result<bool, error::SystemError>;

    async fn list_friends(&self, user_id: &Uuid)
        -> Result<Vec<FriendResponse>, error::SystemError>;

    async fn list_incoming_requests(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendRequestRow>, error::SystemError>;

    async fn list_outgoing_requests(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendRequestRow>, error::SystemError>;
}

#[async_trait::async_trait]
pub trait BlockRepository {
    /// Plain insert; a duplicate pair surfaces as a Conflict from the
    /// unique constraint.
    async fn create_block(
        &self,
        blocker: &Uuid,
        blocked: &Uuid,
    ) -> Result<(), error::SystemError>;

    /// Returns false when no such edge existed.
    async fn delete_block(
        &self,
        blocker: &Uuid,
        blocked: &Uuid,
    ) -> Result<bool, error::SystemError>;

    /// True if a blocked b or b blocked a. Gates every direct message and
    /// friend request.
    async fn is_blocked_either(&self, a: &Uuid, b: &Uuid) -> Result<bool, error::SystemError>;

    async fn list_blocked(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<BlockedUserRow>, error::SystemError>;
}

#[async_trait::async_trait]
pub trait RelationshipRepo: FriendshipRepository + BlockRepository + Send + Sync {
    /// "target accepts source's request": turns the pending
    /// (source -> target) edge into accepted and upserts the mirrored
    /// accepted (target -> source) edge in the same transaction. Returns
    /// false (and writes nothing) when no pending edge existed.
    async fn accept_request_atomic(
        &self,
        source: &Uuid,
        target: &Uuid,
    ) -> Result<bool, error::SystemError>;
}
