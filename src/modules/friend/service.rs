use std::sync::Arc;
use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        friend::{
            model::{BlockedUserRow, FriendRequestRow, FriendRequestsResponse, FriendResponse},
            repository::RelationshipRepo,
            schema::FriendshipStatus,
        },
        user::repository::UserRepository,
    },
};

/// Friendships and blocks. Requests are directed edges; an accepted
/// friendship is the mirrored pair of accepted edges, so symmetry is a
/// write-time property rather than a query-time one.
#[derive(Clone)]
pub struct FriendService<R, U>
where
    R: RelationshipRepo,
    U: UserRepository + Send + Sync,
{
    relationship_repo: Arc<R>,
    user_repo: Arc<U>,
}

impl<R, U> FriendService<R, U>
where
    R: RelationshipRepo,
    U: UserRepository + Send + Sync,
{
    pub fn with_dependencies(relationship_repo: Arc<R>, user_repo: Arc<U>) -> Self {
        FriendService { relationship_repo, user_repo }
    }

    pub async fn send_request(
        &self,
        source: Uuid,
        target: Uuid,
    ) -> Result<(), error::SystemError> {
        if source == target {
            return Err(error::SystemError::bad_request(
                "Cannot send a friend request to yourself",
            ));
        }

        if self.user_repo.find_by_id(&target).await?.is_none() {
            return Err(error::SystemError::not_found("User not found"));
        }

        if self.relationship_repo.is_blocked_either(&source, &target).await? {
            return Err(error::SystemError::forbidden(
                "You cannot send a friend request to this user",
            ));
        }

        if self.relationship_repo.are_friends(&source, &target).await? {
            return Err(error::SystemError::conflict("You are already friends with this user"));
        }

        if !self.relationship_repo.create_request(&source, &target).await? {
            return Err(error::SystemError::conflict("Friend request already sent"));
        }

        Ok(())
    }

    /// `target` accepts the pending request from `source`.
    pub async fn accept_request(
        &self,
        target: Uuid,
        source: Uuid,
    ) -> Result<(), error::SystemError> {
        if !self.relationship_repo.accept_request_atomic(&source, &target).await? {
            return Err(error::SystemError::not_found("Friend request not found"));
        }

        Ok(())
    }

    /// `target` declines the pending request from `source`. The edge is kept
    /// as rejected; removing the relationship clears it.
    pub async fn decline_request(
        &self,
        target: Uuid,
        source: Uuid,
    ) -> Result<(), error::SystemError> {
        if !self.relationship_repo.reject_request(&source, &target).await? {
            return Err(error::SystemError::not_found("Friend request not found"));
        }

        Ok(())
    }

    /// Retracts a request the actor sent and has not been answered yet.
    pub async fn cancel_request(
        &self,
        source: Uuid,
        target: Uuid,
    ) -> Result<(), error::SystemError> {
        let edge = self.relationship_repo.find_edge(&source, &target).await?;

        match edge {
            Some(edge) if edge.status == FriendshipStatus::Pending => {
                self.relationship_repo.delete_edges(&source, &target).await?;
                Ok(())
            }
            _ => Err(error::SystemError::not_found("Friend request not found")),
        }
    }

    /// Removes whatever edges exist between the pair, whichever status they
    /// are in.
    pub async fn remove_friend(
        &self,
        user_id: Uuid,
        friend_id: Uuid,
    ) -> Result<(), error::SystemError> {
        if self.relationship_repo.delete_edges(&user_id, &friend_id).await? == 0 {
            return Err(error::SystemError::not_found("No relationship with this user"));
        }

        Ok(())
    }

    pub async fn block_user(
        &self,
        blocker: Uuid,
        blocked: Uuid,
    ) -> Result<(), error::SystemError> {
        if blocker == blocked {
            return Err(error::SystemError::bad_request("Cannot block yourself"));
        }

        if self.user_repo.find_by_id(&blocked).await?.is_none() {
            return Err(error::SystemError::not_found("User not found"));
        }

        match self.relationship_repo.create_block(&blocker, &blocked).await {
            Ok(()) => {}
            Err(e) if e.is_conflict() => {
                return Err(error::SystemError::conflict("User is already blocked"));
            }
            Err(e) => return Err(e),
        }

        // the block stands even if tearing down the friendship edges fails;
        // a stale edge is harmless because every interaction checks blocks
        if let Err(e) = self.relationship_repo.delete_edges(&blocker, &blocked).await {
            log::warn!(
                "failed to remove friendship edges after block ({} -> {}): {}",
                blocker,
                blocked,
                e
            );
        }

        Ok(())
    }

    pub async fn unblock_user(
        &self,
        blocker: Uuid,
        blocked: Uuid,
    ) -> Result<(), error::SystemError> {
        if !self.relationship_repo.delete_block(&blocker, &blocked).await? {
            return Err(error::SystemError::not_found("User is not blocked"));
        }

        Ok(())
    }

    pub async fn are_friends(&self, a: Uuid, b: Uuid) -> Result<bool, error::SystemError> {
        self.relationship_repo.are_friends(&a, &b).await
    }

    pub async fn list_friends(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<FriendResponse>, error::SystemError> {
        self.relationship_repo.list_friends(&user_id).await
    }

    pub async fn list_requests(
        &self,
        user_id: Uuid,
    ) -> Result<FriendRequestsResponse, error::SystemError> {
        let incoming = self.relationship_repo.list_incoming_requests(&user_id).await?;
        let outgoing = self.relationship_repo.list_outgoing_requests(&user_id).await?;

        Ok(FriendRequestsResponse { incoming, outgoing })
    }

    pub async fn list_blocked(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<BlockedUserRow>, error::SystemError> {
        self.relationship_repo.list_blocked(&user_id).await
    }
}
