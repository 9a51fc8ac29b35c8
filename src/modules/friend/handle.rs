use actix_web::{delete, get, post, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::{
        friend::{
            model::{
                BlockedUserRow, FriendRequestBody, FriendRequestsResponse, FriendResponse,
            },
            repository_pg::FriendRepositoryPg,
            service::FriendService,
        },
        user::repository_pg::UserRepositoryPg,
    },
    utils::ValidatedJson,
};

pub type FriendSvc = FriendService<FriendRepositoryPg, UserRepositoryPg>;

#[get("")]
pub async fn list_friends(
    friend_service: web::Data<FriendSvc>,
    req: HttpRequest,
) -> Result<success::Success<Vec<FriendResponse>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let friends = friend_service.list_friends(user_id).await?;

    Ok(success::Success::ok(Some(friends)))
}

#[post("/requests")]
pub async fn send_request(
    friend_service: web::Data<FriendSvc>,
    body: ValidatedJson<FriendRequestBody>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    friend_service.send_request(user_id, body.0.recipient_id).await?;

    Ok(success::Success::created(None).message("Friend request sent"))
}

#[get("/requests")]
pub async fn list_requests(
    friend_service: web::Data<FriendSvc>,
    req: HttpRequest,
) -> Result<success::Success<FriendRequestsResponse>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let requests = friend_service.list_requests(user_id).await?;

    Ok(success::Success::ok(Some(requests)))
}

#[post("/requests/{sender_id}/accept")]
pub async fn accept_request(
    friend_service: web::Data<FriendSvc>,
    sender_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    friend_service.accept_request(user_id, *sender_id).await?;

    Ok(success::Success::ok(None).message("Friend request accepted"))
}

#[post("/requests/{sender_id}/decline")]
pub async fn decline_request(
    friend_service: web::Data<FriendSvc>,
    sender_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    friend_service.decline_request(user_id, *sender_id).await?;

    Ok(success::Success::ok(None).message("Friend request declined"))
}

#[delete("/requests/{recipient_id}")]
pub async fn cancel_request(
    friend_service: web::Data<FriendSvc>,
    recipient_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    friend_service.cancel_request(user_id, *recipient_id).await?;

    Ok(success::Success::no_content())
}

#[delete("/{friend_id:[0-9a-fA-F-]{36}}")]
pub async fn remove_friend(
    friend_service: web::Data<FriendSvc>,
    friend_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    friend_service.remove_friend(user_id, *friend_id).await?;

    Ok(success::Success::no_content())
}

#[post("/blocks/{user_id}")]
pub async fn block_user(
    friend_service: web::Data<FriendSvc>,
    blocked_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    friend_service.block_user(user_id, *blocked_id).await?;

    Ok(success::Success::ok(None).message("User blocked"))
}

#[delete("/blocks/{user_id}")]
pub async fn unblock_user(
    friend_service: web::Data<FriendSvc>,
    blocked_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    friend_service.unblock_user(user_id, *blocked_id).await?;

    Ok(success::Success::no_content())
}

#[get("/blocks")]
pub async fn list_blocked(
    friend_service: web::Data<FriendSvc>,
    req: HttpRequest,
) -> Result<success::Success<Vec<BlockedUserRow>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let blocked = friend_service.list_blocked(user_id).await?;

    Ok(success::Success::ok(Some(blocked)))
}
