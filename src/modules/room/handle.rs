use actix_web::{delete, get, patch, post, put, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::{
        room::{
            model::{
                CreateRoomBody, InviteMemberBody, RoomMemberRow, SetMutedBody,
                UpdateMemberRoleBody, UpdateRoomBody, UpdateRoom,
            },
            repository_pg::RoomRepositoryPg,
            schema::{RoomEntity, RoomMemberEntity},
            service::RoomService,
        },
        user::repository_pg::UserRepositoryPg,
    },
    utils::ValidatedJson,
};

pub type RoomSvc = RoomService<RoomRepositoryPg, UserRepositoryPg>;

#[post("")]
pub async fn create_room(
    room_service: web::Data<RoomSvc>,
    body: ValidatedJson<CreateRoomBody>,
    req: HttpRequest,
) -> Result<success::Success<RoomEntity>, error::Error> {
    let owner_id = get_claims(&req)?.sub;
    let body = body.0;
    let room = room_service
        .create_room(owner_id, body.name, body.description, body.max_members, body.is_private)
        .await?;

    Ok(success::Success::created(Some(room)).message("Room created successfully"))
}

#[get("")]
pub async fn list_my_rooms(
    room_service: web::Data<RoomSvc>,
    req: HttpRequest,
) -> Result<success::Success<Vec<RoomEntity>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let rooms = room_service.list_my_rooms(user_id).await?;
    Ok(success::Success::ok(Some(rooms)))
}

#[get("/{room_id}")]
pub async fn get_room(
    room_service: web::Data<RoomSvc>,
    room_id: web::Path<Uuid>,
) -> Result<success::Success<RoomEntity>, error::Error> {
    let room = room_service.get_room(*room_id).await?;
    Ok(success::Success::ok(Some(room)))
}

#[patch("/{room_id}")]
pub async fn update_room(
    room_service: web::Data<RoomSvc>,
    room_id: web::Path<Uuid>,
    body: ValidatedJson<UpdateRoomBody>,
    req: HttpRequest,
) -> Result<success::Success<RoomEntity>, error::Error> {
    let actor_id = get_claims(&req)?.sub;
    let body = body.0;
    let update =
        UpdateRoom { name: body.name, description: body.description, max_members: body.max_members };
    let room = room_service.update_room(*room_id, actor_id, update).await?;
    Ok(success::Success::ok(Some(room)).message("Room updated successfully"))
}

#[delete("/{room_id}")]
pub async fn delete_room(
    room_service: web::Data<RoomSvc>,
    room_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let actor_id = get_claims(&req)?.sub;
    room_service.delete_room(*room_id, actor_id).await?;
    Ok(success::Success::no_content())
}

#[get("/{room_id}/members")]
pub async fn list_members(
    room_service: web::Data<RoomSvc>,
    room_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<Vec<RoomMemberRow>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let members = room_service.list_members(*room_id, user_id).await?;
    Ok(success::Success::ok(Some(members)))
}

#[post("/{room_id}/join")]
pub async fn join_room(
    room_service: web::Data<RoomSvc>,
    room_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<RoomMemberEntity>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let member = room_service.join_room(*room_id, user_id).await?;
    Ok(success::Success::created(Some(member)).message("Joined room successfully"))
}

#[post("/{room_id}/members")]
pub async fn invite_member(
    room_service: web::Data<RoomSvc>,
    room_id: web::Path<Uuid>,
    body: ValidatedJson<InviteMemberBody>,
    req: HttpRequest,
) -> Result<success::Success<RoomMemberEntity>, error::Error> {
    let actor_id = get_claims(&req)?.sub;
    let member = room_service.invite_member(*room_id, actor_id, body.0.user_id).await?;
    Ok(success::Success::created(Some(member)).message("Member invited successfully"))
}

#[post("/{room_id}/leave")]
pub async fn leave_room(
    room_service: web::Data<RoomSvc>,
    room_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    room_service.leave_room(*room_id, user_id).await?;
    Ok(success::Success::no_content())
}

#[delete("/{room_id}/members/{user_id}")]
pub async fn kick_member(
    room_service: web::Data<RoomSvc>,
    path: web::Path<(Uuid, Uuid)>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let (room_id, target_id) = path.into_inner();
    let actor_id = get_claims(&req)?.sub;
    room_service.kick_member(room_id, actor_id, target_id).await?;
    Ok(success::Success::no_content())
}

#[put("/{room_id}/members/{user_id}/role")]
pub async fn update_member_role(
    room_service: web::Data<RoomSvc>,
    path: web::Path<(Uuid, Uuid)>,
    body: ValidatedJson<UpdateMemberRoleBody>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let (room_id, target_id) = path.into_inner();
    let actor_id = get_claims(&req)?.sub;
    room_service.update_member_role(room_id, actor_id, target_id, body.0.role).await?;
    Ok(success::Success::ok(None).message("Role updated successfully"))
}

#[put("/{room_id}/mute")]
pub async fn set_muted(
    room_service: web::Data<RoomSvc>,
    room_id: web::Path<Uuid>,
    body: ValidatedJson<SetMutedBody>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    room_service.set_muted(*room_id, user_id, body.0.is_muted).await?;
    Ok(success::Success::ok(None))
}

#[post("/{room_id}/read")]
pub async fn mark_room_read(
    room_service: web::Data<RoomSvc>,
    room_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    room_service.mark_room_read(*room_id, user_id).await?;
    Ok(success::Success::ok(None))
}
