use actix_web::{delete, get, post, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::{
        friend::repository_pg::FriendRepositoryPg,
        message::{
            model::{ConversationRow, PageQuery, SendMessageBody, UnreadCountResponse},
            repository_pg::MessageRepositoryPg,
            schema::{DirectMessageEntity, MessageType},
            service::MessageService,
        },
        user::repository_pg::UserRepositoryPg,
    },
    utils::{ValidatedJson, ValidatedQuery},
};

pub type MessageSvc = MessageService<MessageRepositoryPg, FriendRepositoryPg, UserRepositoryPg>;

#[post("")]
pub async fn send_message(
    message_service: web::Data<MessageSvc>,
    body: ValidatedJson<SendMessageBody>,
    req: HttpRequest,
) -> Result<success::Success<DirectMessageEntity>, error::Error> {
    let sender_id = get_claims(&req)?.sub;
    let body = body.0;
    let message = message_service
        .send(sender_id, body.recipient_id, body.content, body._type.unwrap_or(MessageType::Text))
        .await?;

    Ok(success::Success::created(Some(message)).message("Message sent successfully"))
}

#[get("/conversations")]
pub async fn list_conversations(
    message_service: web::Data<MessageSvc>,
    query: ValidatedQuery<PageQuery>,
    req: HttpRequest,
) -> Result<success::Success<Vec<ConversationRow>>, error::Error> {
    let viewer = get_claims(&req)?.sub;
    let conversations = message_service
        .get_conversations(viewer, query.0.limit.unwrap_or(20), query.0.offset.unwrap_or(0))
        .await?;

    Ok(success::Success::ok(Some(conversations)))
}

#[get("/conversations/{counterparty_id}")]
pub async fn get_conversation(
    message_service: web::Data<MessageSvc>,
    counterparty_id: web::Path<Uuid>,
    query: ValidatedQuery<PageQuery>,
    req: HttpRequest,
) -> Result<success::Success<Vec<DirectMessageEntity>>, error::Error> {
    let viewer = get_claims(&req)?.sub;
    let messages = message_service
        .get_conversation(
            viewer,
            *counterparty_id,
            query.0.limit.unwrap_or(50),
            query.0.offset.unwrap_or(0),
        )
        .await?;

    Ok(success::Success::ok(Some(messages)))
}

#[post("/conversations/{counterparty_id}/read")]
pub async fn mark_conversation_read(
    message_service: web::Data<MessageSvc>,
    counterparty_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let viewer = get_claims(&req)?.sub;
    message_service.mark_conversation_read(viewer, *counterparty_id).await?;
    Ok(success::Success::ok(None))
}

#[delete("/conversations/{counterparty_id}")]
pub async fn delete_conversation(
    message_service: web::Data<MessageSvc>,
    counterparty_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let viewer = get_claims(&req)?.sub;
    message_service.delete_conversation(viewer, *counterparty_id).await?;
    Ok(success::Success::no_content())
}

#[delete("/{message_id}")]
pub async fn delete_message(
    message_service: web::Data<MessageSvc>,
    message_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let viewer = get_claims(&req)?.sub;
    message_service.delete_message(viewer, *message_id).await?;
    Ok(success::Success::no_content())
}

#[get("/unread")]
pub async fn count_unread(
    message_service: web::Data<MessageSvc>,
    req: HttpRequest,
) -> Result<success::Success<UnreadCountResponse>, error::Error> {
    let viewer = get_claims(&req)?.sub;
    let unread = message_service.count_unread(viewer).await?;
    Ok(success::Success::ok(Some(UnreadCountResponse { unread })))
}

#[get("/unread/{counterparty_id}")]
pub async fn count_unread_from(
    message_service: web::Data<MessageSvc>,
    counterparty_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<UnreadCountResponse>, error::Error> {
    let viewer = get_claims(&req)?.sub;
    let unread = message_service.count_unread_from(viewer, *counterparty_id).await?;
    Ok(success::Success::ok(Some(UnreadCountResponse { unread })))
}
