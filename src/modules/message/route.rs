use crate::modules::message::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/messages")
            .service(send_message)
            .service(list_conversations)
            .service(get_conversation)
            .service(mark_conversation_read)
            .service(delete_conversation)
            .service(count_unread)
            .service(count_unread_from)
            .service(delete_message),
    );
}
