use crate::modules::friend::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/friends")
            .service(list_requests)
            .service(send_request)
            .service(accept_request)
            .service(decline_request)
            .service(cancel_request)
            .service(list_blocked)
            .service(block_user)
            .service(unblock_user)
            .service(list_friends)
            .service(remove_friend),
    );
}
