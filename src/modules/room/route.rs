use crate::modules::room::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/rooms")
            .service(create_room)
            .service(list_my_rooms)
            .service(list_members)
            .service(join_room)
            .service(leave_room)
            .service(invite_member)
            .service(kick_member)
            .service(update_member_role)
            .service(set_muted)
            .service(mark_room_read)
            .service(get_room)
            .service(update_room)
            .service(delete_room),
    );
}
