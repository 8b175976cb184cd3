use actix_web::web;

use super::{draw, round, ticket, user};

/// 运营端路由配置: 这些路径都在鉴权中间件的保护范围内
pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/rounds/open", web::post().to(round::open_round))
            .route("/rounds/close", web::post().to(round::close_round))
            .route(
                "/rounds/{round_id}/tickets",
                web::get().to(ticket::list_round_tickets),
            )
            .route("/results", web::post().to(draw::store_results))
            .route("/profile", web::get().to(user::get_profile)),
    );
}
