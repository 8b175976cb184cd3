use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::round::get_current_round,
        handlers::round::open_round,
        handlers::round::close_round,
        handlers::ticket::create_ticket,
        handlers::ticket::get_ticket,
        handlers::ticket::list_round_tickets,
        handlers::draw::store_results,
        handlers::draw::get_results,
        handlers::user::get_profile,
    ),
    components(
        schemas(
            RoundResponse,
            CreateTicketRequest,
            TicketResponse,
            TicketResultResponse,
            StoreResultsRequest,
            DrawResponse,
            UserResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "rounds", description = "轮次查询"),
        (name = "tickets", description = "购票与查票"),
        (name = "results", description = "开奖结果查询"),
        (name = "admin", description = "运营操作, 需要 Bearer 凭证")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}
