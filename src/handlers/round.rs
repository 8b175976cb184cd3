use crate::models::*;
use crate::services::RoundService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/rounds/current",
    tag = "rounds",
    responses(
        (status = 200, description = "当前轮次, 从未开过轮时 data 为 null", body = RoundResponse)
    )
)]
/// 查询当前轮次: 定义为 id 最大的一条, 可能已经关闭。
/// 购票页靠它拿到 round_id
pub async fn get_current_round(service: web::Data<RoundService>) -> Result<HttpResponse> {
    match service.get_current_round().await {
        Ok(round) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": round.map(RoundResponse::from)
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/rounds/open",
    tag = "admin",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "新轮次已开启", body = RoundResponse),
        (status = 204, description = "已有活跃轮次, 未做任何修改"),
        (status = 401, description = "未授权")
    )
)]
/// 开启新一轮售票。已有活跃轮次时为 204 空操作
pub async fn open_round(service: web::Data<RoundService>) -> Result<HttpResponse> {
    match service.open_new_round().await {
        Ok(Some(round)) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": RoundResponse::from(round)
        }))),
        Ok(None) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/rounds/close",
    tag = "admin",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "轮次已关闭", body = RoundResponse),
        (status = 204, description = "没有可关闭的轮次"),
        (status = 401, description = "未授权")
    )
)]
/// 关闭当前轮次, 停止售票。
/// 开奖号码需随后单独录入, 本接口不代劳
pub async fn close_round(service: web::Data<RoundService>) -> Result<HttpResponse> {
    match service.close_round().await {
        Ok(Some(round)) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": RoundResponse::from(round)
        }))),
        Ok(None) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置 (公开部分; 开轮/关轮注册在 admin 作用域下)
pub fn round_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/rounds").route("/current", web::get().to(get_current_round)));
}
