use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::TicketService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/tickets",
    tag = "tickets",
    request_body = CreateTicketRequest,
    responses(
        (status = 201, description = "购票成功", body = TicketResponse),
        (status = 400, description = "号码或识别码不合法 / 该轮已停售")
    )
)]
/// 购票: 对 round_id 指定的轮次提交一组号码。
/// round_id 应取自购票页加载时的 “当前轮次” 查询结果
pub async fn create_ticket(
    service: web::Data<TicketService>,
    request: web::Json<CreateTicketRequest>,
) -> Result<HttpResponse> {
    let result = service
        .create_ticket(request.into_inner())
        .await
        .and_then(TicketResponse::from_model);

    match result {
        Ok(ticket) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": ticket
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/tickets/{ticket_id}",
    tag = "tickets",
    params(
        ("ticket_id" = Uuid, Path, description = "彩票ID")
    ),
    responses(
        (status = 200, description = "彩票信息, 已开奖时附带比对结果", body = TicketResultResponse),
        (status = 404, description = "彩票不存在")
    )
)]
/// 查票: 未开奖返回 pending, 已开奖返回命中号码与数量
pub async fn get_ticket(
    service: web::Data<TicketService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let ticket_id = path.into_inner();

    match service.get_ticket_with_result(ticket_id).await {
        Ok(Some((ticket, draw))) => match TicketResultResponse::build(ticket, draw) {
            Ok(data) => Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "data": data
            }))),
            Err(e) => Ok(e.error_response()),
        },
        Ok(None) => {
            Ok(AppError::NotFound(format!("No ticket found with ID {ticket_id}")).error_response())
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/rounds/{round_id}/tickets",
    tag = "admin",
    params(
        ("round_id" = i64, Path, description = "轮次ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "该轮全部彩票", body = [TicketResponse]),
        (status = 401, description = "未授权")
    )
)]
/// 某一轮的全部彩票 (运营端)
pub async fn list_round_tickets(
    service: web::Data<TicketService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let round_id = path.into_inner();

    let result = service.list_round_tickets(round_id).await.and_then(|list| {
        list.into_iter()
            .map(TicketResponse::from_model)
            .collect::<AppResult<Vec<_>>>()
    });

    match result {
        Ok(tickets) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": tickets
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置 (公开部分; 按轮列票注册在 admin 作用域下)
pub fn ticket_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tickets")
            .route("", web::post().to(create_ticket))
            .route("/{ticket_id}", web::get().to(get_ticket)),
    );
}
