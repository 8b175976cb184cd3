use crate::models::*;
use crate::services::DrawService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/admin/results",
    tag = "admin",
    request_body = StoreResultsRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "开奖结果已录入", body = DrawResponse),
        (status = 400, description = "轮次未关闭 / 结果已存在 / 号码不合法"),
        (status = 401, description = "未授权")
    )
)]
/// 录入当前轮次的开奖号码。
/// 该轮必须先通过关轮接口关闭; 每轮只能录入一次
pub async fn store_results(
    service: web::Data<DrawService>,
    request: web::Json<StoreResultsRequest>,
) -> Result<HttpResponse> {
    let result = service
        .store_draw_results(&request.numbers)
        .await
        .and_then(DrawResponse::from_model);

    match result {
        Ok(draw) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": draw
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/results/{round_id}",
    tag = "results",
    params(
        ("round_id" = i64, Path, description = "轮次ID")
    ),
    responses(
        (status = 200, description = "开奖结果, 未开奖时 data 为 null", body = DrawResponse)
    )
)]
/// 查询某一轮的开奖结果
pub async fn get_results(
    service: web::Data<DrawService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let round_id = path.into_inner();

    let result = service
        .get_draw_results(round_id)
        .await
        .and_then(|draw| draw.map(DrawResponse::from_model).transpose());

    match result {
        Ok(draw) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": draw
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置 (公开查询部分; 录入结果注册在 admin 作用域下)
pub fn result_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/results").route("/{round_id}", web::get().to(get_results)));
}
