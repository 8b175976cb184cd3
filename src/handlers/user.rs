use crate::error::AppError;
use crate::external::Auth0Claims;
use crate::models::UserResponse;
use crate::services::UserService;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

/// 中间件验签后注入的声明
fn get_claims_from_request(req: &HttpRequest) -> Option<Auth0Claims> {
    req.extensions().get::<Auth0Claims>().cloned()
}

#[utoipa::path(
    get,
    path = "/admin/profile",
    tag = "admin",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "当前操作员的身份记录", body = UserResponse),
        (status = 401, description = "未授权")
    )
)]
/// 返回当前操作员的身份记录, 同时刷新 email / name / last_login
pub async fn get_profile(
    service: web::Data<UserService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let Some(claims) = get_claims_from_request(&req) else {
        return Ok(AppError::AuthError("Missing access token".to_string()).error_response());
    };

    match service.sync_user(&claims).await {
        Ok(user) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": UserResponse::from(user)
        }))),
        Err(e) => Ok(e.error_response()),
    }
}
