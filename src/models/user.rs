use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::user_entity as users;

/// 操作员身份记录响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// 身份提供方的 subject
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<users::Model> for UserResponse {
    fn from(m: users::Model) -> Self {
        UserResponse {
            id: m.id,
            email: m.email,
            name: m.name,
            created_at: m.created_at,
            last_login: m.last_login,
        }
    }
}
