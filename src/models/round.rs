use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::round_entity as rounds;

/// 轮次信息响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoundResponse {
    pub id: i64,
    /// 面向用户的轮次编号 (从 1 开始)
    pub round_number: i64,
    /// 是否仍在售票
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    /// 关闭时间, 未关闭为 null
    pub closed_at: Option<DateTime<Utc>>,
}

impl From<rounds::Model> for RoundResponse {
    fn from(m: rounds::Model) -> Self {
        RoundResponse {
            id: m.id,
            round_number: m.round_number,
            is_active: m.is_active,
            created_at: m.created_at,
            closed_at: m.closed_at,
        }
    }
}
