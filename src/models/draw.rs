use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::draw_entity as draws;
use crate::error::AppResult;
use crate::utils::parse_numbers;

/// 录入开奖号码请求 (作用于当前轮次, 不需要也不接受轮次ID)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StoreResultsRequest {
    /// 开出的号码, 6-10 个, 1-45, 不重复
    #[schema(example = json!([4, 5, 6, 7, 8, 9]))]
    pub numbers: Vec<i32>,
}

/// 开奖结果响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawResponse {
    pub id: i64,
    pub round_id: i64,
    /// 开出的号码 (录入时的顺序)
    pub numbers: Vec<i32>,
    pub drawn_at: DateTime<Utc>,
}

impl DrawResponse {
    /// numbers 列存的是 JSON 文本, 解析可能失败, 因此不是 From
    pub fn from_model(m: draws::Model) -> AppResult<Self> {
        let numbers = parse_numbers(&m.numbers)?;
        Ok(DrawResponse {
            id: m.id,
            round_id: m.round_id,
            numbers,
            drawn_at: m.drawn_at,
        })
    }
}
