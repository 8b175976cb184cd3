use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::{draw_entity as draws, ticket_entity as tickets};
use crate::error::AppResult;
use crate::utils::{MatchOutcome, evaluate_match, parse_numbers};

use super::DrawResponse;

/// 购票请求
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateTicketRequest {
    /// 购票人自填识别码 (<= 20 字符)
    #[schema(example = "alice-01")]
    pub personal_id: String,
    /// 所选号码, 6-10 个, 1-45, 不重复; 顺序会原样保留
    #[schema(example = json!([3, 7, 15, 22, 31, 44]))]
    pub numbers: Vec<i32>,
    /// 购票页加载时查询到的轮次ID
    pub round_id: i64,
}

/// 彩票信息响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TicketResponse {
    pub id: Uuid,
    pub round_id: i64,
    pub personal_id: String,
    /// 购买时选择的号码 (原始顺序)
    pub numbers: Vec<i32>,
    pub created_at: DateTime<Utc>,
}

impl TicketResponse {
    pub fn from_model(m: tickets::Model) -> AppResult<Self> {
        let numbers = parse_numbers(&m.numbers)?;
        Ok(TicketResponse {
            id: m.id,
            round_id: m.round_id,
            personal_id: m.personal_id,
            numbers,
            created_at: m.created_at,
        })
    }
}

/// 查票响应。
/// 未开奖 (pending) 与已开奖但命中 0 个是两种不同状态,
/// 用 status 标签区分, 前者不携带任何比对字段
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TicketResultResponse {
    /// 所属轮次尚未开奖
    Pending { ticket: TicketResponse },
    /// 已开奖, 附带命中号码与数量
    Drawn {
        ticket: TicketResponse,
        draw: DrawResponse,
        matched_numbers: Vec<i32>,
        matched_count: usize,
    },
}

impl TicketResultResponse {
    pub fn build(ticket: tickets::Model, draw: Option<draws::Model>) -> AppResult<Self> {
        let ticket = TicketResponse::from_model(ticket)?;
        let Some(draw) = draw else {
            return Ok(TicketResultResponse::Pending { ticket });
        };
        let draw = DrawResponse::from_model(draw)?;

        match evaluate_match(&ticket.numbers, Some(&draw.numbers)) {
            MatchOutcome::Evaluated {
                matched_numbers,
                matched_count,
            } => Ok(TicketResultResponse::Drawn {
                ticket,
                draw,
                matched_numbers,
                matched_count,
            }),
            // 空的开奖记录不会入库, 保守处理成未开奖
            MatchOutcome::Unavailable => Ok(TicketResultResponse::Pending { ticket }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket_model(numbers: &str) -> tickets::Model {
        tickets::Model {
            id: Uuid::new_v4(),
            round_id: 1,
            personal_id: "alice-01".to_string(),
            numbers: numbers.to_string(),
            created_at: Utc::now(),
        }
    }

    fn draw_model(numbers: &str) -> draws::Model {
        draws::Model {
            id: 1,
            round_id: 1,
            numbers: numbers.to_string(),
            drawn_at: Utc::now(),
        }
    }

    #[test]
    fn test_pending_without_draw() {
        let result = TicketResultResponse::build(ticket_model("[1,2,3,4,5,6]"), None).unwrap();
        assert!(matches!(result, TicketResultResponse::Pending { .. }));
    }

    #[test]
    fn test_drawn_with_matches() {
        let result = TicketResultResponse::build(
            ticket_model("[1,2,3,4,5,6]"),
            Some(draw_model("[4,5,6,7,8,9]")),
        )
        .unwrap();
        match result {
            TicketResultResponse::Drawn {
                matched_numbers,
                matched_count,
                ..
            } => {
                assert_eq!(matched_numbers, vec![4, 5, 6]);
                assert_eq!(matched_count, 3);
            }
            other => panic!("Expected Drawn, got {other:?}"),
        }
    }

    #[test]
    fn test_corrupt_numbers_is_an_error() {
        assert!(TicketResultResponse::build(ticket_model("oops"), None).is_err());
    }
}
