use crate::entities::{draw_entity as draws, round_entity as rounds, ticket_entity as tickets};
use crate::error::{AppError, AppResult};
use crate::models::CreateTicketRequest;
use crate::utils::{serialize_numbers, validate_number_set};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

/// 购票人自填识别码的长度上限
pub const PERSONAL_ID_MAX_LEN: usize = 20;

#[derive(Clone)]
pub struct TicketService {
    pool: DatabaseConnection,
}

impl TicketService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 购票。
    /// round_id 信任调用方 (购票页加载时从 “当前轮次” 查询得来),
    /// 这里不重新解析 “当前轮次”, 只确认该轮在写入时刻仍在售票 —
    /// 这样页面加载后轮次被关闭的情况也会被拒绝
    pub async fn create_ticket(&self, request: CreateTicketRequest) -> AppResult<tickets::Model> {
        if request.personal_id.is_empty() {
            return Err(AppError::ValidationError(
                "Personal ID is required".to_string(),
            ));
        }
        if request.personal_id.chars().count() > PERSONAL_ID_MAX_LEN {
            return Err(AppError::ValidationError(format!(
                "Personal ID must be {PERSONAL_ID_MAX_LEN} characters or less"
            )));
        }
        validate_number_set(&request.numbers)?;

        let round = rounds::Entity::find_by_id(request.round_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::StateConflict("Round does not exist".to_string()))?;
        if !round.is_active {
            return Err(AppError::StateConflict(
                "Ticket sales for this round are closed".to_string(),
            ));
        }

        let ticket = tickets::ActiveModel {
            id: Set(Uuid::new_v4()),
            round_id: Set(round.id),
            personal_id: Set(request.personal_id),
            numbers: Set(serialize_numbers(&request.numbers)?),
            created_at: Set(Utc::now()),
        };

        Ok(ticket.insert(&self.pool).await?)
    }

    pub async fn get_ticket(&self, ticket_id: Uuid) -> AppResult<Option<tickets::Model>> {
        Ok(tickets::Entity::find_by_id(ticket_id)
            .one(&self.pool)
            .await?)
    }

    /// 查票并带出所属轮次的开奖结果 (未开奖时为 None)
    pub async fn get_ticket_with_result(
        &self,
        ticket_id: Uuid,
    ) -> AppResult<Option<(tickets::Model, Option<draws::Model>)>> {
        let Some(ticket) = self.get_ticket(ticket_id).await? else {
            return Ok(None);
        };

        let draw = draws::Entity::find()
            .filter(draws::Column::RoundId.eq(ticket.round_id))
            .one(&self.pool)
            .await?;

        Ok(Some((ticket, draw)))
    }

    /// 某一轮的全部彩票, 按购买时间排序 (运营端查看)
    pub async fn list_round_tickets(&self, round_id: i64) -> AppResult<Vec<tickets::Model>> {
        Ok(tickets::Entity::find()
            .filter(tickets::Column::RoundId.eq(round_id))
            .order_by_asc(tickets::Column::CreatedAt)
            .all(&self.pool)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn request(personal_id: &str, numbers: Vec<i32>) -> CreateTicketRequest {
        CreateTicketRequest {
            personal_id: personal_id.to_string(),
            numbers,
            round_id: 1,
        }
    }

    fn round(active: bool) -> rounds::Model {
        rounds::Model {
            id: 1,
            round_number: 1,
            is_active: active,
            created_at: Utc::now(),
            closed_at: if active { None } else { Some(Utc::now()) },
        }
    }

    fn empty_db() -> DatabaseConnection {
        MockDatabase::new(DatabaseBackend::Postgres).into_connection()
    }

    #[tokio::test]
    async fn test_rejects_empty_personal_id() {
        let result = TicketService::new(empty_db())
            .create_ticket(request("", vec![1, 2, 3, 4, 5, 6]))
            .await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_rejects_oversized_personal_id() {
        let result = TicketService::new(empty_db())
            .create_ticket(request("x".repeat(21).as_str(), vec![1, 2, 3, 4, 5, 6]))
            .await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_rejects_invalid_numbers_before_touching_store() {
        let result = TicketService::new(empty_db())
            .create_ticket(request("alice-01", vec![1, 2, 3]))
            .await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_rejects_unknown_round() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<rounds::Model>::new()])
            .into_connection();

        let result = TicketService::new(db)
            .create_ticket(request("alice-01", vec![1, 2, 3, 4, 5, 6]))
            .await;
        assert!(matches!(result, Err(AppError::StateConflict(_))));
    }

    #[tokio::test]
    async fn test_rejects_closed_round() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![round(false)]])
            .into_connection();

        let result = TicketService::new(db)
            .create_ticket(request("alice-01", vec![1, 2, 3, 4, 5, 6]))
            .await;
        assert!(matches!(result, Err(AppError::StateConflict(_))));
    }

    #[tokio::test]
    async fn test_creates_ticket_against_active_round() {
        let stored = tickets::Model {
            id: Uuid::new_v4(),
            round_id: 1,
            personal_id: "alice-01".to_string(),
            numbers: "[9,1,5,23,44,12]".to_string(),
            created_at: Utc::now(),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![round(true)]])
            .append_query_results([vec![stored.clone()]])
            .into_connection();

        let created = TicketService::new(db)
            .create_ticket(request("alice-01", vec![9, 1, 5, 23, 44, 12]))
            .await
            .unwrap();
        assert_eq!(created.round_id, 1);
        // 顺序原样入库, 不做排序归一化
        assert_eq!(created.numbers, "[9,1,5,23,44,12]");
    }
}
