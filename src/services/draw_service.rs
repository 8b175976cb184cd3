use crate::entities::draw_entity as draws;
use crate::error::{AppError, AppResult};
use crate::services::round_service::find_current_round;
use crate::utils::{serialize_numbers, validate_number_set};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr,
    TransactionTrait,
};

#[derive(Clone)]
pub struct DrawService {
    pool: DatabaseConnection,
}

impl DrawService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 录入当前轮次的开奖号码。
    /// 与购票不同, 这里不接受调用方指定轮次, 始终作用于最新一轮:
    /// 该轮必须已关闭且尚未录入过结果。
    /// 关轮 -> 录入是两步操作, 由调用方按顺序触发, 本服务不代为关轮
    pub async fn store_draw_results(&self, numbers: &[i32]) -> AppResult<draws::Model> {
        validate_number_set(numbers)?;

        let txn = self.pool.begin().await?;

        let current = find_current_round(&txn)
            .await?
            .ok_or_else(|| AppError::StateConflict("No round exists".to_string()))?;
        if current.is_active {
            return Err(AppError::StateConflict(
                "Round must be closed before results can be stored".to_string(),
            ));
        }

        let existing = draws::Entity::find()
            .filter(draws::Column::RoundId.eq(current.id))
            .one(&txn)
            .await?;
        if existing.is_some() {
            return Err(AppError::StateConflict(
                "Results already exist for this round".to_string(),
            ));
        }

        let draw = draws::ActiveModel {
            round_id: Set(current.id),
            numbers: Set(serialize_numbers(numbers)?),
            drawn_at: Set(Utc::now()),
            ..Default::default()
        };

        // draws.round_id 上的唯一索引兜底: 并发双写时败方在这里收到唯一冲突
        let draw = match draw.insert(&txn).await {
            Ok(model) => model,
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                return Err(AppError::StateConflict(
                    "Results already exist for this round".to_string(),
                ));
            }
            Err(e) => return Err(e.into()),
        };

        txn.commit().await?;

        log::info!("Stored draw results for round id {}", draw.round_id);
        Ok(draw)
    }

    /// 查询某一轮的开奖结果
    pub async fn get_draw_results(&self, round_id: i64) -> AppResult<Option<draws::Model>> {
        Ok(draws::Entity::find()
            .filter(draws::Column::RoundId.eq(round_id))
            .one(&self.pool)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::round_entity as rounds;
    use sea_orm::{DatabaseBackend, MockDatabase};

    const NUMBERS: [i32; 6] = [4, 5, 6, 7, 8, 9];

    fn round(active: bool) -> rounds::Model {
        rounds::Model {
            id: 1,
            round_number: 1,
            is_active: active,
            created_at: Utc::now(),
            closed_at: if active { None } else { Some(Utc::now()) },
        }
    }

    fn draw() -> draws::Model {
        draws::Model {
            id: 1,
            round_id: 1,
            numbers: "[4,5,6,7,8,9]".to_string(),
            drawn_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_rejects_invalid_numbers_before_touching_store() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let result = DrawService::new(db).store_draw_results(&[1, 2, 3]).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_rejects_when_no_round_exists() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<rounds::Model>::new()])
            .into_connection();

        let result = DrawService::new(db).store_draw_results(&NUMBERS).await;
        assert!(matches!(result, Err(AppError::StateConflict(_))));
    }

    #[tokio::test]
    async fn test_rejects_while_round_still_active() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![round(true)]])
            .into_connection();

        let result = DrawService::new(db).store_draw_results(&NUMBERS).await;
        assert!(matches!(result, Err(AppError::StateConflict(_))));
    }

    #[tokio::test]
    async fn test_rejects_second_store_for_same_round() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![round(false)]])
            .append_query_results([vec![draw()]])
            .into_connection();

        let result = DrawService::new(db).store_draw_results(&NUMBERS).await;
        assert!(matches!(result, Err(AppError::StateConflict(_))));
    }

    #[tokio::test]
    async fn test_stores_results_for_closed_round_once() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![round(false)]])
            .append_query_results([Vec::<draws::Model>::new()])
            .append_query_results([vec![draw()]])
            .into_connection();

        let stored = DrawService::new(db)
            .store_draw_results(&NUMBERS)
            .await
            .unwrap();
        assert_eq!(stored.round_id, 1);
        assert_eq!(stored.numbers, "[4,5,6,7,8,9]");
    }
}
