use crate::entities::round_entity as rounds;
use crate::error::AppResult;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryOrder, Set, SqlErr,
};

/// “当前轮次” 的统一定义: id 最大的一条记录 (可能已关闭)。
/// 所有需要这个概念的地方都走这里, 避免各处自行定义 “当前”。
/// 泛型到 ConnectionTrait, 事务内也能使用
pub(crate) async fn find_current_round<C: ConnectionTrait>(
    conn: &C,
) -> Result<Option<rounds::Model>, DbErr> {
    rounds::Entity::find()
        .order_by_desc(rounds::Column::Id)
        .one(conn)
        .await
}

#[derive(Clone)]
pub struct RoundService {
    pool: DatabaseConnection,
}

impl RoundService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn get_current_round(&self) -> AppResult<Option<rounds::Model>> {
        Ok(find_current_round(&self.pool).await?)
    }

    /// 开启新一轮。已有活跃轮次时返回 None, 不做任何修改。
    /// 并发下先查后插并不够: rounds 上的部分唯一索引保证 is_active = true
    /// 至多一行, 两个并发请求只会有一个插入成功, 败方把唯一冲突
    /// 同样折算成 None
    pub async fn open_new_round(&self) -> AppResult<Option<rounds::Model>> {
        let last = find_current_round(&self.pool).await?;
        if let Some(last) = &last
            && last.is_active
        {
            return Ok(None);
        }

        let round_number = last.map(|r| r.round_number + 1).unwrap_or(1);

        let round = rounds::ActiveModel {
            round_number: Set(round_number),
            is_active: Set(true),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        match round.insert(&self.pool).await {
            Ok(model) => {
                log::info!("Opened round {} (id {})", model.round_number, model.id);
                Ok(Some(model))
            }
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                log::info!("open_new_round lost the race, an active round already exists");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// 关闭当前轮次并记录关闭时间。
    /// 无轮次或已关闭时返回 None; 更新按主键定位
    pub async fn close_round(&self) -> AppResult<Option<rounds::Model>> {
        let Some(current) = find_current_round(&self.pool).await? else {
            return Ok(None);
        };
        if !current.is_active {
            return Ok(None);
        }

        let mut round = current.into_active_model();
        round.is_active = Set(false);
        round.closed_at = Set(Some(Utc::now()));
        let closed = round.update(&self.pool).await?;

        log::info!("Closed round {} (id {})", closed.round_number, closed.id);
        Ok(Some(closed))
    }
}
