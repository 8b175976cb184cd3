use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 抽奖轮次实体
/// 说明:
/// - 任一时刻全系统至多一条 is_active = true 的记录 (部分唯一索引保证)
/// - round_number 面向用户, 从 1 开始单调递增, 关闭后不复用
/// - 轮次只会被关闭, 不会被删除
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "rounds")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// 面向用户的轮次编号
    pub round_number: i64,
    /// 是否仍在售票
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    /// 关闭时间, 未关闭为 NULL
    pub closed_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
