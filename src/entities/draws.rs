use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 开奖结果实体
/// - 每轮至多一条 (round_id 唯一索引), 写入后不可变
/// - 与彩票之间没有直接引用, 中奖情况按需通过共同的轮次计算
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "draws")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// 所属轮次 (外键, 唯一)
    pub round_id: i64,
    /// 有序号码列表 (JSON 文本, 与彩票同一套编码)
    pub numbers: String,
    pub drawn_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
