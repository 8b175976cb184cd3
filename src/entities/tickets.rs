use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 彩票实体
/// - 写入后不可变, 没有任何更新路径
/// - numbers 为 JSON 文本, 保留购买时的号码顺序, 读取需经 utils::numbers 解析
/// - personal_id 不做唯一约束, 同一人可以买多张
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "tickets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// 所属轮次 (外键)
    pub round_id: i64,
    /// 购票人自填识别码 (<= 20 字符)
    pub personal_id: String,
    /// 有序号码列表 (JSON 文本)
    pub numbers: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
