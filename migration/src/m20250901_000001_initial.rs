use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Statement;

/// Rounds (抽奖轮次)
#[derive(DeriveIden)]
enum Rounds {
    Table,
    Id,
    RoundNumber,
    IsActive,
    CreatedAt,
    ClosedAt,
}

/// Tickets (彩票, 号码以 JSON 文本按原始顺序存储)
#[derive(DeriveIden)]
enum Tickets {
    Table,
    Id,
    RoundId,
    PersonalId,
    Numbers,
    CreatedAt,
}

/// Draws (开奖结果, 每轮至多一条)
#[derive(DeriveIden)]
enum Draws {
    Table,
    Id,
    RoundId,
    Numbers,
    DrawnAt,
}

/// Users (身份提供方同步来的操作员记录)
#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    Name,
    CreatedAt,
    LastLogin,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 两个并发敏感的约束都落在存储层, 不依赖应用侧的先查后写:
/// - rounds 上的部分唯一索引保证任一时刻至多一条 is_active = true
/// - draws.round_id 唯一索引保证每轮至多一条开奖结果
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rounds::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rounds::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Rounds::RoundNumber)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Rounds::IsActive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Rounds::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(ColumnDef::new(Rounds::ClosedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // 部分唯一索引 (sea-query 的 DSL 不支持 WHERE 子句, 用原生 SQL)
        manager
            .get_connection()
            .execute(Statement::from_string(
                manager.get_database_backend(),
                "CREATE UNIQUE INDEX uq_rounds_single_active ON rounds (is_active) WHERE is_active"
                    .to_owned(),
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tickets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tickets::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Tickets::RoundId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Tickets::PersonalId)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Tickets::Numbers).text().not_null())
                    .col(
                        ColumnDef::new(Tickets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tickets_round_id")
                            .from(Tickets::Table, Tickets::RoundId)
                            .to(Rounds::Table, Rounds::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tickets_round_id")
                    .table(Tickets::Table)
                    .col(Tickets::RoundId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Draws::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Draws::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Draws::RoundId).big_integer().not_null())
                    .col(ColumnDef::new(Draws::Numbers).text().not_null())
                    .col(
                        ColumnDef::new(Draws::DrawnAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_draws_round_id")
                            .from(Draws::Table, Draws::RoundId)
                            .to(Rounds::Table, Rounds::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .name("uq_draws_round_id")
                    .table(Draws::Table)
                    .col(Draws::RoundId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .string_len(255)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Email).string_len(255))
                    .col(ColumnDef::new(Users::Name).string_len(255))
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(ColumnDef::new(Users::LastLogin).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Draws::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tickets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Rounds::Table).to_owned())
            .await?;
        Ok(())
    }
}
