use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseBackend;

/// Participation codes (일회용 참여 코드)
#[derive(DeriveIden)]
enum ParticipationCodes {
    Table,
    Id,
    Code,
    IsUsed,
    CreatedAt,
    UsedAt,
}

/// Prize catalog (경품)
#[derive(DeriveIden)]
enum Prizes {
    Table,
    Id,
    Name,
    ImageUrl,
    Stock,
    Weight,
    FulfillmentGoodsCode,
    CreatedAt,
    UpdatedAt,
}

/// Winner ledger (당첨자)
#[derive(DeriveIden)]
enum Winners {
    Table,
    Id,
    ParticipationCodeId,
    PrizeId,
    UserPhoneNumber,
    FulfillmentTransactionId,
    SentAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// SQLite only accepts AUTOINCREMENT on `INTEGER PRIMARY KEY`, which is 64-bit there
fn id_column<T: IntoIden>(backend: DatabaseBackend, name: T) -> ColumnDef {
    let mut column = ColumnDef::new(name);
    match backend {
        DatabaseBackend::Sqlite => column.integer(),
        _ => column.big_integer(),
    };
    column.not_null().auto_increment().primary_key();
    column
}

/// Timestamps default to CURRENT_TIMESTAMP so the schema runs on both
/// PostgreSQL and SQLite.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();

        manager
            .create_table(
                Table::create()
                    .table(ParticipationCodes::Table)
                    .if_not_exists()
                    .col(&mut id_column(backend, ParticipationCodes::Id))
                    .col(
                        ColumnDef::new(ParticipationCodes::Code)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ParticipationCodes::IsUsed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ParticipationCodes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ParticipationCodes::UsedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // admin 목록은 최신순 조회
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_participation_codes_created_at")
                    .table(ParticipationCodes::Table)
                    .col(ParticipationCodes::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Prizes::Table)
                    .if_not_exists()
                    .col(&mut id_column(backend, Prizes::Id))
                    .col(ColumnDef::new(Prizes::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Prizes::ImageUrl)
                            .string_len(512)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Prizes::Stock)
                            .big_integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Prizes::Stock).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Prizes::Weight)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Prizes::Weight).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Prizes::FulfillmentGoodsCode)
                            .string_len(64)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Prizes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Prizes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Winners::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Winners::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Winners::ParticipationCodeId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Winners::PrizeId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Winners::UserPhoneNumber)
                            .string_len(32)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Winners::FulfillmentTransactionId)
                            .string_len(64)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Winners::SentAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Winners::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Winners::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    // 기록 보존: ON DELETE CASCADE 없음
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_winners_participation_code")
                            .from(Winners::Table, Winners::ParticipationCodeId)
                            .to(ParticipationCodes::Table, ParticipationCodes::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_winners_prize")
                            .from(Winners::Table, Winners::PrizeId)
                            .to(Prizes::Table, Prizes::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_winners_prize")
                    .table(Winners::Table)
                    .col(Winners::PrizeId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // winners -> prizes -> participation_codes
        manager
            .drop_table(Table::drop().if_exists().table(Winners::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Prizes::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(ParticipationCodes::Table)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
