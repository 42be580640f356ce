use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000002_arena::Arena;

static IDX_OPENING_HOURS_ARENA_DAY: &str = "idx-arena_opening_hours-arena_id-day";
static FK_OPENING_HOURS_ARENA_ID: &str = "fk-arena_opening_hours-arena_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ArenaOpeningHours::Table)
                    .if_not_exists()
                    .col(pk_auto(ArenaOpeningHours::Id))
                    .col(uuid(ArenaOpeningHours::ArenaId))
                    .col(integer(ArenaOpeningHours::Day))
                    .col(time_null(ArenaOpeningHours::OpenTime))
                    .col(time_null(ArenaOpeningHours::CloseTime))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_OPENING_HOURS_ARENA_DAY)
                    .table(ArenaOpeningHours::Table)
                    .col(ArenaOpeningHours::ArenaId)
                    .col(ArenaOpeningHours::Day)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_OPENING_HOURS_ARENA_ID)
                    .from_tbl(ArenaOpeningHours::Table)
                    .from_col(ArenaOpeningHours::ArenaId)
                    .to_tbl(Arena::Table)
                    .to_col(Arena::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_OPENING_HOURS_ARENA_ID)
                    .table(ArenaOpeningHours::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_OPENING_HOURS_ARENA_DAY)
                    .table(ArenaOpeningHours::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ArenaOpeningHours::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum ArenaOpeningHours {
    Table,
    Id,
    ArenaId,
    Day,
    OpenTime,
    CloseTime,
}
