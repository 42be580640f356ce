use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20251101_000001_rink_user::RinkUser, m20251101_000002_arena::Arena};

/// One row per slot. Cancelled and completed rows are reused for new bookings.
static IDX_BOOKING_SLOT: &str = "idx-booking-arena_id-date-start_hour";
static IDX_BOOKING_USER_ID: &str = "idx-booking-user_id";
static FK_BOOKING_ARENA_ID: &str = "fk-booking-arena_id";
static FK_BOOKING_USER_ID: &str = "fk-booking-user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(pk_uuid(Booking::Id))
                    .col(uuid(Booking::ArenaId))
                    .col(integer(Booking::UserId))
                    .col(date(Booking::Date))
                    .col(integer(Booking::StartHour))
                    .col(timestamp(Booking::BookedAt))
                    .col(string_len(Booking::Status, 10).default("Booked"))
                    .col(string_len_null(Booking::Activity, 50))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_BOOKING_SLOT)
                    .table(Booking::Table)
                    .col(Booking::ArenaId)
                    .col(Booking::Date)
                    .col(Booking::StartHour)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_BOOKING_USER_ID)
                    .table(Booking::Table)
                    .col(Booking::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_BOOKING_ARENA_ID)
                    .from_tbl(Booking::Table)
                    .from_col(Booking::ArenaId)
                    .to_tbl(Arena::Table)
                    .to_col(Arena::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_BOOKING_USER_ID)
                    .from_tbl(Booking::Table)
                    .from_col(Booking::UserId)
                    .to_tbl(RinkUser::Table)
                    .to_col(RinkUser::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for fk in [FK_BOOKING_USER_ID, FK_BOOKING_ARENA_ID] {
            manager
                .drop_foreign_key(ForeignKey::drop().name(fk).table(Booking::Table).to_owned())
                .await?;
        }

        for idx in [IDX_BOOKING_USER_ID, IDX_BOOKING_SLOT] {
            manager
                .drop_index(Index::drop().name(idx).table(Booking::Table).to_owned())
                .await?;
        }

        manager
            .drop_table(Table::drop().table(Booking::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Booking {
    Table,
    Id,
    ArenaId,
    UserId,
    Date,
    StartHour,
    BookedAt,
    Status,
    Activity,
}
