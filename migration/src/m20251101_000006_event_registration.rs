use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20251101_000001_rink_user::RinkUser, m20251101_000005_event::Event};

static IDX_REGISTRATION_USER_EVENT: &str = "idx-event_registration-user_id-event_id";
static FK_REGISTRATION_EVENT_ID: &str = "fk-event_registration-event_id";
static FK_REGISTRATION_USER_ID: &str = "fk-event_registration-user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EventRegistration::Table)
                    .if_not_exists()
                    .col(pk_auto(EventRegistration::Id))
                    .col(integer(EventRegistration::EventId))
                    .col(integer(EventRegistration::UserId))
                    .col(timestamp(EventRegistration::RegisteredAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_REGISTRATION_USER_EVENT)
                    .table(EventRegistration::Table)
                    .col(EventRegistration::UserId)
                    .col(EventRegistration::EventId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_REGISTRATION_EVENT_ID)
                    .from_tbl(EventRegistration::Table)
                    .from_col(EventRegistration::EventId)
                    .to_tbl(Event::Table)
                    .to_col(Event::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_REGISTRATION_USER_ID)
                    .from_tbl(EventRegistration::Table)
                    .from_col(EventRegistration::UserId)
                    .to_tbl(RinkUser::Table)
                    .to_col(RinkUser::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for fk in [FK_REGISTRATION_USER_ID, FK_REGISTRATION_EVENT_ID] {
            manager
                .drop_foreign_key(
                    ForeignKey::drop()
                        .name(fk)
                        .table(EventRegistration::Table)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_REGISTRATION_USER_EVENT)
                    .table(EventRegistration::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(EventRegistration::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum EventRegistration {
    Table,
    Id,
    EventId,
    UserId,
    RegisteredAt,
}
