use sea_orm_migration::{prelude::*, schema::*};

static IDX_EVENT_DATE: &str = "idx-event-date";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Event::Table)
                    .if_not_exists()
                    .col(pk_auto(Event::Id))
                    .col(string_len_uniq(Event::Slug, 250))
                    .col(string_len(Event::Name, 200))
                    .col(text(Event::Description))
                    .col(string_len(Event::Category, 50))
                    .col(string_len(Event::Level, 20))
                    .col(date(Event::Date))
                    .col(time(Event::StartTime))
                    .col(time(Event::EndTime))
                    .col(string_len(Event::Location, 200))
                    .col(big_integer(Event::RegistrationFee).default(0))
                    .col(integer_null(Event::MaxParticipants))
                    .col(boolean(Event::IsActive).default(true))
                    .col(timestamp(Event::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_EVENT_DATE)
                    .table(Event::Table)
                    .col(Event::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name(IDX_EVENT_DATE).table(Event::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Event::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Event {
    Table,
    Id,
    Slug,
    Name,
    Description,
    Category,
    Level,
    Date,
    StartTime,
    EndTime,
    Location,
    RegistrationFee,
    MaxParticipants,
    IsActive,
    CreatedAt,
}
