use sea_orm_migration::{prelude::*, schema::*};

static IDX_ARENA_NAME: &str = "idx-arena-name";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Arena::Table)
                    .if_not_exists()
                    .col(pk_uuid(Arena::Id))
                    .col(string_len(Arena::Name, 100))
                    .col(text(Arena::Description))
                    .col(integer(Arena::Capacity))
                    .col(string_len(Arena::Location, 200))
                    .col(string_null(Arena::ImgUrl))
                    .col(text_null(Arena::OpeningHoursText))
                    .col(string_null(Arena::GoogleMapsUrl))
                    .col(timestamp(Arena::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ARENA_NAME)
                    .table(Arena::Table)
                    .col(Arena::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name(IDX_ARENA_NAME).table(Arena::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Arena::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Arena {
    Table,
    Id,
    Name,
    Description,
    Capacity,
    Location,
    ImgUrl,
    OpeningHoursText,
    GoogleMapsUrl,
    CreatedAt,
}
