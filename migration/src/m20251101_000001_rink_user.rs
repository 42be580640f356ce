use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RinkUser::Table)
                    .if_not_exists()
                    .col(pk_auto(RinkUser::Id))
                    .col(string_len_uniq(RinkUser::Username, 150))
                    .col(string(RinkUser::PasswordHash))
                    .col(string_null(RinkUser::Email))
                    .col(boolean(RinkUser::IsAdmin).default(false))
                    .col(timestamp(RinkUser::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RinkUser::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum RinkUser {
    Table,
    Id,
    Username,
    PasswordHash,
    Email,
    IsAdmin,
    CreatedAt,
}
