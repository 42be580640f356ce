use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000001_rink_user::RinkUser;

static FK_POST_AUTHOR_ID: &str = "fk-forum_post-author_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ForumPost::Table)
                    .if_not_exists()
                    .col(pk_auto(ForumPost::Id))
                    .col(integer_null(ForumPost::AuthorId))
                    .col(string_len(ForumPost::Title, 200))
                    .col(text(ForumPost::Content))
                    .col(string_null(ForumPost::ThumbnailUrl))
                    .col(timestamp(ForumPost::CreatedAt))
                    .col(timestamp(ForumPost::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_POST_AUTHOR_ID)
                    .from_tbl(ForumPost::Table)
                    .from_col(ForumPost::AuthorId)
                    .to_tbl(RinkUser::Table)
                    .to_col(RinkUser::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_POST_AUTHOR_ID)
                    .table(ForumPost::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ForumPost::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum ForumPost {
    Table,
    Id,
    AuthorId,
    Title,
    Content,
    ThumbnailUrl,
    CreatedAt,
    UpdatedAt,
}
