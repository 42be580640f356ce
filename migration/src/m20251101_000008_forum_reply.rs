use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20251101_000001_rink_user::RinkUser, m20251101_000007_forum_post::ForumPost};

static IDX_REPLY_POST_ID: &str = "idx-forum_reply-post_id";
static FK_REPLY_POST_ID: &str = "fk-forum_reply-post_id";
static FK_REPLY_AUTHOR_ID: &str = "fk-forum_reply-author_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ForumReply::Table)
                    .if_not_exists()
                    .col(pk_auto(ForumReply::Id))
                    .col(integer(ForumReply::PostId))
                    .col(integer(ForumReply::AuthorId))
                    .col(text(ForumReply::Content))
                    .col(timestamp(ForumReply::CreatedAt))
                    .col(timestamp(ForumReply::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_REPLY_POST_ID)
                    .table(ForumReply::Table)
                    .col(ForumReply::PostId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_REPLY_POST_ID)
                    .from_tbl(ForumReply::Table)
                    .from_col(ForumReply::PostId)
                    .to_tbl(ForumPost::Table)
                    .to_col(ForumPost::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_REPLY_AUTHOR_ID)
                    .from_tbl(ForumReply::Table)
                    .from_col(ForumReply::AuthorId)
                    .to_tbl(RinkUser::Table)
                    .to_col(RinkUser::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for fk in [FK_REPLY_AUTHOR_ID, FK_REPLY_POST_ID] {
            manager
                .drop_foreign_key(ForeignKey::drop().name(fk).table(ForumReply::Table).to_owned())
                .await?;
        }

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_REPLY_POST_ID)
                    .table(ForumReply::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ForumReply::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum ForumReply {
    Table,
    Id,
    PostId,
    AuthorId,
    Content,
    CreatedAt,
    UpdatedAt,
}
