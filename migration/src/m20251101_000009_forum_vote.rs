use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20251101_000001_rink_user::RinkUser, m20251101_000007_forum_post::ForumPost,
    m20251101_000008_forum_reply::ForumReply,
};

static IDX_VOTE_VOTER_POST: &str = "idx-forum_vote-voter-post_id";
static IDX_VOTE_VOTER_REPLY: &str = "idx-forum_vote-voter-reply_id";
static FK_VOTE_USER_ID: &str = "fk-forum_vote-user_id";
static FK_VOTE_POST_ID: &str = "fk-forum_vote-post_id";
static FK_VOTE_REPLY_ID: &str = "fk-forum_vote-reply_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ForumVote::Table)
                    .if_not_exists()
                    .col(pk_auto(ForumVote::Id))
                    .col(string_len(ForumVote::Voter, 64))
                    .col(integer_null(ForumVote::UserId))
                    .col(integer_null(ForumVote::PostId))
                    .col(integer_null(ForumVote::ReplyId))
                    .col(boolean(ForumVote::IsUpvote))
                    .col(timestamp(ForumVote::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // NULL target columns never collide, so each index only constrains its own target kind
        manager
            .create_index(
                Index::create()
                    .name(IDX_VOTE_VOTER_POST)
                    .table(ForumVote::Table)
                    .col(ForumVote::Voter)
                    .col(ForumVote::PostId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_VOTE_VOTER_REPLY)
                    .table(ForumVote::Table)
                    .col(ForumVote::Voter)
                    .col(ForumVote::ReplyId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_VOTE_USER_ID)
                    .from_tbl(ForumVote::Table)
                    .from_col(ForumVote::UserId)
                    .to_tbl(RinkUser::Table)
                    .to_col(RinkUser::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_VOTE_POST_ID)
                    .from_tbl(ForumVote::Table)
                    .from_col(ForumVote::PostId)
                    .to_tbl(ForumPost::Table)
                    .to_col(ForumPost::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_VOTE_REPLY_ID)
                    .from_tbl(ForumVote::Table)
                    .from_col(ForumVote::ReplyId)
                    .to_tbl(ForumReply::Table)
                    .to_col(ForumReply::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for fk in [FK_VOTE_REPLY_ID, FK_VOTE_POST_ID, FK_VOTE_USER_ID] {
            manager
                .drop_foreign_key(ForeignKey::drop().name(fk).table(ForumVote::Table).to_owned())
                .await?;
        }

        for idx in [IDX_VOTE_VOTER_REPLY, IDX_VOTE_VOTER_POST] {
            manager
                .drop_index(Index::drop().name(idx).table(ForumVote::Table).to_owned())
                .await?;
        }

        manager
            .drop_table(Table::drop().table(ForumVote::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum ForumVote {
    Table,
    Id,
    Voter,
    UserId,
    PostId,
    ReplyId,
    IsUpvote,
    CreatedAt,
}
