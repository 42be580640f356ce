use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new user with an already hashed password
    pub async fn create(
        &self,
        username: &str,
        password_hash: String,
        is_admin: bool,
    ) -> Result<entity::rink_user::Model, DbErr> {
        let user = entity::rink_user::ActiveModel {
            username: ActiveValue::Set(username.to_string()),
            password_hash: ActiveValue::Set(password_hash),
            email: ActiveValue::Set(None),
            is_admin: ActiveValue::Set(is_admin),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        user.insert(self.db).await
    }

    pub async fn get(&self, user_id: i32) -> Result<Option<entity::rink_user::Model>, DbErr> {
        entity::prelude::RinkUser::find_by_id(user_id)
            .one(self.db)
            .await
    }

    /// Find a user by exact username
    pub async fn get_by_username(
        &self,
        username: &str,
    ) -> Result<Option<entity::rink_user::Model>, DbErr> {
        entity::prelude::RinkUser::find()
            .filter(entity::rink_user::Column::Username.eq(username))
            .one(self.db)
            .await
    }

    /// Users for a set of IDs, missing IDs are skipped
    pub async fn get_many(
        &self,
        user_ids: Vec<i32>,
    ) -> Result<Vec<entity::rink_user::Model>, DbErr> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::RinkUser::find()
            .filter(entity::rink_user::Column::Id.is_in(user_ids))
            .all(self.db)
            .await
    }
}
