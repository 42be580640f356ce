use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, fixtures::TEST_PASSWORD, TestContext};

impl TestContext {
    pub fn user(&self) -> UserFixtures<'_> {
        UserFixtures { context: self }
    }
}

pub struct UserFixtures<'a> {
    context: &'a TestContext,
}

impl<'a> UserFixtures<'a> {
    /// Insert a regular member whose password is [`TEST_PASSWORD`].
    pub async fn insert_user(&self, username: &str) -> Result<entity::rink_user::Model, TestError> {
        self.insert(username, false).await
    }

    /// Insert an admin whose password is [`TEST_PASSWORD`].
    pub async fn insert_admin(
        &self,
        username: &str,
    ) -> Result<entity::rink_user::Model, TestError> {
        self.insert(username, true).await
    }

    /// Delete a user row, leaving any session that still references it stale.
    pub async fn delete_user(&self, user_id: i32) -> Result<(), TestError> {
        entity::prelude::RinkUser::delete_by_id(user_id)
            .exec(&self.context.db)
            .await?;

        Ok(())
    }

    async fn insert(
        &self,
        username: &str,
        is_admin: bool,
    ) -> Result<entity::rink_user::Model, TestError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(TEST_PASSWORD.as_bytes(), &salt)
            .map_err(|e| TestError::PasswordHash(e.to_string()))?
            .to_string();

        Ok(
            entity::prelude::RinkUser::insert(entity::rink_user::ActiveModel {
                username: ActiveValue::Set(username.to_string()),
                password_hash: ActiveValue::Set(password_hash),
                email: ActiveValue::Set(None),
                is_admin: ActiveValue::Set(is_admin),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.context.db)
            .await?,
        )
    }
}
