//! Account registration, login and admin bootstrap.


use sea_orm::{DatabaseConnection, SqlErr};

use crate::{
    model::user::{LoginDto, RegisterDto, UserDto},
    server::{
        config::AdminCredentials,
        data::user::UserRepository,
        error::{auth::AuthError, validation::ValidationError, Error},
        model::db::UserModel,
        util::password::{hash_password, verify_password},
    },
};

const USERNAME_MAX_LENGTH: usize = 150;
const PASSWORD_MIN_LENGTH: usize = 8;

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthService<'a> {
    /// Creates a new instance of [`AuthService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a new non-admin account
    ///
    /// # Returns
    /// - `Ok(UserDto)` - The created account
    /// - `Err(Error::ValidationError)` - Username or password fails the field rules
    /// - `Err(Error::AuthError(AuthError::PasswordMismatch))` - The two passwords differ
    /// - `Err(Error::AuthError(AuthError::UsernameTaken))` - The username is already used
    pub async fn register(&self, form: RegisterDto) -> Result<UserDto, Error> {
        let username = form.username.trim().to_string();
        validate_registration(&username, &form.password1)?;

        if form.password1 != form.password2 {
            return Err(AuthError::PasswordMismatch.into());
        }

        let user_repo = UserRepository::new(self.db);
        if user_repo.get_by_username(&username).await?.is_some() {
            return Err(AuthError::UsernameTaken(username).into());
        }

        let password_hash = hash_password(&form.password1)?;
        let user = match user_repo.create(&username, password_hash, false).await {
            Ok(user) => user,
            Err(err) => {
                if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
                    return Err(AuthError::UsernameTaken(username).into());
                }
                return Err(err.into());
            }
        };

        tracing::info!("Registered user {:?} with ID {}", user.username, user.id);

        Ok(user_dto(user))
    }

    /// Checks credentials and returns the matching account
    ///
    /// Unknown usernames and wrong passwords produce the same error.
    pub async fn login(&self, form: LoginDto) -> Result<UserDto, Error> {
        let username = form.username.trim();

        let Some(user) = UserRepository::new(self.db)
            .get_by_username(username)
            .await?
        else {
            return Err(AuthError::InvalidCredentials(username.to_string()).into());
        };

        if !verify_password(&form.password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials(username.to_string()).into());
        }

        Ok(user_dto(user))
    }

    pub async fn get_user(&self, user_id: i32) -> Result<Option<UserDto>, Error> {
        let user = UserRepository::new(self.db).get(user_id).await?;

        Ok(user.map(user_dto))
    }

    /// Creates the configured admin account if no user with that name exists
    ///
    /// # Returns
    /// - `Ok(true)` - The admin account was created
    /// - `Ok(false)` - A user with the username already exists, nothing changed
    pub async fn ensure_admin(&self, credentials: &AdminCredentials) -> Result<bool, Error> {
        let user_repo = UserRepository::new(self.db);

        if let Some(existing) = user_repo.get_by_username(&credentials.username).await? {
            if !existing.is_admin {
                tracing::warn!(
                    "Configured admin username {:?} belongs to a non-admin account",
                    existing.username
                );
            }
            return Ok(false);
        }

        let password_hash = hash_password(&credentials.password)?;
        let admin = user_repo
            .create(&credentials.username, password_hash, true)
            .await?;

        tracing::info!("Created admin user {:?}", admin.username);

        Ok(true)
    }
}

pub fn user_dto(user: UserModel) -> UserDto {
    UserDto {
        id: user.id,
        username: user.username,
        is_admin: user.is_admin,
    }
}

fn validate_registration(username: &str, password: &str) -> Result<(), ValidationError> {
    let mut errors = ValidationError::new();

    if username.is_empty() {
        errors.add("username", "This field is required.");
    } else if username.chars().count() > USERNAME_MAX_LENGTH {
        errors.add(
            "username",
            format!("Ensure this value has at most {USERNAME_MAX_LENGTH} characters."),
        );
    } else if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        errors.add(
            "username",
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
        );
    }

    if password.chars().count() < PASSWORD_MIN_LENGTH {
        errors.add(
            "password1",
            format!(
                "This password is too short. It must contain at least {PASSWORD_MIN_LENGTH} characters."
            ),
        );
    } else if password.chars().all(|c| c.is_ascii_digit()) {
        errors.add("password1", "This password is entirely numeric.");
    }

    errors.into_result()
}
