use tower_sessions::Session;

use crate::{
    model::user::UserDto,
    server::{
        error::{auth::AuthError, Error},
        model::{app::AppState, session::user::SessionUserId},
        service::auth::AuthService,
    },
};

/// Retrieves user information from session and then from database
///
/// # Returns
/// - `Ok(UserDto)` - User found
/// - `Err(Error::AuthError(AuthError::UserNotInSession))` - User ID not present in session
/// - `Err(Error::AuthError(AuthError::UserNotInDatabase))` - User ID exists in session but not
///   found in database (session is cleared)
/// - `Err(Error)` - Internal errors (database query failures, session errors, etc.)
pub async fn get_user_from_session(state: &AppState, session: &Session) -> Result<UserDto, Error> {
    let Some(user_id) = SessionUserId::get(session).await? else {
        return Err(Error::AuthError(AuthError::UserNotInSession));
    };

    let Some(user) = AuthService::new(&state.db).get_user(user_id).await? else {
        session.clear().await;

        tracing::debug!(
            "Session cleared for user ID {} with active session but was not found in database",
            user_id
        );

        return Err(Error::AuthError(AuthError::UserNotInDatabase(user_id)));
    };

    Ok(user)
}

/// Like [`get_user_from_session`] but treats a missing or stale session user as anonymous
pub async fn get_optional_user(
    state: &AppState,
    session: &Session,
) -> Result<Option<UserDto>, Error> {
    match get_user_from_session(state, session).await {
        Ok(user) => Ok(Some(user)),
        Err(Error::AuthError(AuthError::UserNotInSession))
        | Err(Error::AuthError(AuthError::UserNotInDatabase(_))) => Ok(None),
        Err(err) => Err(err),
    }
}

/// Retrieves the session user and requires the admin flag
///
/// # Returns
/// - `Err(Error::AuthError(AuthError::PermissionDenied))` - Logged in but not an admin
pub async fn require_admin(state: &AppState, session: &Session) -> Result<UserDto, Error> {
    let user = get_user_from_session(state, session).await?;

    if !user.is_admin {
        return Err(Error::AuthError(AuthError::PermissionDenied(user.id)));
    }

    Ok(user)
}
