//! Logged in member identity.
//!
//! Login stores the member's ID under [`SESSION_USER_ID_KEY`] after cycling the session ID.
//! The value is kept as a string so a store shared with older deployments still deserializes;
//! an entry that no longer parses is reported rather than treated as logged out.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::error::Error;

pub const SESSION_USER_ID_KEY: &str = "rink:user:id";

#[derive(Default, Deserialize, Serialize, Debug)]
pub struct SessionUserId(pub String);

impl SessionUserId {
    /// Store the logged in member's ID
    pub async fn insert(session: &Session, user_id: i32) -> Result<(), Error> {
        session
            .insert(SESSION_USER_ID_KEY, SessionUserId(user_id.to_string()))
            .await?;

        Ok(())
    }

    /// Member ID of the session, `None` for guests
    ///
    /// The ID may point at a member that has since been deleted; callers resolve it through
    /// [`get_user_from_session`](crate::server::controller::util::get_user::get_user_from_session)
    /// which clears such sessions.
    pub async fn get(session: &Session) -> Result<Option<i32>, Error> {
        let Some(SessionUserId(raw)) = session.get::<SessionUserId>(SESSION_USER_ID_KEY).await?
        else {
            return Ok(None);
        };

        raw.parse::<i32>()
            .map(Some)
            .map_err(|e| Error::ParseError(format!("Invalid member ID {:?} in session: {}", raw, e)))
    }
}
