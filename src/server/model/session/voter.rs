//! Anonymous forum voter identity.
//!
//! Guests may vote on forum posts and replies. Each guest session receives a random key on its
//! first vote, stored under [`SESSION_VOTER_KEY`], so repeated votes from the same browser
//! toggle instead of stacking.

use rand::distr::{Alphanumeric, SampleString};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::error::Error;

pub const SESSION_VOTER_KEY: &str = "rink:forum:voter";

const VOTER_KEY_LENGTH: usize = 32;

#[derive(Default, Deserialize, Serialize, Debug)]
pub struct SessionVoterKey(pub String);

impl SessionVoterKey {
    /// Get the guest voter key from session without creating one
    pub async fn get(session: &Session) -> Result<Option<String>, Error> {
        Ok(session
            .get::<SessionVoterKey>(SESSION_VOTER_KEY)
            .await?
            .map(|SessionVoterKey(key)| key))
    }

    /// Get the guest voter key from session, generating and storing one if absent
    pub async fn get_or_create(session: &Session) -> Result<String, Error> {
        if let Some(key) = Self::get(session).await? {
            return Ok(key);
        }

        let key = Alphanumeric.sample_string(&mut rand::rng(), VOTER_KEY_LENGTH);
        session
            .insert(SESSION_VOTER_KEY, SessionVoterKey(key.clone()))
            .await?;

        Ok(key)
    }
}
