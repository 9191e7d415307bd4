//! `localStorage`-backed access-token slot.
//!
//! The token is stored as the raw header value under one key, with no expiry
//! metadata; expiry is discovered by using it.

use session::TokenStore;

use crate::util::storage;

pub const ACCESS_TOKEN_KEY: &str = "meetups.access_token";

#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageTokenStore;

impl TokenStore for LocalStorageTokenStore {
    fn load(&self) -> Option<String> {
        storage::load_raw(ACCESS_TOKEN_KEY)
    }

    fn save(&self, token: &str) {
        storage::save_raw(ACCESS_TOKEN_KEY, token);
    }

    fn clear(&self) {
        storage::remove(ACCESS_TOKEN_KEY);
    }
}
