use web_sys::{Storage, Window};

use crate::error::{GameError, GameResult};
use crate::settings::KeyValueStore;

/// `window.localStorage` as a key/value store.
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    pub fn open(window: &Window) -> GameResult<Self> {
        let storage = window
            .local_storage()
            .map_err(GameError::storage)?
            .ok_or_else(|| GameError::Storage("localStorage unavailable".into()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> GameResult<Option<String>> {
        self.storage.get_item(key).map_err(GameError::storage)
    }

    fn set(&mut self, key: &str, value: &str) -> GameResult<()> {
        self.storage.set_item(key, value).map_err(GameError::storage)
    }
}
