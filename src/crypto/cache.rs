//! Optional in-process cache of derived keys.
//!
//! Keys live only as long as the signed-in session: the owner must call
//! `evict` on sign-out (or `clear` on account switch). Nothing here is ever
//! serialized. An evicted key is zeroized once the last in-flight call
//! holding it finishes.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use super::keys::DerivedKey;
use crate::errors::Result;

#[derive(Default)]
pub struct KeyCache {
    keys: RwLock<HashMap<String, Arc<DerivedKey>>>,
}

impl KeyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached key for `user_id`, deriving and storing it on a miss.
    pub(crate) fn get_or_derive<F>(&self, user_id: &str, derive: F) -> Result<Arc<DerivedKey>>
    where
        F: FnOnce() -> Result<DerivedKey>,
    {
        if let Some(key) = self
            .keys
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(user_id)
        {
            return Ok(Arc::clone(key));
        }

        let key = Arc::new(derive()?);
        let mut keys = self.keys.write().unwrap_or_else(PoisonError::into_inner);
        // Another caller may have filled the slot meanwhile; both keys are
        // identical so either one is fine to hand back.
        let entry = keys
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::clone(&key));
        Ok(Arc::clone(entry))
    }

    /// Drop the key for one user. Returns `true` if one was cached.
    pub fn evict(&self, user_id: &str) -> bool {
        self.keys
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(user_id)
            .is_some()
    }

    /// Drop every cached key.
    pub fn clear(&self) {
        self.keys
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.keys.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for KeyCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyCache")
            .field("cached_keys", &self.len())
            .finish()
    }
}
