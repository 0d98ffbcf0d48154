//! User directory operations

use std::sync::Arc;

use crate::error::AppResult;
use crate::store::Store;
use shared::models::User;

/// Plain repository surface over user records
#[derive(Clone)]
pub struct AccountService {
    store: Arc<Store>,
}

impl AccountService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<User> {
        self.store.users().list()
    }

    pub fn get(&self, id: &str) -> Option<User> {
        self.store.users().get(id)
    }

    pub fn find_by_email(&self, email: &str) -> Option<User> {
        self.store.users().find_first(|u| u.email == email)
    }

    /// Replace the stored record; no-op `false` when the id is absent
    pub fn update(&self, user: User) -> AppResult<bool> {
        Ok(self.store.users().replace(user)?)
    }

    /// Hard delete. Dangling licenses/tickets are not cleaned up; the
    /// normal flow suspends accounts instead.
    pub fn delete(&self, id: &str) -> AppResult<bool> {
        let removed = self.store.users().remove(id)?;
        if removed {
            tracing::warn!(user = %id, "user record deleted");
        }
        Ok(removed)
    }
}
