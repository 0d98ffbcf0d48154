//! Authentication gate: credential check and the current-session pointer
//!
//! There is no token or claim machinery; "logged in" is one persisted
//! pointer to a user record. `login` hands back an explicit [`Session`]
//! value and operations needing an authenticated actor take it as a
//! parameter instead of reading ambient state.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppResult;
use crate::store::Store;
use shared::models::{License, LicenseStatus, User, UserStatus};

/// An authenticated session, passed explicitly to actor-scoped operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub user: User,
    pub started_at: DateTime<Utc>,
}

impl Session {
    fn begin(user: User, started_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user,
            started_at,
        }
    }
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    store: Arc<Store>,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Authenticate against the stored user record
    ///
    /// Returns `None` for unknown emails, wrong passwords and suspended
    /// accounts; nothing is mutated in those cases. A client whose license
    /// window has passed still logs in: the user and the matching active
    /// license are lazily flipped to expired, and the expired status is
    /// surfaced on the returned session.
    pub fn login(&self, email: &str, password: &str) -> AppResult<Option<Session>> {
        let users = self.store.users();

        let Some(mut user) = users.find_first(|u| u.email == email) else {
            return Ok(None);
        };
        if user.password != password {
            tracing::debug!(email, "login rejected: wrong password");
            return Ok(None);
        }
        if user.status == UserStatus::Suspended {
            tracing::info!(user = %user.id, "login rejected: account suspended");
            return Ok(None);
        }

        let now = Utc::now();

        if user.is_expired_at(now) && user.status != UserStatus::Expired {
            tracing::info!(user = %user.id, "license window passed, marking account expired");
            user.status = UserStatus::Expired;
            users.replace(user.clone())?;

            if let Some(license) = self.license_for_user(&user.id) {
                self.store
                    .licenses()
                    .update_with(&license.id, |l| l.status = LicenseStatus::Expired)?;
            }
        }

        user.last_login = Some(now);
        users.replace(user.clone())?;
        self.store.save_session_user(&user)?;

        tracing::info!(user = %user.id, role = %user.role, "login succeeded");
        Ok(Some(Session::begin(user, now)))
    }

    /// Clear the current-session pointer
    pub fn logout(&self) -> AppResult<()> {
        self.store.clear_session_user()?;
        Ok(())
    }

    /// The persisted current user, if any
    pub fn current_user(&self) -> AppResult<Option<User>> {
        Ok(self.store.load_session_user()?)
    }

    pub fn is_authenticated(&self) -> AppResult<bool> {
        Ok(self.store.load_session_user()?.is_some())
    }

    /// Rebuild a session from the persisted pointer after a restart
    pub fn restore_session(&self) -> AppResult<Option<Session>> {
        let user = self.store.load_session_user()?;
        Ok(user.map(|u| Session::begin(u, Utc::now())))
    }

    /// First license with status active for this user
    ///
    /// The data model does not prevent several active licenses per user;
    /// first match wins.
    pub fn license_for_user(&self, user_id: &str) -> Option<License> {
        self.store
            .licenses()
            .find_first(|l| l.user_id == user_id && l.is_active())
    }

    /// Whether the user holds an active license whose window is still open
    pub fn has_valid_license(&self, user_id: &str) -> bool {
        match self.license_for_user(user_id) {
            Some(license) => license.end_date > Utc::now(),
            None => false,
        }
    }

    /// Days left on the active license, rounded up, floored at zero
    pub fn remaining_days(&self, user_id: &str) -> i64 {
        let Some(license) = self.license_for_user(user_id) else {
            return 0;
        };
        let seconds = (license.end_date - Utc::now()).num_seconds();
        let days = (seconds as f64 / 86_400.0).ceil() as i64;
        days.max(0)
    }
}
