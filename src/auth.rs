//! Identity of the signed-in user.
//!
//! The auth provider itself lives outside this crate. Callers create one
//! `AuthContext`, hand it to whatever needs the current user, and drive its
//! lifecycle with `sign_in` / `sign_out`.

use crate::models::{UserRecord, UserRole};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct AuthContext {
    current: RwLock<Option<UserRecord>>,
}

impl AuthContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(user: UserRecord) -> Self {
        Self {
            current: RwLock::new(Some(user)),
        }
    }

    pub async fn sign_in(&self, user: UserRecord) {
        tracing::info!(uid = %user.uid, role = ?user.role, "user signed in");
        *self.current.write().await = Some(user);
    }

    pub async fn sign_out(&self) {
        if let Some(user) = self.current.write().await.take() {
            tracing::info!(uid = %user.uid, "user signed out");
        }
    }

    pub async fn current_user(&self) -> Option<UserRecord> {
        self.current.read().await.clone()
    }

    pub async fn current_user_id(&self) -> Option<String> {
        self.current.read().await.as_ref().map(|u| u.uid.clone())
    }

    pub async fn current_role(&self) -> Option<UserRole> {
        self.current.read().await.as_ref().map(|u| u.role)
    }
}
