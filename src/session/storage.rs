use crate::error::Result;
use crate::models::ChatSession;

/// Trait for session storage backends
pub trait SessionStore: Send + Sync {
    /// Most recently updated session, if it has not expired
    fn find_recent_session(&self) -> Option<ChatSession>;

    /// Every stored session, oldest first
    fn load_sessions(&self) -> Result<Vec<ChatSession>>;

    fn save_session(&self, session: &ChatSession) -> Result<()>;

    fn clear_all_sessions(&self) -> Result<()>;
}
