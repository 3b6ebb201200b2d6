mod filesystem;
mod storage;

pub use filesystem::{default_cache_dir, FilesystemSessionStore, SESSION_EXPIRY_MINUTES};
pub use storage::SessionStore;
