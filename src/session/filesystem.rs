use super::storage::SessionStore;
use crate::error::{Error, Result};
use crate::models::ChatSession;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

pub const SESSION_EXPIRY_MINUTES: i64 = 30;

/// Stores each session as `session-<id>.json` in one directory.
pub struct FilesystemSessionStore {
    dir: PathBuf,
}

impl FilesystemSessionStore {
    /// Store under `~/.cache/startwise`.
    pub fn new() -> Result<Self> {
        let dir = default_cache_dir()?;
        Ok(Self::with_dir(dir))
    }

    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn ensure_dir(&self) -> Result<&Path> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        Ok(&self.dir)
    }

    fn is_session_file(path: &Path) -> bool {
        path.extension().and_then(|e| e.to_str()) == Some("json")
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with("session-"))
                .unwrap_or(false)
    }

    fn read_all(&self) -> Vec<ChatSession> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };

        entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| Self::is_session_file(path))
            .filter_map(|path| {
                let content = fs::read_to_string(&path).ok()?;
                serde_json::from_str(&content).ok()
            })
            .collect()
    }
}

pub fn default_cache_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".cache").join("startwise"))
        .ok_or_else(|| Error::Config("Could not determine home directory".into()))
}

impl SessionStore for FilesystemSessionStore {
    fn find_recent_session(&self) -> Option<ChatSession> {
        let now = Local::now();
        let mut sessions = self.read_all();

        // Most recent first
        sessions.sort_by(|a, b| b.last_updated().cmp(&a.last_updated()));

        let session = sessions.into_iter().next()?;
        let age_minutes = now
            .signed_duration_since(session.last_updated())
            .num_minutes();
        // Expired sessions stay on disk; only `clear_all_sessions` deletes.
        (age_minutes.abs() < SESSION_EXPIRY_MINUTES).then_some(session)
    }

    fn load_sessions(&self) -> Result<Vec<ChatSession>> {
        let mut sessions = self.read_all();
        sessions.sort_by_key(|s| s.created_at);
        Ok(sessions)
    }

    fn save_session(&self, session: &ChatSession) -> Result<()> {
        let dir = self.ensure_dir()?;
        let session_file = dir.join(format!("session-{}.json", session.id));
        let content = serde_json::to_string_pretty(session)?;
        fs::write(session_file, content)?;
        Ok(())
    }

    fn clear_all_sessions(&self) -> Result<()> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Ok(());
        };
        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            if Self::is_session_file(&path) {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }
}
