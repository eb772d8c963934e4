//! # Session Token Store
//!
//! Keeps the opaque session id handed out by `sign-in`, both in memory and in
//! a small file so the register stays signed in across restarts.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Session Lifecycle                                 │
//! │                                                                         │
//! │  sign-in OK ──► store(token) ──► memory + session_token file           │
//! │                                        │                                │
//! │  every request ──► current() ──────────┤──► ?session_id=<token>        │
//! │                                        │                                │
//! │  dashboard open ──► verify() ──► re-reads the file                     │
//! │                                   missing → NotAuthenticated           │
//! │                                        │                                │
//! │  logout ──► clear() ──► memory cleared, file deleted                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The token is never inspected or refreshed; the backend decides whether
//! it is still good.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
    token: Arc<RwLock<Option<String>>>,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SessionStore {
            path: path.into(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the token file into memory. A missing file means signed out.
    pub async fn load(&self) -> ClientResult<Option<String>> {
        let token = read_token(&self.path).await?;
        let mut guard = self.token.write().await;
        *guard = token.clone();
        debug!(path = ?self.path, present = token.is_some(), "Session token loaded");
        Ok(token)
    }

    /// Persists a fresh token after sign-in.
    pub async fn store(&self, token: &str) -> ClientResult<()> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ClientError::SessionStorage("refusing to store an empty token".into()));
        }

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ClientError::SessionStorage(e.to_string()))?;
        }
        tokio::fs::write(&self.path, token)
            .await
            .map_err(|e| ClientError::SessionStorage(e.to_string()))?;

        let mut guard = self.token.write().await;
        *guard = Some(token.to_string());
        info!(path = ?self.path, "Session token stored");
        Ok(())
    }

    /// Token in memory, without touching the disk.
    pub async fn current(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// Re-checks the file. Used when an admin screen opens; a token removed
    /// behind our back counts as an expired session.
    pub async fn verify(&self) -> ClientResult<String> {
        self.load().await?.ok_or(ClientError::NotAuthenticated)
    }

    /// Forgets the token and deletes the file.
    pub async fn clear(&self) -> ClientResult<()> {
        {
            let mut guard = self.token.write().await;
            *guard = None;
        }

        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                info!(path = ?self.path, "Session token removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::SessionStorage(e.to_string())),
        }
    }
}

async fn read_token(path: &Path) -> ClientResult<Option<String>> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => {
            let token = contents.trim();
            Ok((!token.is_empty()).then(|| token.to_string()))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ClientError::SessionStorage(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::new(dir.path().join("data").join("session_token"))
    }

    #[tokio::test]
    async fn test_store_then_load_in_new_instance() {
        let dir = tempfile::tempdir().unwrap();
        store_in(&dir).store("abc123\n").await.unwrap();

        let fresh = store_in(&dir);
        assert_eq!(fresh.current().await, None);
        assert_eq!(fresh.load().await.unwrap().as_deref(), Some("abc123"));
        assert_eq!(fresh.current().await.as_deref(), Some("abc123"));
    }

    #[tokio::test]
    async fn test_verify_without_token_is_expired() {
        let dir = tempfile::tempdir().unwrap();
        let session = store_in(&dir);
        assert!(matches!(session.verify().await, Err(ClientError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_verify_notices_deleted_file() {
        let dir = tempfile::tempdir().unwrap();
        let session = store_in(&dir);
        session.store("abc123").await.unwrap();
        assert_eq!(session.verify().await.unwrap(), "abc123");

        std::fs::remove_file(session.path()).unwrap();
        assert!(matches!(session.verify().await, Err(ClientError::NotAuthenticated)));
        assert_eq!(session.current().await, None);
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let session = store_in(&dir);
        session.store("abc123").await.unwrap();

        session.clear().await.unwrap();
        session.clear().await.unwrap();
        assert!(!session.path().exists());
        assert_eq!(session.current().await, None);
    }

    #[tokio::test]
    async fn test_empty_token_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let session = store_in(&dir);
        assert!(session.store("   ").await.is_err());
    }
}
