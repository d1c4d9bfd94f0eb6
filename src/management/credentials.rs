use std::{io::ErrorKind, path::PathBuf};

use crate::{
    error::{Result, ScrobbleError},
    types::Credentials,
};

/// Persists the Last.fm session key as `{"session_key": "..."}`.
///
/// Last write wins; there is no locking because the tool runs as a single
/// sequential process.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        CredentialStore { path }
    }

    /// Reads the stored session key.
    ///
    /// Returns `Ok(None)` when the file does not exist or holds an empty key.
    pub async fn load(&self) -> Result<Option<String>> {
        let content = match async_fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.persistence_error("read", e)),
        };

        let credentials: Credentials =
            serde_json::from_str(&content).map_err(|e| self.persistence_error("parse", e))?;

        Ok(Some(credentials.session_key).filter(|k| !k.is_empty()))
    }

    pub async fn persist(&self, session_key: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| self.persistence_error("create directory for", e))?;
        }

        let json = serde_json::to_string_pretty(&Credentials {
            session_key: session_key.to_string(),
        })
        .map_err(|e| self.persistence_error("serialize", e))?;

        async_fs::write(&self.path, json)
            .await
            .map_err(|e| self.persistence_error("write", e))?;

        log::debug!("Session key saved to {}", self.path.display());
        Ok(())
    }

    /// Removes the credential file. A missing file is not an error.
    pub async fn clear(&self) -> Result<()> {
        match async_fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.persistence_error("remove", e)),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn persistence_error(&self, action: &str, e: impl std::fmt::Display) -> ScrobbleError {
        ScrobbleError::Persistence(format!(
            "cannot {action} {}: {e}",
            self.path.display()
        ))
    }
}
