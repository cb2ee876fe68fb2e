//! Persisted session file.
//!
//! The credential outlives the process so a restart does not force a fresh
//! login (the counterpart of the browser's local storage entry). The file
//! holds a single JSON object under a fixed path chosen by [`crate::config`].

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    pub token: String,
    pub display_name: Option<String>,
}

/// Reads and writes the session file.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the persisted session, if any. A missing or unreadable file is
    /// treated as "no session"; corruption is logged, not propagated.
    pub fn load(&self) -> Option<PersistedSession> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                log::warn!(
                    "ignoring corrupt session file {}: {}",
                    self.path.display(),
                    err
                );
                None
            }
        }
    }

    pub fn save(&self, session: &PersistedSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }

    /// Removes the session file. Idempotent.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).with_context(|| format!("failed to remove {}", self.path.display()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_clear_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let file = SessionFile::new(dir.path().join("session.json"));

        assert!(file.load().is_none());

        file.save(&PersistedSession {
            token: "abc123".into(),
            display_name: Some("Nadia".into()),
        })
        .unwrap();

        let restored = file.load().unwrap();
        assert_eq!(restored.token, "abc123");
        assert_eq!(restored.display_name.as_deref(), Some("Nadia"));

        file.clear().unwrap();
        file.clear().unwrap();
        assert!(file.load().is_none());
    }

    #[test]
    fn test_corrupt_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let file = SessionFile::new(path);
        assert!(file.load().is_none());
    }
}
