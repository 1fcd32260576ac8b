//! Remembered demo login. Kept apart from verdicts, which are never persisted.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use sentinel_logging::{sentinel_info, sentinel_warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

const STATE_FILENAME: &str = ".sentinel_session.ron";

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("failed to serialize session: {0}")]
    Serialize(#[from] ron::Error),
    #[error("failed to write session to {path:?}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedSession {
    email: Option<String>,
}

/// The remembered email, if any. Unreadable state counts as signed out.
pub fn load_remembered_email(state_dir: &Path) -> Option<String> {
    let path = state_dir.join(STATE_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
        Err(err) => {
            sentinel_warn!("Failed to read session from {:?}: {}", path, err);
            return None;
        }
    };

    match ron::from_str::<PersistedSession>(&content) {
        Ok(session) => session.email.filter(|email| !email.is_empty()),
        Err(err) => {
            sentinel_warn!("Failed to parse session from {:?}: {}", path, err);
            None
        }
    }
}

/// Stores `email` with no expiry, replacing any previous one.
pub fn save_remembered_email(state_dir: &Path, email: &str) -> Result<PathBuf, SessionStoreError> {
    let session = PersistedSession {
        email: Some(email.to_string()),
    };
    let content = ron::ser::to_string_pretty(&session, ron::ser::PrettyConfig::new())?;
    let path = state_dir.join(STATE_FILENAME);
    replace_session_file(state_dir, &path, &content).map_err(|source| {
        SessionStoreError::Write {
            path: path.clone(),
            source,
        }
    })?;
    sentinel_info!("Remembered login in {:?}", path);
    Ok(path)
}

// The rename in `persist` replaces the old file atomically, so a concurrent
// load sees the previous session or the new one, never a missing file.
fn replace_session_file(state_dir: &Path, path: &Path, content: &str) -> io::Result<()> {
    fs::create_dir_all(state_dir)?;
    let mut tmp = NamedTempFile::new_in(state_dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}
