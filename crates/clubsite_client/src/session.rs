use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clubsite_core::Language;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

const USER_KEY: &str = "user.json";
const REMEMBERED_KEY: &str = "remembered_user.json";
const LANGUAGE_KEY: &str = "language";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session directory missing or not writable: {0}")]
    Storage(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// The signed-in user as persisted across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub phone: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct RememberedUser {
    phone: String,
}

/// File-backed store for the three persisted session keys: the session
/// user, the remembered phone number, and the language preference.
///
/// This is the single owner of session state. Reads are tolerant:
/// missing or corrupt files degrade to absent values with a warning,
/// since stale session data must never take a page down.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The persisted session user, if one is logged in.
    pub fn user(&self) -> Option<SessionUser> {
        self.read_json(USER_KEY)
    }

    /// Persists the session user at login.
    pub fn login(&self, user: &SessionUser) -> Result<(), SessionError> {
        self.write_json(USER_KEY, user)
    }

    /// Clears the session user. The language preference survives logout.
    pub fn logout(&self) -> Result<(), SessionError> {
        self.remove(USER_KEY)
    }

    /// The phone number saved by the "remember me" checkbox.
    pub fn remembered_phone(&self) -> Option<String> {
        self.read_json::<RememberedUser>(REMEMBERED_KEY)
            .map(|record| record.phone)
    }

    pub fn remember_phone(&self, phone: &str) -> Result<(), SessionError> {
        self.write_json(
            REMEMBERED_KEY,
            &RememberedUser {
                phone: phone.to_string(),
            },
        )
    }

    pub fn forget_phone(&self) -> Result<(), SessionError> {
        self.remove(REMEMBERED_KEY)
    }

    /// The persisted language preference, defaulting to Persian.
    pub fn language(&self) -> Language {
        self.read_text(LANGUAGE_KEY)
            .and_then(|code| Language::from_code(code.trim()))
            .unwrap_or_default()
    }

    pub fn set_language(&self, language: Language) -> Result<(), SessionError> {
        self.write_atomic(LANGUAGE_KEY, language.code())
    }

    fn read_json<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        let text = self.read_text(key)?;
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("discarding corrupt session key {key}: {err}");
                None
            }
        }
    }

    fn read_text(&self, key: &str) -> Option<String> {
        let path = self.dir.join(key);
        match fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                log::warn!("failed to read session key {key} from {path:?}: {err}");
                None
            }
        }
    }

    fn write_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), SessionError> {
        let text = serde_json::to_string(value)?;
        self.write_atomic(key, &text)
    }

    /// Atomically replaces `{dir}/{key}` by writing a temp file then
    /// renaming it into place.
    fn write_atomic(&self, key: &str, content: &str) -> Result<(), SessionError> {
        ensure_session_dir(&self.dir)?;

        let target = self.dir.join(key);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&target).map_err(|err| SessionError::Io(err.error))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        let path = self.dir.join(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(SessionError::Io(err)),
        }
    }
}

/// Ensure the session directory exists; create if missing.
fn ensure_session_dir(dir: &Path) -> Result<(), SessionError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|err| SessionError::Storage(err.to_string()))?;
        if !meta.is_dir() {
            return Err(SessionError::Storage("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|err| SessionError::Storage(err.to_string()))?;
    }
    Ok(())
}
