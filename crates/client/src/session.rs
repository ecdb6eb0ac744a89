use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::Result;

/// Opt-in "remember me" login form state.
///
/// Stored as plaintext JSON next to the token, which is a known security
/// gap inherited from the app this replaces: anyone who can read the
/// session file can read the password. Treat the file as a secret until
/// this moves to an OS keychain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RememberedCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    access_token: Option<String>,
    remembered: Option<RememberedCredentials>,
}

/// Owner of the bearer token and the persisted session file.
///
/// Exactly one token is active at a time. Repositories only read it;
/// login and logout are the only writers.
#[derive(Clone)]
pub struct SessionStore {
    path: PathBuf,
    inner: Arc<Mutex<SessionFile>>,
}

impl SessionStore {
    /// Loads the session file, falling back to an unauthenticated session
    /// when the file is missing or unreadable. Absence is a normal state,
    /// not an error.
    pub fn load_or_empty(path: PathBuf) -> Self {
        let file = read_json_file(&path).unwrap_or_default();
        Self {
            path,
            inner: Arc::new(Mutex::new(file)),
        }
    }

    pub async fn token(&self) -> Option<String> {
        let guard = self.inner.lock().await;
        guard.access_token.clone()
    }

    pub async fn set_token(&self, token: &str) -> Result<()> {
        let mut guard = self.inner.lock().await;
        guard.access_token = Some(token.to_string());
        write_json_file(&self.path, &guard)?;
        Ok(())
    }

    /// Drops the token, keeping any remembered credentials so the login
    /// form can be prefilled next time.
    pub async fn clear_token(&self) -> Result<()> {
        let mut guard = self.inner.lock().await;
        guard.access_token = None;
        write_json_file(&self.path, &guard)?;
        Ok(())
    }

    pub async fn remember_credentials(&self, email: &str, password: &str) -> Result<()> {
        let mut guard = self.inner.lock().await;
        guard.remembered = Some(RememberedCredentials {
            email: email.to_string(),
            password: password.to_string(),
        });
        write_json_file(&self.path, &guard)?;
        Ok(())
    }

    pub async fn forget_credentials(&self) -> Result<()> {
        let mut guard = self.inner.lock().await;
        guard.remembered = None;
        write_json_file(&self.path, &guard)?;
        Ok(())
    }

    pub async fn remembered(&self) -> Option<RememberedCredentials> {
        let guard = self.inner.lock().await;
        guard.remembered.clone()
    }
}

fn read_json_file(path: &Path) -> Option<SessionFile> {
    let raw = fs::read_to_string(path).ok()?;
    serde_json::from_str(&raw).ok()
}

fn write_json_file(path: &Path, session: &SessionFile) -> std::io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(session)
        .map_err(|_| std::io::Error::other("serialize failed"))?;

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json)?;
    match fs::rename(&tmp, path) {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(&tmp, path)?;
            let _ = fs::remove_file(&tmp);
            Ok(())
        }
    }
}
