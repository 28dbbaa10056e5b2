//! Session credentials: the two strings the board server wants back.
//!
//! The server hands out a session token and knows the account by email; the
//! client persists exactly those two values in
//! `~/.config/ladle/session.toml` and reads them once at startup. A missing
//! file simply means "not signed in": the board still loads, the liked-set
//! fetch never fires, and like actions prompt for login.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to read session file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in session file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize session: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// On-disk shape of the session file.
#[derive(Serialize, Deserialize)]
struct SessionFile {
    token: String,
    email: String,
}

/// Session credentials injected into the API client at construction.
///
/// Both fields are present or both are absent; a session file with only one
/// of the two is treated as no session. The token is held as a
/// `SecretString` and only exposed at header-build time.
#[derive(Clone, Default)]
pub struct Credentials {
    token: Option<SecretString>,
    email: Option<String>,
}

/// Mask the token in Debug output to prevent secret leakage in logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("email", &self.email)
            .finish()
    }
}

impl Credentials {
    /// Build credentials from explicit values (used by `ladle login`).
    pub fn new(token: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            token: Some(SecretString::from(token.into())),
            email: Some(email.into()),
        }
    }

    /// Load from the session file. Missing file yields empty credentials.
    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No session file, starting signed out");
                return Ok(Self::default());
            }
            Err(e) => return Err(SessionError::Io(e)),
        };

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let file: SessionFile = toml::from_str(&content)?;
        if file.token.is_empty() || file.email.is_empty() {
            tracing::warn!(path = %path.display(), "Session file incomplete, ignoring");
            return Ok(Self::default());
        }

        tracing::info!(email = %file.email, "Loaded session credentials");
        Ok(Self::new(file.token, file.email))
    }

    /// Persist to the session file with user-only permissions.
    pub fn store(&self, path: &Path) -> Result<(), SessionError> {
        let (Some(token), Some(email)) = (&self.token, &self.email) else {
            // Nothing to store; treat as logout.
            return remove(path);
        };

        let file = SessionFile {
            token: token.expose_secret().to_string(),
            email: email.clone(),
        };
        let content = toml::to_string(&file)?;
        std::fs::write(path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    pub fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// True when both credential values are present.
    pub fn is_signed_in(&self) -> bool {
        self.token.is_some() && self.email.is_some()
    }
}

/// Delete the session file (logout). Idempotent.
pub fn remove(path: &Path) -> Result<(), SessionError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(SessionError::Io(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_signed_out() {
        let path = Path::new("/tmp/ladle_test_nonexistent_session.toml");
        let creds = Credentials::load(path).unwrap();
        assert!(!creds.is_signed_in());
        assert!(creds.token().is_none());
        assert!(creds.email().is_none());
    }

    #[test]
    fn test_store_then_load_round_trip() {
        let dir = std::env::temp_dir().join("ladle_session_test_roundtrip");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("session.toml");

        let creds = Credentials::new("tok-123", "cook@example.com");
        creds.store(&path).unwrap();

        let loaded = Credentials::load(&path).unwrap();
        assert!(loaded.is_signed_in());
        assert_eq!(loaded.email(), Some("cook@example.com"));
        assert_eq!(loaded.token().unwrap().expose_secret(), "tok-123");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_incomplete_file_is_signed_out() {
        let dir = std::env::temp_dir().join("ladle_session_test_incomplete");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("session.toml");
        std::fs::write(&path, "token = \"\"\nemail = \"cook@example.com\"\n").unwrap();

        let creds = Credentials::load(&path).unwrap();
        assert!(!creds.is_signed_in());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_remove_is_idempotent() {
        let dir = std::env::temp_dir().join("ladle_session_test_remove");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("session.toml");

        Credentials::new("t", "e@example.com").store(&path).unwrap();
        remove(&path).unwrap();
        remove(&path).unwrap(); // Second removal is fine
        assert!(!path.exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_debug_masks_token() {
        let creds = Credentials::new("super-secret-token", "cook@example.com");
        let debug_output = format!("{:?}", creds);
        assert!(
            !debug_output.contains("super-secret-token"),
            "Debug output should not contain the session token"
        );
        assert!(debug_output.contains("[REDACTED]"));
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = std::env::temp_dir().join("ladle_session_test_perms");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("session.toml");

        Credentials::new("t", "e@example.com").store(&path).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        std::fs::remove_dir_all(&dir).ok();
    }
}
