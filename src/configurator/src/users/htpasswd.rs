use crate::constants::MASKED_PASSWORD;
use crate::users::error::{UserError, UserResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

const MAX_FIELD_LEN: usize = 255;

/// A user as shown to API callers; the password is always masked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password: String,
}

impl User {
    fn masked(username: &str) -> Self {
        Self {
            username: username.to_string(),
            password: MASKED_PASSWORD.to_string(),
        }
    }
}

pub fn validate_username(username: &str) -> UserResult<()> {
    if username.is_empty()
        || username.len() > MAX_FIELD_LEN
        || username.contains(':')
        || username.chars().any(char::is_control)
    {
        return Err(UserError::InvalidUsername);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> UserResult<()> {
    if password.is_empty() || password.len() > MAX_FIELD_LEN {
        return Err(UserError::InvalidPassword);
    }
    Ok(())
}

/// `{SHA}` scheme: base64 of the SHA-1 digest. Kept for the nginx builds that lack bcrypt.
pub fn hash_sha(password: &str) -> String {
    format!("{{SHA}}{}", STANDARD.encode(Sha1::digest(password.as_bytes())))
}

/// Flat `username:hash` credential file shared with nginx.
pub struct HtpasswdStore {
    path: PathBuf,
    // serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl HtpasswdStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn list(&self) -> UserResult<Vec<User>> {
        let mut users: Vec<User> = self
            .read_entries()?
            .iter()
            .map(|(username, _)| User::masked(username))
            .collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    pub fn get(&self, username: &str) -> UserResult<User> {
        self.read_entries()?
            .iter()
            .find(|(name, _)| name == username)
            .map(|(name, _)| User::masked(name))
            .ok_or_else(|| UserError::NotFound {
                username: username.to_string(),
            })
    }

    /// Adds the user, or replaces the hash if it already exists.
    pub fn set_password(&self, username: &str, password: &str) -> UserResult<()> {
        validate_username(username)?;
        validate_password(password)?;

        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut entries = self.read_entries()?;
        let hash = hash_sha(password);
        match entries.iter_mut().find(|(name, _)| name == username) {
            Some(entry) => entry.1 = hash,
            None => entries.push((username.to_string(), hash)),
        }
        self.write_entries(&entries)?;

        info!("password set for user {}", username);
        Ok(())
    }

    pub fn remove(&self, username: &str) -> UserResult<()> {
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut entries = self.read_entries()?;
        let before = entries.len();
        entries.retain(|(name, _)| name != username);
        if entries.len() == before {
            return Err(UserError::NotFound {
                username: username.to_string(),
            });
        }
        self.write_entries(&entries)?;

        info!("removed user {}", username);
        Ok(())
    }

    fn read_entries(&self) -> UserResult<Vec<(String, String)>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(vec![]),
            Err(err) => return Err(UserError::io("Cannot read password file")(err)),
        };

        Ok(content
            .lines()
            .filter_map(|line| line.split_once(':'))
            .map(|(name, hash)| (name.to_string(), hash.to_string()))
            .collect())
    }

    // write a sibling file and rename it over, so nginx never reads half a file
    fn write_entries(&self, entries: &[(String, String)]) -> UserResult<()> {
        let mut content = String::new();
        for (name, hash) in entries {
            content.push_str(name);
            content.push(':');
            content.push_str(hash);
            content.push('\n');
        }

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        fs::write(&tmp_path, content).map_err(UserError::io("Cannot set password"))?;
        fs::rename(&tmp_path, &self.path).map_err(UserError::io("Cannot set password"))
    }
}
