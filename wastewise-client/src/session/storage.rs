/// Durable key-value storage for the session
///
/// The session is persisted as two string entries:
/// - `currentUser`: the logged-in user, JSON encoded
/// - `authToken`: the opaque token returned by login
///
/// Both are written on login and removed together on logout. A state where
/// only one of them exists, or where `currentUser` does not parse, is treated
/// as a corrupted session.
///
/// # Example
///
/// ```
/// use wastewise_client::session::storage::{DurableStorage, MemoryStorage, AUTH_TOKEN_KEY};
///
/// let storage = MemoryStorage::new();
/// storage.set_item(AUTH_TOKEN_KEY, "mock-jwt-token").unwrap();
/// assert_eq!(storage.get_item(AUTH_TOKEN_KEY).unwrap().as_deref(), Some("mock-jwt-token"));
/// ```

use crate::error::{ClientError, ClientResult};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use wastewise_shared::models::User;

/// Storage key of the serialized user
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Storage key of the session token
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// The backing file exists but is not a JSON string map
    #[error("Storage file is malformed: {0}")]
    Format(String),

    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Key-value storage that outlives the process
///
/// Implementations must be safe to share between tasks.
pub trait DurableStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key is not an error
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Process-local storage
///
/// Used by tests and when no session file is configured.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DurableStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        items.remove(key);
        Ok(())
    }
}

/// Storage backed by a JSON file
///
/// The file holds a flat `{"key": "value"}` object. Writes go to a sibling
/// temporary file that is then renamed over the original, so a crash never
/// leaves a half-written file behind.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

type Entries = BTreeMap<String, String>;

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStorage {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Entries, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(Entries::new()),
            Ok(contents) => {
                serde_json::from_str(&contents).map_err(|e| StorageError::Format(e.to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&self, entries: &Entries) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let contents =
            serde_json::to_string_pretty(entries).map_err(|e| StorageError::Format(e.to_string()))?;

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl DurableStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.store(&entries)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        let mut entries = match self.load() {
            Ok(entries) => entries,
            Err(StorageError::Format(reason)) => {
                // Unreadable content is dropped so logout can always clear it
                tracing::warn!(path = %self.path.display(), %reason, "Resetting malformed storage file");
                Entries::new()
            }
            Err(e) => return Err(e),
        };

        if entries.remove(key).is_some() || entries.is_empty() {
            self.store(&entries)?;
        }
        Ok(())
    }
}

/// Persists a logged-in session
///
/// If the token cannot be written the user entry is rolled back, so the
/// storage never holds a user without a token.
pub fn write_session(storage: &dyn DurableStorage, user: &User, token: &str) -> ClientResult<()> {
    let encoded = serde_json::to_string(user)?;
    storage.set_item(CURRENT_USER_KEY, &encoded)?;

    if let Err(e) = storage.set_item(AUTH_TOKEN_KEY, token) {
        if let Err(rollback) = storage.remove_item(CURRENT_USER_KEY) {
            tracing::error!(error = %rollback, "Failed to roll back stored user");
        }
        return Err(e.into());
    }
    Ok(())
}

/// Removes both session entries
///
/// Both removals are attempted even if the first fails.
pub fn clear_session(storage: &dyn DurableStorage) -> ClientResult<()> {
    let user = storage.remove_item(CURRENT_USER_KEY);
    let token = storage.remove_item(AUTH_TOKEN_KEY);
    user?;
    token?;
    Ok(())
}

/// Reads the stored token, if any
pub fn read_token(storage: &dyn DurableStorage) -> ClientResult<Option<String>> {
    Ok(storage.get_item(AUTH_TOKEN_KEY)?)
}

/// Reads back a persisted session
///
/// Returns `Ok(None)` when nothing is stored and `CorruptedSession` when the
/// stored data is incomplete or unreadable.
pub fn read_session(storage: &dyn DurableStorage) -> ClientResult<Option<(User, String)>> {
    let corrupted = |e: StorageError| match e {
        StorageError::Format(reason) => ClientError::CorruptedSession(reason),
        other => ClientError::Storage(other),
    };

    let user = storage.get_item(CURRENT_USER_KEY).map_err(corrupted)?;
    let token = storage.get_item(AUTH_TOKEN_KEY).map_err(corrupted)?;

    match (user, token) {
        (None, None) => Ok(None),
        (Some(user), Some(token)) => {
            let user: User = serde_json::from_str(&user)
                .map_err(|e| ClientError::CorruptedSession(format!("stored user: {}", e)))?;
            Ok(Some((user, token)))
        }
        (Some(_), None) => Err(ClientError::CorruptedSession(
            "user stored without a token".to_string(),
        )),
        (None, Some(_)) => Err(ClientError::CorruptedSession(
            "token stored without a user".to_string(),
        )),
    }
}
