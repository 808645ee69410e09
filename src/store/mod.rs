//! Single-record account storage.
//!
//! The account file holds exactly one JSON object:
//!
//! `{ "username": ..., "password": ..., "courses": { <id>: <int|"CR"|"NCR"> } }`
//!
//! Registering or saving grades replaces the record wholesale; there are no
//! partial updates and no multi-account support. Reads and writes are
//! whole-file within a single call; locking is out of scope for a single-user
//! local tool.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use crate::domain::{AccountRecord, CourseMap};

/// Default account file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "user_data.json";

/// Environment variable overriding the account file path.
const DATA_FILE_ENV: &str = "GRADEBOOK_DATA_FILE";

/// Store failures, recovered at the presentation boundary as a single message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// `create` for a username that already owns the stored record.
    AccountExists,
    /// No account file exists yet.
    NotFound,
    /// Username/password did not match the stored record.
    InvalidCredentials,
    /// The file could not be read or written.
    Io(String),
    /// The file exists but does not hold a valid account record.
    Corrupt(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::AccountExists => {
                f.write_str("Username already exists. Please choose a different username.")
            }
            StoreError::NotFound => f.write_str("User data not found."),
            StoreError::InvalidCredentials => f.write_str("Invalid username or password."),
            StoreError::Io(message) | StoreError::Corrupt(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for StoreError {}

/// Flat-file store for the single account record.
pub struct AccountStore {
    path: PathBuf,
}

impl AccountStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolve the account file from `GRADEBOOK_DATA_FILE` (via `.env` or the
    /// environment), falling back to `user_data.json`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let path =
            std::env::var(DATA_FILE_ENV).unwrap_or_else(|_| DEFAULT_DATA_FILE.to_string());
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the stored record belongs to `username`.
    ///
    /// A file owned by a different username reports `false`; `create` will
    /// then overwrite it, matching the single-record lifecycle.
    pub fn exists(&self, username: &str) -> Result<bool, StoreError> {
        match self.load() {
            Ok(record) => Ok(record.username == username),
            Err(StoreError::NotFound) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Create a fresh account with an empty course map.
    pub fn create(&self, username: &str, password: &str) -> Result<(), StoreError> {
        if self.exists(username)? {
            return Err(StoreError::AccountExists);
        }
        self.write(&AccountRecord {
            username: username.to_string(),
            password: password.to_string(),
            courses: CourseMap::new(),
        })
    }

    /// Return the stored course map on an exact username/password match.
    pub fn verify(&self, username: &str, password: &str) -> Result<CourseMap, StoreError> {
        let record = self.load()?;
        if record.username == username && record.password == password {
            Ok(record.courses)
        } else {
            Err(StoreError::InvalidCredentials)
        }
    }

    /// Overwrite the stored record unconditionally.
    pub fn save(
        &self,
        username: &str,
        password: &str,
        courses: &CourseMap,
    ) -> Result<(), StoreError> {
        self.write(&AccountRecord {
            username: username.to_string(),
            password: password.to_string(),
            courses: courses.clone(),
        })
    }

    fn load(&self) -> Result<AccountRecord, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound);
            }
            Err(err) => {
                return Err(StoreError::Io(format!(
                    "Failed to open account file '{}': {err}",
                    self.path.display()
                )));
            }
        };

        serde_json::from_reader(file).map_err(|err| {
            StoreError::Corrupt(format!(
                "Invalid account data in '{}': {err}",
                self.path.display()
            ))
        })
    }

    fn write(&self, record: &AccountRecord) -> Result<(), StoreError> {
        let file = File::create(&self.path).map_err(|err| {
            StoreError::Io(format!(
                "Failed to create account file '{}': {err}",
                self.path.display()
            ))
        })?;

        serde_json::to_writer_pretty(file, record).map_err(|err| {
            StoreError::Io(format!(
                "Failed to write account file '{}': {err}",
                self.path.display()
            ))
        })
    }
}
