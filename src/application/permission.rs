/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/10/26
******************************************************************************/

//! Cached permission codes of the signed-in user
//!
//! The cache lives behind a [`PermissionSource`] (a file by default) and is
//! only read when [`PermissionStore::load`] is called. Whatever is stored
//! there, a broken cache never fails a check: it simply grants nothing.

use crate::application::client::AuthenticatedClient;
use crate::application::config::Config;
use crate::application::effects::UiEffects;
use crate::application::transport::Transport;
use crate::error::AppError;
use crate::model::auth::SessionInfo;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

/// Raw storage for the serialized permission list
pub trait PermissionSource: Send + Sync {
    /// Returns the stored JSON, or `None` if nothing was stored yet
    fn read(&self) -> Result<Option<String>, AppError>;
    /// Replaces the stored JSON
    fn write(&self, raw: &str) -> Result<(), AppError>;
}

/// In-memory source, mostly useful for tests and short-lived hosts
#[derive(Debug, Default)]
pub struct MemorySource {
    raw: RwLock<Option<String>>,
}

impl MemorySource {
    /// Creates a source that already holds `raw`
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: RwLock::new(Some(raw.into())),
        }
    }
}

impl PermissionSource for MemorySource {
    fn read(&self) -> Result<Option<String>, AppError> {
        Ok(self
            .raw
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone())
    }

    fn write(&self, raw: &str) -> Result<(), AppError> {
        *self
            .raw
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(raw.to_string());
        Ok(())
    }
}

/// JSON file source
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Uses the file at `path`; it does not need to exist yet
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the cache file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PermissionSource for FileSource {
    fn read(&self) -> Result<Option<String>, AppError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, raw: &str) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

/// A normalized list of permission codes
///
/// Built from a comma-separated string or a list; entries are trimmed and
/// blanks dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PermissionCodes(Vec<String>);

impl PermissionCodes {
    /// The codes, in input order
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Whether no code survived normalization
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn collect_codes<I, C>(codes: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: AsRef<str>,
    {
        Self(
            codes
                .into_iter()
                .map(|c| c.as_ref().trim().to_string())
                .filter(|c| !c.is_empty())
                .collect(),
        )
    }
}

impl From<&str> for PermissionCodes {
    fn from(raw: &str) -> Self {
        Self::collect_codes(raw.split(','))
    }
}

impl From<&String> for PermissionCodes {
    fn from(raw: &String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<&[&str]> for PermissionCodes {
    fn from(codes: &[&str]) -> Self {
        Self::collect_codes(codes)
    }
}

impl<const N: usize> From<[&str; N]> for PermissionCodes {
    fn from(codes: [&str; N]) -> Self {
        Self::collect_codes(codes)
    }
}

impl From<Vec<String>> for PermissionCodes {
    fn from(codes: Vec<String>) -> Self {
        Self::collect_codes(codes)
    }
}

/// Parses the serialized cache
///
/// Anything other than a JSON array yields an empty list; non-string
/// entries are skipped.
fn parse_permissions(raw: &str) -> Vec<String> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Ok(other) => {
            warn!("Cached permissions are not a list: {other}");
            Vec::new()
        }
        Err(e) => {
            warn!("Cannot parse cached permissions: {e}");
            Vec::new()
        }
    }
}

/// Permission cache with an explicit load/refresh lifecycle
pub struct PermissionStore<S: PermissionSource = FileSource> {
    source: S,
    cache: RwLock<Vec<String>>,
}

impl PermissionStore<FileSource> {
    /// Store backed by the cache file named in `config`
    pub fn from_config(config: &Config) -> Self {
        Self::new(FileSource::new(config.permissions.cache_file.clone()))
    }
}

impl<S: PermissionSource> PermissionStore<S> {
    /// Creates an empty store; call [`load`](Self::load) to read the source
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: RwLock::new(Vec::new()),
        }
    }

    /// Reads the source into the cache and returns what was loaded
    ///
    /// A missing, unreadable or malformed cache loads as an empty list.
    pub fn load(&self) -> Vec<String> {
        let permissions = match self.source.read() {
            Ok(Some(raw)) => parse_permissions(&raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Cannot read cached permissions: {e}");
                Vec::new()
            }
        };
        debug!("Loaded {} permissions", permissions.len());
        *self.write_cache() = permissions.clone();
        permissions
    }

    /// Replaces the cached permissions and persists them
    ///
    /// # Arguments
    /// * `permissions` - Complete list of codes now held by the user
    ///
    /// # Errors
    /// Returns an error if the source cannot be written; the in-memory cache
    /// is updated regardless
    pub fn refresh(&self, permissions: Vec<String>) -> Result<(), AppError> {
        let raw = serde_json::to_string(&permissions)?;
        *self.write_cache() = permissions;
        self.source.write(&raw)
    }

    /// Fetches the current session and caches its permissions
    ///
    /// # Arguments
    /// * `client` - Client used for `GET` on the configured session path
    ///
    /// # Returns
    /// * The session as reported by the server
    ///
    /// # Errors
    /// Propagates request failures and cache write failures
    pub async fn refresh_from_session<T: Transport, U: UiEffects>(
        &self,
        client: &AuthenticatedClient<T, U>,
    ) -> Result<SessionInfo, AppError> {
        let session: SessionInfo = client.get_json(&client.config().auth.me_path).await?;
        info!("Session carries {} permissions", session.permissions.len());
        self.refresh(session.permissions.clone())?;
        Ok(session)
    }

    /// Snapshot of the cached permissions
    pub fn permissions(&self) -> Vec<String> {
        self.read_cache().clone()
    }

    /// Whether `code` is held
    ///
    /// # Arguments
    /// * `code` - Permission code; `None` or an empty code is always allowed
    ///
    /// # Returns
    /// * `true` if the element guarded by `code` may be shown
    pub fn has_permission(&self, code: Option<&str>) -> bool {
        match code {
            None | Some("") => true,
            Some(code) => self.read_cache().iter().any(|p| p == code),
        }
    }

    /// Whether at least one of `codes` is held
    ///
    /// # Arguments
    /// * `codes` - A comma-separated string or a list of codes; blanks are
    ///   dropped and an empty list is always allowed
    ///
    /// # Returns
    /// * `true` if any listed code is held
    pub fn has_any_permission(&self, codes: impl Into<PermissionCodes>) -> bool {
        let codes = codes.into();
        if codes.is_empty() {
            return true;
        }
        let cache = self.read_cache();
        codes.as_slice().iter().any(|code| cache.contains(code))
    }

    fn read_cache(&self) -> RwLockReadGuard<'_, Vec<String>> {
        self.cache
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write_cache(&self) -> RwLockWriteGuard<'_, Vec<String>> {
        self.cache
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
