/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_PERMISSIONS_FILE, DEFAULT_TIMEOUT_SECS, LOGIN_PATH, ME_PATH,
    REFRESH_PATH,
};
use crate::utils::config::{get_env_or_default, get_env_or_none, normalize_path};
use dotenv::dotenv;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq)]
/// Main configuration for the portal client
pub struct Config {
    /// REST API configuration
    pub rest_api: RestApiConfig,
    /// Session refresh and login endpoints
    pub auth: AuthConfig,
    /// Permission cache configuration
    pub permissions: PermissionConfig,
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq)]
/// Configuration for the REST API
pub struct RestApiConfig {
    /// Base URL that relative request paths are resolved against
    pub base_url: String,
    /// Timeout in seconds for REST API requests
    pub timeout: u64,
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq)]
/// Endpoints involved in the session lifecycle
pub struct AuthConfig {
    /// Endpoint renewing an expired session (POST, no body)
    pub refresh_path: String,
    /// Page the user is sent to when the session cannot be renewed
    pub login_path: String,
    /// Endpoint returning the current user and permissions
    pub me_path: String,
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq)]
/// Where the permission list is cached between runs
pub struct PermissionConfig {
    /// JSON file holding the cached permission codes
    pub cache_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Loads configuration from the environment (and a `.env` file if present)
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `PORTAL_BASE_URL` | `http://localhost:5000` |
    /// | `PORTAL_TIMEOUT_SECS` | `30` |
    /// | `PORTAL_REFRESH_PATH` | `/api/auth/refresh` |
    /// | `PORTAL_LOGIN_PATH` | `/login` |
    /// | `PORTAL_ME_PATH` | `/api/auth/me` |
    /// | `PORTAL_PERMISSIONS_FILE` | `.portal/permissions.json` |
    pub fn new() -> Self {
        match dotenv() {
            Ok(_) => debug!("Successfully loaded .env file"),
            Err(e) => debug!("Failed to load .env file: {e}"),
        }

        let base_url: Option<String> = get_env_or_none("PORTAL_BASE_URL");
        if base_url.is_none() {
            warn!("PORTAL_BASE_URL not set, using {DEFAULT_BASE_URL}");
        }

        Config {
            rest_api: RestApiConfig {
                base_url: base_url
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                    .trim_end_matches('/')
                    .to_string(),
                timeout: get_env_or_default("PORTAL_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS),
            },
            auth: AuthConfig {
                refresh_path: normalize_path(&get_env_or_default(
                    "PORTAL_REFRESH_PATH",
                    REFRESH_PATH.to_string(),
                )),
                login_path: normalize_path(&get_env_or_default(
                    "PORTAL_LOGIN_PATH",
                    LOGIN_PATH.to_string(),
                )),
                me_path: normalize_path(&get_env_or_default("PORTAL_ME_PATH", ME_PATH.to_string())),
            },
            permissions: PermissionConfig {
                cache_file: get_env_or_default(
                    "PORTAL_PERMISSIONS_FILE",
                    PathBuf::from(DEFAULT_PERMISSIONS_FILE),
                ),
            },
        }
    }

    /// Configuration pointing at `base_url` with every other setting at its default
    ///
    /// Does not read the environment.
    pub fn with_base_url(base_url: &str) -> Self {
        Config {
            rest_api: RestApiConfig {
                base_url: base_url.trim_end_matches('/').to_string(),
                timeout: DEFAULT_TIMEOUT_SECS,
            },
            auth: AuthConfig {
                refresh_path: REFRESH_PATH.to_string(),
                login_path: LOGIN_PATH.to_string(),
                me_path: ME_PATH.to_string(),
            },
            permissions: PermissionConfig {
                cache_file: PathBuf::from(DEFAULT_PERMISSIONS_FILE),
            },
        }
    }

    /// Resolves a request target against the base URL
    ///
    /// Absolute `http://` and `https://` URLs are returned unchanged.
    #[must_use]
    pub fn resolve_url(&self, target: &str) -> String {
        if target.starts_with("http://") || target.starts_with("https://") {
            target.to_string()
        } else {
            format!("{}{}", self.rest_api.base_url, normalize_path(target))
        }
    }
}
