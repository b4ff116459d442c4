/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use crate::constants::{SESSION_EXPIRED, TOKEN_EXPIRED};
use crate::error::ParseResultExt;
use crate::model::http::ApiResponse;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Codes in a 401 body meaning the session can be renewed without logging in again
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryCode {
    /// The access token expired
    TokenExpired,
    /// The session expired
    SessionExpired,
}

impl ExpiryCode {
    /// Matches a raw `error` string against the known codes
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            TOKEN_EXPIRED => Some(ExpiryCode::TokenExpired),
            SESSION_EXPIRED => Some(ExpiryCode::SessionExpired),
            _ => None,
        }
    }

    /// Wire representation of the code
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpiryCode::TokenExpired => TOKEN_EXPIRED,
            ExpiryCode::SessionExpired => SESSION_EXPIRED,
        }
    }
}

/// Reads the expiry code out of a response
///
/// Only a 401 can carry one. The body is expected to look like
/// `{ "error": "TOKEN_EXPIRED" }`; an unparsable body, a missing `error`
/// field or an unknown code all mean there is no expiry signal.
#[must_use]
pub fn expiry_signal(response: &ApiResponse) -> Option<ExpiryCode> {
    if response.status() != StatusCode::UNAUTHORIZED {
        return None;
    }
    let body = response.json::<Value>().absent()?;
    body.get("error")
        .and_then(Value::as_str)
        .and_then(ExpiryCode::from_code)
}

/// Current user and permissions, as returned by `GET /api/auth/me`
#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq)]
pub struct SessionInfo {
    /// User record as sent by the server
    #[serde(default)]
    pub user: Value,
    /// Permission codes granted to the user
    #[serde(default)]
    pub permissions: Vec<String>,
}
