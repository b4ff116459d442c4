/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! Error types for the intern portal client
//!
//! [`AppError`] is the single failure type surfaced to callers. Body parsing
//! has its own [`ParseError`] so the permissive "unparsable body means no
//! data" behaviour stays visible at the call site instead of being swallowed.

use reqwest::StatusCode;
use serde_json::Value;
use std::fmt;

/// Main error type for the library
#[derive(Debug)]
pub enum AppError {
    /// Transport failure before a response was obtained
    Http(reqwest::Error),
    /// Final response status was outside the success range
    RequestFailed {
        /// Status of the final response
        status: StatusCode,
        /// Parsed body of the final response, if it was valid JSON
        data: Option<Value>,
    },
    /// JSON (de)serialization error
    Json(serde_json::Error),
    /// I/O error, e.g. while persisting the permission cache
    Io(std::io::Error),
    /// Body was valid but did not match the expected type
    Deserialization(String),
    /// Request payload could not be serialized
    SerializationError(String),
    /// Caller supplied invalid input
    InvalidInput(String),
}

impl AppError {
    /// Status code carried by a [`AppError::RequestFailed`], if any
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AppError::RequestFailed { status, .. } => Some(*status),
            AppError::Http(e) => e.status(),
            _ => None,
        }
    }

    /// Parsed body carried by a [`AppError::RequestFailed`], if any
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        match self {
            AppError::RequestFailed { data, .. } => data.as_ref(),
            _ => None,
        }
    }

    /// The `error` string the server placed in a failed response body
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        self.data()
            .and_then(|d| d.get("error"))
            .and_then(Value::as_str)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Http(e) => write!(f, "http error: {e}"),
            AppError::RequestFailed { status, data } => match data {
                Some(d) => write!(f, "request failed with status {status}: {d}"),
                None => write!(f, "request failed with status {status}"),
            },
            AppError::Json(e) => write!(f, "json error: {e}"),
            AppError::Io(e) => write!(f, "io error: {e}"),
            AppError::Deserialization(msg) => write!(f, "deserialization error: {msg}"),
            AppError::SerializationError(msg) => write!(f, "serialization error: {msg}"),
            AppError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Http(e) => Some(e),
            AppError::Json(e) => Some(e),
            AppError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Http(e)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Json(e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e)
    }
}

/// Failure to parse a response body
#[derive(Debug)]
pub enum ParseError {
    /// Body was empty
    Empty,
    /// Body was not valid JSON, or not the expected shape
    Invalid(serde_json::Error),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty body"),
            ParseError::Invalid(e) => write!(f, "invalid body: {e}"),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<serde_json::Error> for ParseError {
    fn from(e: serde_json::Error) -> Self {
        ParseError::Invalid(e)
    }
}

/// Maps a body parse result onto "data or nothing"
///
/// This is the single place where a [`ParseError`] is discarded.
pub trait ParseResultExt<T> {
    /// Returns the parsed value, or `None` if parsing failed
    fn absent(self) -> Option<T>;
}

impl<T> ParseResultExt<T> for Result<T, ParseError> {
    fn absent(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::trace!("treating unparsable body as absent: {e}");
                None
            }
        }
    }
}
