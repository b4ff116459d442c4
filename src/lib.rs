/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! # Intern Portal Client
//!
//! Client library for the intern portal HTTP API.
//!
//! ## Features
//!
//! - **Transparent session refresh**: a 401 carrying `TOKEN_EXPIRED` or
//!   `SESSION_EXPIRED` triggers one call to the refresh endpoint and one retry
//!   of the original request. If the refresh fails the user is sent to the
//!   login page.
//! - **JSON convenience layer**: `request_json` fails with a structured
//!   `{status, data}` error on any non-2xx final response.
//! - **Permission cache**: an explicitly loaded `PermissionStore` answers
//!   `has_permission` / `has_any_permission` and drives element visibility.
//! - **Project assignment**: a `ProjectService` and a view-model controller
//!   for assigning interns to projects.
//!
//! Page side effects (hiding elements, navigation) go through the
//! `UiEffects` trait so every piece can run headless.
//!
//! ## Quick start
//!
//! ```ignore
//! use intern_portal_client::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     setup_logger();
//!     let client = AuthenticatedClient::new(Config::new())?;
//!     let projects: Vec<Project> = client.get_json("/api/projects/").await?;
//!     info!("{} projects", projects.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! Read from environment variables or a `.env` file:
//!
//! ```ini
//! PORTAL_BASE_URL=http://localhost:5000
//! PORTAL_TIMEOUT_SECS=30
//! PORTAL_REFRESH_PATH=/api/auth/refresh
//! PORTAL_LOGIN_PATH=/login
//! PORTAL_ME_PATH=/api/auth/me
//! PORTAL_PERMISSIONS_FILE=.portal/permissions.json
//! LOGLEVEL=INFO
//! ```

/// Client, configuration, transport, effects, permissions and services
pub mod application;
/// Global constants
pub mod constants;
/// Error types
pub mod error;
/// Data models
pub mod model;
/// Commonly used re-exports
pub mod prelude;
/// Controllers and view helpers
pub mod presentation;
/// Utility functions
pub mod utils;

/// Re-export of the configuration module
pub use application::config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
#[must_use]
pub fn version() -> &'static str {
    VERSION
}
