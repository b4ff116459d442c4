/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/10/26
******************************************************************************/

//! # Intern Portal Client Prelude
//!
//! Brings the commonly used types and traits into scope.
//!
//! ```rust
//! use intern_portal_client::prelude::*;
//!
//! let config = Config::with_base_url("http://localhost:5000");
//! assert_eq!(config.auth.login_path, "/login");
//! ```

// ============================================================================
// CORE CONFIGURATION AND SETUP
// ============================================================================

/// Configuration for the portal client
pub use crate::config::{AuthConfig, Config, PermissionConfig, RestApiConfig};

/// Library version information
pub use crate::{VERSION, version};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Error types and the parse-failure adapter
pub use crate::error::{AppError, ParseError, ParseResultExt};

// ============================================================================
// CLIENT AND TRANSPORT
// ============================================================================

/// Authenticated client with session refresh
pub use crate::application::client::{AuthenticatedClient, Exchange, RequestOutcome};

/// Transport seam
pub use crate::application::transport::{ReqwestTransport, Transport};

/// Request and response values
pub use crate::model::http::{ApiResponse, Credentials, RequestDescriptor};

/// Expiry signal and session models
pub use crate::model::auth::{ExpiryCode, SessionInfo, expiry_signal};

// ============================================================================
// UI EFFECTS AND PERMISSIONS
// ============================================================================

/// Page side effects
pub use crate::application::effects::{RecordingEffects, TracingEffects, UiEffect, UiEffects};

/// Permission cache
pub use crate::application::permission::{
    FileSource, MemorySource, PermissionCodes, PermissionSource, PermissionStore,
};

/// Permission-driven visibility
pub use crate::presentation::{PermissionTarget, apply_permission_ui};

// ============================================================================
// PROJECTS
// ============================================================================

/// Project service
pub use crate::application::services::{ProjectService, ProjectServiceImpl};

/// Project models
pub use crate::model::project::{AssignProjectRequest, InternProject, Project, ProjectIntern};

/// Assignment controller
pub use crate::presentation::{
    AssignController, AssignOutcome, SelectOption, SelectState, intern_id_from_path,
};

// ============================================================================
// UTILITIES
// ============================================================================

/// Logging utilities
pub use crate::utils::logger::setup_logger;

/// Global constants
pub use crate::constants::*;

// ============================================================================
// RE-EXPORTS FROM EXTERNAL CRATES
// ============================================================================

/// Re-export commonly used external types
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
pub use std::sync::Arc;
pub use tokio;
pub use tracing::{debug, error, info, warn};

/// Re-export reqwest types used in request descriptors
pub use reqwest::{Method, StatusCode};
