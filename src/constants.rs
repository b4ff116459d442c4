/// User agent string sent with every request
pub const USER_AGENT: &str = "intern-portal-client/0.1.0";
/// Default base URL of the portal when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Endpoint that renews an expired-but-renewable session
pub const REFRESH_PATH: &str = "/api/auth/refresh";
/// Login entry point the user is sent to when the session cannot be renewed
pub const LOGIN_PATH: &str = "/login";
/// Endpoint returning the current user and their permission codes
pub const ME_PATH: &str = "/api/auth/me";
/// Default location of the cached permission list
pub const DEFAULT_PERMISSIONS_FILE: &str = ".portal/permissions.json";
/// Expiry code for an expired access token
pub const TOKEN_EXPIRED: &str = "TOKEN_EXPIRED";
/// Expiry code for an expired session
pub const SESSION_EXPIRED: &str = "SESSION_EXPIRED";
/// Role given to an intern when none is chosen
pub const DEFAULT_ASSIGN_ROLE: &str = "Member";
/// Element id of the assignment modal
pub const ASSIGN_MODAL_ID: &str = "assignModal";
