/// Authenticated client with transparent session refresh
pub mod client;
/// Application configuration module
pub mod config;
/// Page side-effect abstraction
pub mod effects;
/// Service interfaces
pub mod interfaces;
/// Cached permission codes
pub mod permission;
/// Service implementations
pub mod services;
/// HTTP transport abstraction
pub mod transport;
