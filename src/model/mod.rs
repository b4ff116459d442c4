/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
/// Expiry signal and session models
pub mod auth;
/// Request descriptors and buffered responses
pub mod http;
/// Project and assignment models
pub mod project;
