/// Module containing the project service for listing and assigning projects
pub mod project_service;

pub use crate::application::interfaces::project::*;
pub use project_service::*;
