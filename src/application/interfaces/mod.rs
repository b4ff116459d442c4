/// Project service interface
pub mod project;
