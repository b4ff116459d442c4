/// Intern-to-project assignment controller
pub mod assign;
/// Permission-driven element visibility
pub mod permission_ui;

pub use assign::{AssignController, AssignOutcome, SelectOption, SelectState, intern_id_from_path};
pub use permission_ui::{PermissionTarget, apply_permission_ui};
