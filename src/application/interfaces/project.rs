use crate::error::AppError;
use crate::model::project::{AssignProjectRequest, InternProject, Project, ProjectIntern};
use async_trait::async_trait;
use serde_json::Value;

/// Interface for project and intern-assignment operations
#[async_trait]
pub trait ProjectService: Send + Sync {
    /// Lists every project visible to the current user
    ///
    /// # Returns
    /// * The projects in the order the server sends them
    async fn list_projects(&self) -> Result<Vec<Project>, AppError>;

    /// Assigns an intern to a project
    ///
    /// # Arguments
    /// * `request` - Intern, project and role of the new assignment
    ///
    /// # Returns
    /// * The server's answer, whatever its shape
    async fn assign_project(
        &self,
        request: &AssignProjectRequest,
    ) -> Result<Option<Value>, AppError>;

    /// Removes an intern from a project
    ///
    /// # Arguments
    /// * `intern_id` - Intern to remove
    /// * `project_id` - Project they are removed from
    ///
    /// # Returns
    /// * `true` if an assignment was removed
    async fn remove_project(&self, intern_id: i64, project_id: i64) -> Result<bool, AppError>;

    /// Projects an intern is assigned to
    ///
    /// # Arguments
    /// * `intern_id` - Intern whose projects are listed
    ///
    /// # Returns
    /// * One entry per assignment, with project details and role
    async fn projects_of_intern(&self, intern_id: i64) -> Result<Vec<InternProject>, AppError>;

    /// Interns assigned to a project
    ///
    /// # Arguments
    /// * `project_id` - Project whose members are listed
    ///
    /// # Returns
    /// * One entry per assigned intern, with contact details and role
    async fn interns_of_project(&self, project_id: i64) -> Result<Vec<ProjectIntern>, AppError>;
}
