use crate::application::client::AuthenticatedClient;
use crate::application::effects::UiEffects;
use crate::application::interfaces::project::ProjectService;
use crate::application::transport::Transport;
use crate::error::AppError;
use crate::model::http::RequestDescriptor;
use crate::model::project::{
    AssignProjectRequest, InternProject, Project, ProjectIntern, RemoveProjectRequest,
    RemoveProjectResponse,
};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

const PROJECTS_PATH: &str = "/api/projects/";
const INTERN_PROJECT_PATH: &str = "/api/intern-project";

/// Implementation of the project service
pub struct ProjectServiceImpl<T: Transport, U: UiEffects> {
    client: Arc<AuthenticatedClient<T, U>>,
}

impl<T: Transport, U: UiEffects> ProjectServiceImpl<T, U> {
    /// Creates a new instance of the project service
    ///
    /// # Arguments
    /// * `client` - Authenticated client shared with the rest of the application
    ///
    /// # Returns
    /// * A service issuing every call through `client`
    pub fn new(client: Arc<AuthenticatedClient<T, U>>) -> Self {
        Self { client }
    }

    /// Gets the underlying client
    pub fn client(&self) -> Arc<AuthenticatedClient<T, U>> {
        self.client.clone()
    }
}

#[async_trait]
impl<T: Transport + 'static, U: UiEffects + 'static> ProjectService for ProjectServiceImpl<T, U> {
    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        debug!("Getting projects");
        let projects: Vec<Project> = self.client.get_json(PROJECTS_PATH).await?;
        debug!("Projects obtained: {}", projects.len());
        Ok(projects)
    }

    async fn assign_project(
        &self,
        request: &AssignProjectRequest,
    ) -> Result<Option<Value>, AppError> {
        info!(
            "Assigning intern {} to project {} as {}",
            request.intern_id, request.project_id, request.role
        );
        let descriptor =
            RequestDescriptor::post(format!("{INTERN_PROJECT_PATH}/assign")).json(request)?;
        self.client.request_json(&descriptor).await
    }

    async fn remove_project(&self, intern_id: i64, project_id: i64) -> Result<bool, AppError> {
        info!("Removing intern {intern_id} from project {project_id}");
        let body = RemoveProjectRequest {
            intern_id,
            project_id,
        };
        let result: RemoveProjectResponse = self
            .client
            .post_json(&format!("{INTERN_PROJECT_PATH}/remove"), &body)
            .await?;
        Ok(result.removed)
    }

    async fn projects_of_intern(&self, intern_id: i64) -> Result<Vec<InternProject>, AppError> {
        debug!("Getting projects of intern {intern_id}");
        self.client
            .get_json(&format!("{INTERN_PROJECT_PATH}/{intern_id}/projects"))
            .await
    }

    async fn interns_of_project(&self, project_id: i64) -> Result<Vec<ProjectIntern>, AppError> {
        debug!("Getting interns of project {project_id}");
        self.client
            .get_json(&format!("{INTERN_PROJECT_PATH}/{project_id}/interns"))
            .await
    }
}
