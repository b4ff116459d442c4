/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/10/26
******************************************************************************/

//! Controller behind the "assign intern to project" modal
//!
//! It owns the modal's view state and talks to the API only through a
//! [`ProjectService`]. Rendering is left to the host, which reads
//! [`AssignController::select`] and [`AssignController::is_open`].

use crate::application::effects::UiEffects;
use crate::application::interfaces::project::ProjectService;
use crate::constants::ASSIGN_MODAL_ID;
use crate::error::AppError;
use crate::model::project::{AssignProjectRequest, Project};
use std::sync::Arc;
use tracing::{error, info, warn};

/// One `<option>` of the project select
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Submitted value; empty for placeholders
    pub value: String,
    /// Displayed label
    pub label: String,
}

impl SelectOption {
    fn placeholder(label: &str) -> Self {
        Self {
            value: String::new(),
            label: label.to_string(),
        }
    }
}

impl From<&Project> for SelectOption {
    fn from(project: &Project) -> Self {
        Self {
            value: project.id.to_string(),
            label: project.title.clone(),
        }
    }
}

/// State of the project select
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectState {
    /// Modal has never been opened
    #[default]
    Idle,
    /// Projects are being fetched
    Loading,
    /// Projects were fetched
    Loaded(Vec<SelectOption>),
    /// Fetch succeeded but there is nothing to choose
    Empty,
    /// Fetch failed
    Failed,
}

impl SelectState {
    /// Options to render for this state
    #[must_use]
    pub fn options(&self) -> Vec<SelectOption> {
        match self {
            SelectState::Idle => Vec::new(),
            SelectState::Loading => vec![SelectOption::placeholder("Loading...")],
            SelectState::Loaded(options) => options.clone(),
            SelectState::Empty => vec![SelectOption::placeholder("No projects")],
            SelectState::Failed => vec![SelectOption::placeholder("Error loading")],
        }
    }
}

/// Result of an assignment attempt the user should be told about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignOutcome {
    /// Assignment stored; the modal was closed and the page reloaded
    Assigned,
    /// Server refused the assignment, with the message to show
    Rejected(String),
}

/// Extracts the intern id from a page path such as `/interns/42`
///
/// The last non-empty segment is read up to its first non-digit, so
/// `/interns/42abc` still yields `42`.
///
/// # Arguments
/// * `path` - Page path, without query string
///
/// # Returns
/// * `Some(id)` if the last segment starts with an integer, `None` otherwise
#[must_use]
pub fn intern_id_from_path(path: &str) -> Option<i64> {
    let segment = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .next_back()?
        .trim_start();
    let sign_len = usize::from(segment.starts_with(['+', '-']));
    let digits = segment[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(segment.len(), |end| sign_len + end);
    segment[..digits].parse().ok()
}

/// View model for the assignment modal
pub struct AssignController<P: ProjectService, E: UiEffects> {
    service: Arc<P>,
    effects: E,
    open: bool,
    select: SelectState,
}

impl<P: ProjectService, E: UiEffects> AssignController<P, E> {
    /// Creates a closed controller
    pub fn new(service: Arc<P>, effects: E) -> Self {
        Self {
            service,
            effects,
            open: false,
            select: SelectState::Idle,
        }
    }

    /// Whether the modal is shown
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Current state of the project select
    #[must_use]
    pub fn select(&self) -> &SelectState {
        &self.select
    }

    /// Shows the modal and loads the project list into the select
    pub async fn open(&mut self) -> &SelectState {
        self.open = true;
        self.load_projects().await
    }

    /// Hides the modal
    pub fn close(&mut self) {
        self.open = false;
        self.effects.hide_element(ASSIGN_MODAL_ID);
    }

    /// Reloads the project list into the select
    pub async fn load_projects(&mut self) -> &SelectState {
        self.select = SelectState::Loading;
        self.select = match self.service.list_projects().await {
            Ok(projects) if projects.is_empty() => SelectState::Empty,
            Ok(projects) => SelectState::Loaded(projects.iter().map(SelectOption::from).collect()),
            Err(e) => {
                error!("Failed to load projects: {e}");
                SelectState::Failed
            }
        };
        &self.select
    }

    /// Assigns the intern shown at `page_path` to the selected project
    ///
    /// On success the modal is closed and `page_path` is navigated to again.
    ///
    /// # Errors
    /// * [`AppError::InvalidInput`] if no project is selected or the path
    ///   carries no intern id
    /// * Transport and decoding errors; a refused assignment is an
    ///   [`AssignOutcome::Rejected`], not an error
    pub async fn assign(
        &mut self,
        page_path: &str,
        selected_project: &str,
        role: &str,
    ) -> Result<AssignOutcome, AppError> {
        let project_id = selected_project
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|id| *id != 0)
            .ok_or_else(|| AppError::InvalidInput("Please choose a project".to_string()))?;
        let intern_id = intern_id_from_path(page_path)
            .ok_or_else(|| AppError::InvalidInput(format!("No intern id in path {page_path:?}")))?;

        let request = AssignProjectRequest::new(intern_id, project_id, Some(role));
        match self.service.assign_project(&request).await {
            Ok(_) => {
                info!("Intern {intern_id} assigned to project {project_id}");
                self.close();
                self.effects.navigate(page_path);
                Ok(AssignOutcome::Assigned)
            }
            Err(e @ AppError::RequestFailed { .. }) => {
                warn!("Assignment refused: {e}");
                let message = e.server_message().unwrap_or("Assign failed").to_string();
                Ok(AssignOutcome::Rejected(message))
            }
            Err(e) => Err(e),
        }
    }
}
