/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/10/26
******************************************************************************/
use crate::constants::DEFAULT_ASSIGN_ROLE;
use chrono::NaiveDate;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Deserializer, Serialize};

/// A project interns can be assigned to
#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Project {
    /// Project identifier
    pub id: i64,
    /// Human readable title
    pub title: String,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Lifecycle status, e.g. `in_progress`
    #[serde(default)]
    pub status: Option<String>,
    /// Start date
    #[serde(default, deserialize_with = "lenient_date")]
    pub start_date: Option<NaiveDate>,
    /// End date, if the project is closed
    #[serde(default, deserialize_with = "lenient_date")]
    pub end_date: Option<NaiveDate>,
}

/// Dates arrive as `YYYY-MM-DD`, `null`, or the literal string `"None"`
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()))
}

/// Body of `POST /api/intern-project/assign`
#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq)]
pub struct AssignProjectRequest {
    /// Intern being assigned
    pub intern_id: i64,
    /// Target project
    pub project_id: i64,
    /// Role inside the project
    pub role: String,
    /// Acting user; the server takes it from the session, so this is always 0
    pub user_id: i64,
}

impl AssignProjectRequest {
    /// Builds a request, defaulting a blank role to `Member`
    #[must_use]
    pub fn new(intern_id: i64, project_id: i64, role: Option<&str>) -> Self {
        let role = role
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_ASSIGN_ROLE)
            .to_string();
        Self {
            intern_id,
            project_id,
            role,
            user_id: 0,
        }
    }
}

/// Body of `POST /api/intern-project/remove`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoveProjectRequest {
    /// Intern being removed
    pub intern_id: i64,
    /// Project they are removed from
    pub project_id: i64,
}

/// Answer of `POST /api/intern-project/remove`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoveProjectResponse {
    /// Whether an assignment was actually removed
    pub removed: bool,
}

/// A project as listed for one intern, with the assignment details
#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq)]
pub struct InternProject {
    /// Project identifier
    pub project_id: i64,
    /// Project title
    #[serde(default)]
    pub title: Option<String>,
    /// Project description
    #[serde(default)]
    pub description: Option<String>,
    /// Project lifecycle status
    #[serde(default)]
    pub status: Option<String>,
    /// First day of the project
    #[serde(default, deserialize_with = "lenient_date")]
    pub start_date: Option<NaiveDate>,
    /// Last day of the project
    #[serde(default, deserialize_with = "lenient_date")]
    pub end_date: Option<NaiveDate>,
    /// Role inside the project
    #[serde(default)]
    pub role_in_project: Option<String>,
    /// Date of assignment
    #[serde(default, deserialize_with = "lenient_date")]
    pub assigned_date: Option<NaiveDate>,
}

/// An intern as listed for one project, with the assignment details
#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProjectIntern {
    /// Intern identifier
    pub id: i64,
    /// Full name
    pub name: String,
    /// Contact email
    #[serde(default)]
    pub email: Option<String>,
    /// Contact phone
    #[serde(default)]
    pub phone: Option<String>,
    /// University attended
    #[serde(default)]
    pub university: Option<String>,
    /// Field of study
    #[serde(default)]
    pub major: Option<String>,
    /// Role inside the project
    #[serde(default)]
    pub role_in_project: Option<String>,
    /// Date of assignment
    #[serde(default, deserialize_with = "lenient_date")]
    pub assigned_date: Option<NaiveDate>,
}
