/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/10/26
******************************************************************************/
use crate::application::effects::UiEffects;
use crate::application::permission::{PermissionCodes, PermissionSource, PermissionStore};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// An element whose visibility depends on the user's permissions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionTarget {
    /// Element id passed to [`UiEffects::hide_element`]
    pub id: String,
    /// Single permission the element requires
    #[serde(default)]
    pub permission: Option<String>,
    /// Comma-separated permissions, any one of which is enough
    #[serde(default)]
    pub permission_any: Option<String>,
}

impl PermissionTarget {
    /// Target with no requirement
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Requires `code`
    #[must_use]
    pub fn requires(mut self, code: impl Into<String>) -> Self {
        self.permission = Some(code.into());
        self
    }

    /// Requires any of the comma-separated `codes`
    #[must_use]
    pub fn requires_any(mut self, codes: impl Into<String>) -> Self {
        self.permission_any = Some(codes.into());
        self
    }

    fn is_allowed<S: PermissionSource>(&self, store: &PermissionStore<S>) -> bool {
        let single = match self.permission.as_deref() {
            Some(code) if !code.is_empty() => store.has_permission(Some(code)),
            _ => true,
        };
        let any = match self.permission_any.as_deref() {
            Some(codes) => store.has_any_permission(PermissionCodes::from(codes)),
            None => true,
        };
        single && any
    }
}

/// Hides every target whose requirement is not met
///
/// # Returns
/// Ids of the hidden elements, in target order
pub fn apply_permission_ui<S, E>(
    targets: &[PermissionTarget],
    store: &PermissionStore<S>,
    effects: &E,
) -> Vec<String>
where
    S: PermissionSource,
    E: UiEffects + ?Sized,
{
    let mut hidden = Vec::new();
    for target in targets {
        if !target.is_allowed(store) {
            effects.hide_element(&target.id);
            hidden.push(target.id.clone());
        }
    }
    debug!(
        "Permission UI hid {} of {} elements",
        hidden.len(),
        targets.len()
    );
    hidden
}
