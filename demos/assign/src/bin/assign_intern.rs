use intern_portal_client::prelude::*;
use std::env;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logger();

    // usage: assign_intern <intern page path> <project id> [role]
    let mut args = env::args().skip(1);
    let page_path = args.next().unwrap_or_else(|| "/interns/1".to_string());
    let project = args.next().unwrap_or_default();
    let role = args.next().unwrap_or_default();

    let config = Config::new();
    let effects = Arc::new(RecordingEffects::new());
    let client = Arc::new(AuthenticatedClient::with_effects(
        config.clone(),
        effects.clone(),
    )?);

    let store = PermissionStore::from_config(&config);
    store.load();
    match store.refresh_from_session(client.as_ref()).await {
        Ok(session) => info!("Signed in with {} permissions", session.permissions.len()),
        Err(e) => warn!("Could not refresh permissions: {e}"),
    }

    let targets = vec![PermissionTarget::new("assign-button").requires("PROJECT_ASSIGN_INTERN")];
    let hidden = apply_permission_ui(&targets, &store, &effects);
    if !hidden.is_empty() {
        warn!("Assign button hidden for this user");
    }

    let service = Arc::new(ProjectServiceImpl::new(client.clone()));
    let mut controller = AssignController::new(service, effects.clone());

    for option in controller.open().await.options() {
        info!("  [{}] {}", option.value, option.label);
    }

    match controller.assign(&page_path, &project, &role).await {
        Ok(AssignOutcome::Assigned) => info!("Assigned!"),
        Ok(AssignOutcome::Rejected(message)) => warn!("{message}"),
        Err(e) => warn!("{e}"),
    }

    for effect in effects.effects() {
        info!("UI effect: {effect:?}");
    }
    Ok(())
}
