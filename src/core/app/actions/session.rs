use super::{App, AppAction, AppCommand};

pub(super) fn handle_session_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::NewSession => {
            app.start_new_session();
            None
        }
        AppAction::ActivateSession { id } => {
            if let Err(err) = app.switch_session(&id) {
                app.set_status(err.to_string());
            }
            None
        }
        _ => unreachable!("non-session action routed to session handler"),
    }
}
