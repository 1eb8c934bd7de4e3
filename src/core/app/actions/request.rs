use tracing::debug;

use super::{App, AppAction, AppCommand};

pub(super) fn handle_request_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::SubmitMessage { message } => submit_message(app, message),
        AppAction::CompletionSucceeded {
            request_id,
            content,
        } => {
            if !is_current(app, request_id) {
                return None;
            }
            app.conversation().resolve_request(Ok(content));
            None
        }
        AppAction::CompletionFailed { request_id, error } => {
            if !is_current(app, request_id) {
                return None;
            }
            app.conversation().resolve_request(Err(error));
            None
        }
        AppAction::CancelRequest => {
            app.cancel_current_request();
            None
        }
        _ => unreachable!("non-request action routed to request handler"),
    }
}

/// Accepts a message unless it is blank or another request is outstanding.
/// Rejections leave every piece of state untouched.
pub(super) fn submit_message(app: &mut App, message: String) -> Option<AppCommand> {
    if message.trim().is_empty() {
        debug!(reason = "empty", "submit rejected");
        return None;
    }
    if app.in_flight() {
        debug!(reason = "in_flight", "submit rejected");
        return None;
    }

    let params = app.conversation().start_request(message)?;
    app.clear_input();
    app.clear_status();
    Some(AppCommand::RequestCompletion(params))
}

fn is_current(app: &App, request_id: u64) -> bool {
    if app.is_current_request(request_id) {
        return true;
    }
    debug!(request_id, "ignoring stale completion event");
    false
}
