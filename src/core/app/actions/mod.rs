mod input;
mod request;
mod session;

use super::App;
use crate::api::CompletionError;
use crate::core::completion::CompletionParams;
use crate::core::session::SessionId;

#[derive(Debug)]
pub enum AppAction {
    SubmitMessage {
        message: String,
    },
    CompletionSucceeded {
        request_id: u64,
        content: Option<String>,
    },
    CompletionFailed {
        request_id: u64,
        error: CompletionError,
    },
    CancelRequest,
    NewSession,
    ActivateSession {
        id: SessionId,
    },
    SetInput {
        text: String,
    },
    ClearInput,
    SetStatus {
        message: String,
    },
    ClearStatus,
    ProcessCommand {
        input: String,
    },
}

/// Work the driver has to perform outside the state-owning task.
pub enum AppCommand {
    RequestCompletion(CompletionParams),
}

pub fn apply_actions(app: &mut App, actions: impl IntoIterator<Item = AppAction>) -> Vec<AppCommand> {
    let mut commands = Vec::new();
    for action in actions {
        if let Some(cmd) = apply_action(app, action) {
            commands.push(cmd);
        }
    }
    commands
}

pub fn apply_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::SubmitMessage { .. }
        | AppAction::CompletionSucceeded { .. }
        | AppAction::CompletionFailed { .. }
        | AppAction::CancelRequest => request::handle_request_action(app, action),

        AppAction::NewSession | AppAction::ActivateSession { .. } => {
            session::handle_session_action(app, action)
        }

        AppAction::SetInput { .. }
        | AppAction::ClearInput
        | AppAction::SetStatus { .. }
        | AppAction::ClearStatus
        | AppAction::ProcessCommand { .. } => input::handle_input_action(app, action),
    }
}
