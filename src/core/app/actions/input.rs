use super::{request, App, AppAction, AppCommand};
use crate::commands::{process_input, CommandResult};

pub(super) fn handle_input_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::SetInput { text } => {
            app.set_input(text);
            None
        }
        AppAction::ClearInput => {
            app.clear_input();
            None
        }
        AppAction::SetStatus { message } => {
            app.set_status(message);
            None
        }
        AppAction::ClearStatus => {
            app.clear_status();
            None
        }
        AppAction::ProcessCommand { input } => handle_process_command(app, input),
        _ => unreachable!("non-input action routed to input handler"),
    }
}

fn handle_process_command(app: &mut App, input: String) -> Option<AppCommand> {
    if input.trim().is_empty() {
        return None;
    }

    match process_input(app, &input) {
        CommandResult::Continue => None,
        CommandResult::ProcessAsMessage(message) => request::submit_message(app, message),
    }
}
