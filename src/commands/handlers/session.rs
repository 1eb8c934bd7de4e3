use crate::commands::registry::CommandInvocation;
use crate::commands::CommandResult;
use crate::core::app::{apply_action, App, AppAction};
use crate::core::session::SessionId;

pub(crate) fn handle_new(app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    apply_action(app, AppAction::NewSession);
    if let Some(id) = app.active_session_id() {
        let message = format!("Started conversation {id}");
        app.set_status(message);
    }
    CommandResult::Continue
}

pub(crate) fn handle_sessions(app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    let mut listing = String::from("Conversations:");
    for (position, summary) in app.session_list().iter().enumerate() {
        let marker = if summary.is_active { '*' } else { ' ' };
        listing.push_str(&format!(
            "\n{marker} {}. {}  {}  ({} turns, {})",
            position + 1,
            summary.id,
            summary.title,
            summary.turn_count,
            summary.created_at.format("%H:%M:%S"),
        ));
    }
    app.set_status(listing);
    CommandResult::Continue
}

pub(crate) fn handle_switch(app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    let target = invocation.args;
    if target.is_empty() {
        app.set_status("Usage: /switch <id|number>");
        return CommandResult::Continue;
    }

    let id = match target.parse::<usize>() {
        Ok(position) => app.sessions.id_at(position).cloned(),
        Err(_) => SessionId::parse(target),
    };
    let Some(id) = id else {
        app.set_status(format!("Unknown conversation: {target}"));
        return CommandResult::Continue;
    };

    apply_action(app, AppAction::ActivateSession { id: id.clone() });
    if app.active_session_id() == Some(&id) {
        let title = app
            .sessions
            .active()
            .map(|session| session.title().to_string())
            .unwrap_or_default();
        app.set_status(format!("Switched to {id} ({title})"));
    }
    CommandResult::Continue
}
