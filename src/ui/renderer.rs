use crate::core::app::App;
use crate::core::constants::ASSISTANT_DISPLAY_NAME;
use crate::core::message::{Role, Turn};
use crate::core::session::SessionId;

pub const USER_LABEL: &str = "You";

/// One transcript line per turn, content printed verbatim.
pub fn format_turn(turn: &Turn) -> String {
    let label = match turn.role() {
        Role::User => USER_LABEL,
        Role::Assistant => ASSISTANT_DISPLAY_NAME,
    };
    format!("{label}: {}", turn.content())
}

pub fn typing_indicator() -> String {
    format!("{ASSISTANT_DISPLAY_NAME} is typing…")
}

/// Tracks how much of the active session has been printed so each render
/// only emits what is new. Switching sessions replays the whole transcript
/// under a header.
#[derive(Debug, Default)]
pub struct TranscriptView {
    session: Option<SessionId>,
    shown: usize,
}

impl TranscriptView {
    pub fn render(&mut self, app: &App) -> Vec<String> {
        let mut lines = Vec::new();
        let active = app.active_session_id().cloned();

        if active != self.session {
            if let Some(session) = app.sessions.active() {
                lines.push(format!("── {} · {} ──", session.id(), session.title()));
            }
            self.session = active;
            self.shown = 0;
        }

        let turns = app.current_turns();
        lines.extend(turns.iter().skip(self.shown).map(format_turn));
        self.shown = turns.len();
        lines
    }

    /// Marks the current state as printed without emitting it.
    pub fn sync(&mut self, app: &App) {
        self.session = app.active_session_id().cloned();
        self.shown = app.current_turns().len();
    }
}
