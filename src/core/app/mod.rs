//! Conversation state and the single-flight request orchestration around it.
//!
//! All mutation goes through [`apply_actions`] on one task. Network work is
//! handed back to the caller as [`AppCommand`]s and its outcome comes back in
//! as resolution actions, so the only suspension point is the exchange
//! itself.

use tracing::error;

use crate::core::endpoint::EndpointSettings;
use crate::core::message::Turn;
use crate::core::session::{SessionError, SessionId, SessionRegistry, SessionSummary};

pub mod actions;
pub mod conversation;
pub mod request;

pub use actions::{apply_action, apply_actions, AppAction, AppCommand};
pub use conversation::ConversationController;
pub use request::{InFlightRequest, RequestState};

pub struct App {
    pub sessions: SessionRegistry,
    pub endpoint: EndpointSettings,
    pub request: RequestState,
    /// Pending text the user is composing; cleared when a send is accepted.
    pub input: String,
    pub status: Option<String>,
    pub exit_requested: bool,
}

impl App {
    /// App with the implicit start-up session active.
    pub fn new(endpoint: EndpointSettings) -> Self {
        Self::with_sessions(endpoint, SessionRegistry::new())
    }

    pub fn with_sessions(endpoint: EndpointSettings, sessions: SessionRegistry) -> Self {
        Self {
            sessions,
            endpoint,
            request: RequestState::default(),
            input: String::new(),
            status: None,
            exit_requested: false,
        }
    }

    /// Returns a controller for conversation operations.
    ///
    /// The controller appends turns, builds the upstream message list and
    /// folds request outcomes back into the right session.
    pub fn conversation(&mut self) -> ConversationController<'_> {
        ConversationController::new(&mut self.sessions, &mut self.request, &self.endpoint)
    }

    pub fn current_turns(&self) -> &[Turn] {
        self.sessions.current_turns()
    }

    pub fn session_list(&self) -> Vec<SessionSummary> {
        self.sessions.list()
    }

    pub fn active_session_id(&self) -> Option<&SessionId> {
        self.sessions.active_id()
    }

    pub fn in_flight(&self) -> bool {
        self.request.is_in_flight()
    }

    /// "New chat": create a session and make it active. An outstanding
    /// request keeps its original target.
    pub fn start_new_session(&mut self) -> SessionId {
        let id = self.sessions.create_session();
        if let Err(err) = self.sessions.activate(&id) {
            error!(%err, "new session could not be activated");
        }
        id
    }

    pub fn switch_session(&mut self, id: &SessionId) -> Result<(), SessionError> {
        self.sessions.activate(id)
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    pub fn set_status<S: Into<String>>(&mut self, s: S) {
        self.status = Some(s.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn take_status(&mut self) -> Option<String> {
        self.status.take()
    }
}

#[cfg(test)]
mod tests;
