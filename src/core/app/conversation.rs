use tracing::{debug, error, warn};

use super::request::RequestState;
use crate::api::{ChatMessage, ChatRequest, CompletionError};
use crate::core::completion::CompletionParams;
use crate::core::constants::{ERROR_RESPONSE, FALLBACK_RESPONSE};
use crate::core::endpoint::EndpointSettings;
use crate::core::message::Turn;
use crate::core::session::{SessionId, SessionRegistry};

pub struct ConversationController<'a> {
    sessions: &'a mut SessionRegistry,
    request: &'a mut RequestState,
    endpoint: &'a EndpointSettings,
}

impl<'a> ConversationController<'a> {
    pub fn new(
        sessions: &'a mut SessionRegistry,
        request: &'a mut RequestState,
        endpoint: &'a EndpointSettings,
    ) -> Self {
        Self {
            sessions,
            request,
            endpoint,
        }
    }

    /// Records the user turn on the active session and opens a request
    /// against it. Returns `None` when nothing is active.
    ///
    /// The caller has already checked the single-flight guard and that the
    /// message is not blank; the content is stored exactly as typed.
    pub fn start_request(&mut self, message: String) -> Option<CompletionParams> {
        let target = self.sessions.active_id()?.clone();
        self.sessions.append(Turn::user(message));

        let messages = self.build_api_messages(&target);
        let (request_id, cancel_token) = self.request.begin(target.clone());
        debug!(
            session = %target,
            request_id,
            messages = messages.len(),
            "submit accepted"
        );

        let endpoint = self.endpoint;
        Some(CompletionParams {
            client: endpoint.client.clone(),
            base_url: endpoint.base_url.clone(),
            api_key: endpoint.api_key.clone(),
            request: ChatRequest {
                model: endpoint.model.clone(),
                messages,
                max_tokens: endpoint.max_tokens,
                temperature: endpoint.temperature,
                stream: false,
            },
            request_id,
            cancel_token,
        })
    }

    /// System prompt followed by the whole transcript of `session`.
    pub fn build_api_messages(&self, session: &SessionId) -> Vec<ChatMessage> {
        let turns = self
            .sessions
            .session(session)
            .map(|session| session.turns())
            .unwrap_or_default();

        let mut messages = Vec::with_capacity(turns.len() + 1);
        messages.push(ChatMessage::system(self.endpoint.system_prompt.clone()));
        messages.extend(turns.iter().map(Turn::to_api_message));
        messages
    }

    /// Folds the outcome of the current request into its target session and
    /// clears the single-flight guard. Exactly one assistant turn is added.
    pub fn resolve_request(&mut self, outcome: Result<Option<String>, CompletionError>) {
        let Some(request) = self.request.finish() else {
            return;
        };

        let content = match outcome {
            Ok(Some(content)) if !content.is_empty() => content,
            Ok(_) => FALLBACK_RESPONSE.to_string(),
            Err(err) => {
                warn!(
                    request_id = request.request_id,
                    session = %request.target_session,
                    error = %err,
                    "completion request failed"
                );
                ERROR_RESPONSE.to_string()
            }
        };

        self.append_reply(&request.target_session, content);
    }

    /// Aborts the current request. Its target still receives the error turn
    /// so every user turn keeps a reply.
    pub fn cancel_request(&mut self) -> bool {
        let Some(request) = self.request.cancel() else {
            return false;
        };
        debug!(request_id = request.request_id, "request cancelled");
        self.append_reply(&request.target_session, ERROR_RESPONSE.to_string());
        true
    }

    fn append_reply(&mut self, target: &SessionId, content: String) {
        if let Err(err) = self.sessions.append_to(target, Turn::assistant(content)) {
            error!(%err, "dropping assistant reply");
        }
    }
}
