use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::api::{send_chat_completion, ChatRequest, CompletionError};
use crate::core::app::AppAction;

/// Everything the background task needs to perform one exchange.
pub struct CompletionParams {
    pub client: reqwest::Client,
    pub base_url: String,
    pub api_key: String,
    pub request: ChatRequest,
    pub request_id: u64,
    pub cancel_token: CancellationToken,
}

/// How one exchange settled.
#[derive(Debug)]
pub struct CompletionEvent {
    pub request_id: u64,
    pub outcome: Result<Option<String>, CompletionError>,
}

impl CompletionEvent {
    pub fn into_action(self) -> AppAction {
        match self.outcome {
            Ok(content) => AppAction::CompletionSucceeded {
                request_id: self.request_id,
                content,
            },
            Err(error) => AppAction::CompletionFailed {
                request_id: self.request_id,
                error,
            },
        }
    }
}

/// Runs completion exchanges off the state-owning task and reports each one
/// exactly once on the paired receiver.
#[derive(Clone)]
pub struct CompletionService {
    tx: mpsc::UnboundedSender<CompletionEvent>,
}

impl CompletionService {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<CompletionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn spawn_request(&self, params: CompletionParams) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let CompletionParams {
                client,
                base_url,
                api_key,
                request,
                request_id,
                cancel_token,
            } = params;

            debug!(request_id, messages = request.messages.len(), "sending completion request");

            let outcome = tokio::select! {
                result = send_chat_completion(&client, &base_url, &api_key, &request) => result,
                _ = cancel_token.cancelled() => Err(CompletionError::Cancelled),
            };

            let _ = tx.send(CompletionEvent {
                request_id,
                outcome,
            });
        });
    }
}
