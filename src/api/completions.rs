use std::error::Error;
use std::fmt;

use crate::api::{ChatCompletionResponse, ChatRequest};
use crate::utils::http::{endpoint_url, summarize_error_body, with_bearer_auth};

/// Every way a single completion exchange can fail. The conversation never
/// sees these; they are folded into one fixed error turn and only reach the
/// log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    /// The request never produced an HTTP response (DNS, TLS, connection reset...).
    Transport(String),

    /// The endpoint answered with a non-2xx status.
    Status { status: u16, body: String },

    /// A 2xx response whose body is not a chat-completion object.
    Decode(String),

    /// The exchange was abandoned before it settled.
    Cancelled,
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionError::Transport(detail) => write!(f, "transport error: {detail}"),
            CompletionError::Status { status, body } => {
                write!(f, "API request failed with status {status}: {body}")
            }
            CompletionError::Decode(detail) => write!(f, "malformed completion body: {detail}"),
            CompletionError::Cancelled => write!(f, "request cancelled"),
        }
    }
}

impl Error for CompletionError {}

/// Perform one non-streaming chat-completion exchange.
///
/// Returns the first choice's text, or `Ok(None)` when the body is well
/// formed but carries no text.
pub async fn send_chat_completion(
    client: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    request: &ChatRequest,
) -> Result<Option<String>, CompletionError> {
    let url = endpoint_url(base_url, "chat/completions");
    let http_request = client
        .post(url)
        .header("Content-Type", "application/json");
    let http_request = with_bearer_auth(http_request, api_key);

    let response = http_request
        .json(request)
        .send()
        .await
        .map_err(|e| CompletionError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<no body>".to_string());
        return Err(CompletionError::Status {
            status: status.as_u16(),
            body: summarize_error_body(&body),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| CompletionError::Transport(e.to_string()))?;
    let parsed: ChatCompletionResponse =
        serde_json::from_str(&body).map_err(|e| CompletionError::Decode(e.to_string()))?;

    Ok(parsed.into_first_content())
}
