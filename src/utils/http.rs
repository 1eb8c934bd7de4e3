//! Small helpers shared by every request sent to the configured endpoint.

/// Join a base URL and an endpoint path with exactly one slash between them.
///
/// ```
/// use genyx::utils::http::endpoint_url;
///
/// assert_eq!(
///     endpoint_url("https://router.huggingface.co/v1/", "/chat/completions"),
///     "https://router.huggingface.co/v1/chat/completions"
/// );
/// ```
pub fn endpoint_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

/// Attach the bearer credential. An empty credential is sent as-is; the
/// endpoint is expected to reject it.
pub fn with_bearer_auth(request: reqwest::RequestBuilder, api_key: &str) -> reqwest::RequestBuilder {
    request.header("Authorization", format!("Bearer {api_key}"))
}

/// Collapse an error body into one line, preferring the `error.message`
/// field that OpenAI-compatible servers return.
pub fn summarize_error_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty>".to_string();
    }

    let summary = serde_json::from_str::<serde_json::Value>(trimmed)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .and_then(|v| v.as_str())
                .or_else(|| value.get("error").and_then(|v| v.as_str()))
                .or_else(|| value.get("message").and_then(|v| v.as_str()))
                .map(str::to_owned)
        })
        .unwrap_or_else(|| trimmed.to_string());

    summary.split_whitespace().collect::<Vec<_>>().join(" ")
}
