//! One-shot "say" command

use std::error::Error;

use crate::core::app::{apply_action, App, AppAction, AppCommand};
use crate::core::completion::CompletionService;
use crate::core::constants::ERROR_RESPONSE;
use crate::core::endpoint::EndpointSettings;

/// Sends `prompt` as the first message of a fresh conversation and prints the
/// reply. Returns the process exit code: 1 when the exchange failed.
pub async fn run_say(endpoint: EndpointSettings, prompt: Vec<String>) -> Result<i32, Box<dyn Error>> {
    let prompt = prompt.join(" ");
    if prompt.trim().is_empty() {
        eprintln!("Usage: genyx say <prompt>");
        return Ok(2);
    }

    let mut app = App::new(endpoint);
    let reply = exchange_once(&mut app, prompt).await?;
    println!("{reply}");

    Ok(if reply == ERROR_RESPONSE { 1 } else { 0 })
}

async fn exchange_once(app: &mut App, prompt: String) -> Result<String, Box<dyn Error>> {
    let Some(AppCommand::RequestCompletion(params)) =
        apply_action(app, AppAction::SubmitMessage { message: prompt })
    else {
        return Err("message was not accepted".into());
    };

    let (service, mut rx) = CompletionService::new();
    service.spawn_request(params);
    let event = rx
        .recv()
        .await
        .ok_or("completion task ended without reporting")?;
    apply_action(app, event.into_action());

    app.current_turns()
        .last()
        .filter(|turn| turn.is_assistant())
        .map(|turn| turn.content().to_string())
        .ok_or_else(|| "no reply was recorded".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::{test_endpoint, MockEndpoint, MockReply};

    #[tokio::test]
    async fn successful_reply_exits_zero() {
        let endpoint = MockEndpoint::start(vec![MockReply::json(
            200,
            r#"{"choices":[{"message":{"content":"hi there"}}]}"#,
        )])
        .await;

        let code = run_say(test_endpoint(&endpoint.base_url()), vec!["hello".into()])
            .await
            .expect("say runs");

        assert_eq!(code, 0);
        let captured = endpoint.finish().await;
        assert_eq!(captured[0].json()["messages"][1]["content"], "hello");
    }

    #[tokio::test]
    async fn failed_exchange_exits_one() {
        let base_url = MockEndpoint::unused_base_url().await;

        let code = run_say(test_endpoint(&base_url), vec!["ping".into()])
            .await
            .expect("say runs");

        assert_eq!(code, 1);
    }

    #[tokio::test]
    async fn words_are_joined_into_one_message() {
        let endpoint = MockEndpoint::start(vec![MockReply::json(
            200,
            r#"{"choices":[{"message":{"content":"ok"}}]}"#,
        )])
        .await;
        let mut app = App::new(test_endpoint(&endpoint.base_url()));

        let reply = exchange_once(&mut app, ["two", "words"].join(" "))
            .await
            .expect("exchange");

        assert_eq!(reply, "ok");
        assert_eq!(app.current_turns()[0].content(), "two words");
        endpoint.finish().await;
    }

    #[tokio::test]
    async fn blank_prompt_is_a_usage_error() {
        let code = run_say(test_endpoint("http://127.0.0.1:9/v1"), vec![" ".into()])
            .await
            .expect("say runs");
        assert_eq!(code, 2);
    }
}
