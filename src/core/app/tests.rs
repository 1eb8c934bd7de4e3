use super::*;
use crate::api::CompletionError;
use crate::core::completion::{CompletionParams, CompletionService};
use crate::core::constants::{ERROR_RESPONSE, FALLBACK_RESPONSE};
use crate::core::message::Role;
use crate::core::session::SessionRegistry;
use crate::utils::test_utils::{create_test_app, test_endpoint, MockEndpoint, MockReply};

fn submit(app: &mut App, message: &str) -> Option<CompletionParams> {
    apply_action(
        app,
        AppAction::SubmitMessage {
            message: message.into(),
        },
    )
    .map(|AppCommand::RequestCompletion(params)| params)
}

fn succeed(app: &mut App, request_id: u64, content: &str) {
    apply_action(
        app,
        AppAction::CompletionSucceeded {
            request_id,
            content: Some(content.into()),
        },
    );
}

fn fail(app: &mut App, request_id: u64) {
    apply_action(
        app,
        AppAction::CompletionFailed {
            request_id,
            error: CompletionError::Status {
                status: 500,
                body: "boom".into(),
            },
        },
    );
}

fn roles(turns: &[crate::core::message::Turn]) -> Vec<Role> {
    turns.iter().map(|turn| turn.role()).collect()
}

#[test]
fn hello_gets_the_assistant_reply() {
    let mut app = create_test_app();

    let params = submit(&mut app, "hello").expect("request issued");
    assert!(app.in_flight());
    succeed(&mut app, params.request_id, "hi there");

    let turns = app.current_turns();
    assert_eq!(roles(turns), vec![Role::User, Role::Assistant]);
    assert_eq!(turns[0].content(), "hello");
    assert_eq!(turns[1].content(), "hi there");
    assert!(!app.in_flight());
}

#[test]
fn failed_exchange_appends_the_apology() {
    let mut app = create_test_app();

    let params = submit(&mut app, "ping").expect("request issued");
    fail(&mut app, params.request_id);

    let turns = app.current_turns();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0].content(), "ping");
    assert_eq!(turns[1].role(), Role::Assistant);
    assert_eq!(turns[1].content(), ERROR_RESPONSE);
    assert!(!app.in_flight());
}

#[test]
fn every_user_turn_gets_exactly_one_reply() {
    let mut app = create_test_app();

    for (i, outcome) in [true, false, true].into_iter().enumerate() {
        let params = submit(&mut app, &format!("message {i}")).expect("request issued");
        // Duplicate deliveries must not add a second reply.
        if outcome {
            succeed(&mut app, params.request_id, "ok");
            succeed(&mut app, params.request_id, "ok again");
        } else {
            fail(&mut app, params.request_id);
            fail(&mut app, params.request_id);
        }
    }

    assert_eq!(
        roles(app.current_turns()),
        vec![
            Role::User,
            Role::Assistant,
            Role::User,
            Role::Assistant,
            Role::User,
            Role::Assistant
        ]
    );
}

#[test]
fn only_one_request_is_ever_outstanding() {
    let mut app = create_test_app();

    let first = submit(&mut app, "one").expect("request issued");
    assert!(submit(&mut app, "two").is_none());
    assert!(submit(&mut app, "three").is_none());
    assert_eq!(app.current_turns().len(), 1);

    succeed(&mut app, first.request_id, "done");
    let second = submit(&mut app, "four").expect("request issued after resolution");
    assert_ne!(first.request_id, second.request_id);
}

#[test]
fn pending_request_blocks_sends_on_other_sessions() {
    let mut app = create_test_app();
    let _ = submit(&mut app, "on a").expect("request issued");

    apply_action(&mut app, AppAction::NewSession);
    assert!(submit(&mut app, "on b").is_none());
    assert!(app.current_turns().is_empty());
}

#[test]
fn turns_keep_submission_order_and_monotonic_timestamps() {
    let mut app = create_test_app();
    for text in ["first", "second", "third"] {
        let params = submit(&mut app, text).expect("request issued");
        succeed(&mut app, params.request_id, &format!("re: {text}"));
    }

    let contents: Vec<&str> = app.current_turns().iter().map(|t| t.content()).collect();
    assert_eq!(
        contents,
        vec!["first", "re: first", "second", "re: second", "third", "re: third"]
    );
    assert!(app
        .current_turns()
        .windows(2)
        .all(|pair| pair[0].timestamp() <= pair[1].timestamp()));
}

#[test]
fn reply_lands_in_the_session_that_asked() {
    let mut app = create_test_app();
    let session_a = app.active_session_id().cloned().unwrap();

    let params = submit(&mut app, "question for a").expect("request issued");
    apply_action(&mut app, AppAction::NewSession);
    let session_b = app.active_session_id().cloned().unwrap();
    succeed(&mut app, params.request_id, "answer for a");

    assert!(app.current_turns().is_empty());
    assert_eq!(app.active_session_id(), Some(&session_b));

    apply_action(&mut app, AppAction::ActivateSession { id: session_a });
    let turns = app.current_turns();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[1].content(), "answer for a");
}

#[test]
fn switching_back_and_forth_does_not_cancel() {
    let mut app = create_test_app();
    let session_a = app.active_session_id().cloned().unwrap();
    let params = submit(&mut app, "hi").expect("request issued");

    apply_action(&mut app, AppAction::NewSession);
    apply_action(&mut app, AppAction::ActivateSession { id: session_a });
    assert!(app.in_flight());
    assert!(!params.cancel_token.is_cancelled());
}

#[test]
fn request_carries_system_prompt_and_full_history() {
    let mut app = create_test_app();
    let first = submit(&mut app, "hello").expect("request issued");
    succeed(&mut app, first.request_id, "hi there");

    let second = submit(&mut app, "how are you?").expect("request issued");
    let request = &second.request;

    assert_eq!(request.model, "test-model");
    assert_eq!(request.max_tokens, 1000);
    assert!(!request.stream);
    let sent: Vec<(&str, &str)> = request
        .messages
        .iter()
        .map(|m| (m.role.as_str(), m.content.as_str()))
        .collect();
    assert_eq!(
        sent,
        vec![
            ("system", "test system prompt"),
            ("user", "hello"),
            ("assistant", "hi there"),
            ("user", "how are you?"),
        ]
    );
}

#[test]
fn request_history_comes_only_from_the_active_session() {
    let mut app = create_test_app();
    let first = submit(&mut app, "in a").expect("request issued");
    succeed(&mut app, first.request_id, "reply a");

    apply_action(&mut app, AppAction::NewSession);
    let params = submit(&mut app, "in b").expect("request issued");

    assert_eq!(params.request.messages.len(), 2);
    assert_eq!(params.request.messages[1].content, "in b");
}

#[test]
fn missing_content_becomes_fallback() {
    let mut app = create_test_app();
    let params = submit(&mut app, "hello").expect("request issued");

    apply_action(
        &mut app,
        AppAction::CompletionSucceeded {
            request_id: params.request_id,
            content: None,
        },
    );

    assert_eq!(app.current_turns()[1].content(), FALLBACK_RESPONSE);
}

#[test]
fn shutdown_cancellation_settles_the_pending_turn() {
    let mut app = create_test_app();
    let params = submit(&mut app, "hello").expect("request issued");

    assert!(app.cancel_current_request());
    assert!(params.cancel_token.is_cancelled());
    assert!(!app.in_flight());
    assert_eq!(app.current_turns()[1].content(), ERROR_RESPONSE);
    assert!(!app.cancel_current_request());
}

#[test]
fn process_command_runs_slash_commands_and_submits_text() {
    let mut app = create_test_app();
    let commands = apply_actions(
        &mut app,
        [
            AppAction::ProcessCommand {
                input: "/new".into(),
            },
            AppAction::ProcessCommand {
                input: "hello".into(),
            },
        ],
    );

    assert_eq!(commands.len(), 1);
    assert_eq!(app.session_list().len(), 2);
    assert_eq!(app.current_turns().len(), 1);
}

#[test]
fn submit_without_active_session_changes_nothing() {
    let mut app = App::with_sessions(
        test_endpoint("https://api.test.com/v1"),
        SessionRegistry::empty(),
    );

    assert!(submit(&mut app, "hello").is_none());
    assert!(!app.in_flight());
    assert!(app.current_turns().is_empty());
    assert!(app.session_list().is_empty());
}

#[test]
fn first_session_created_from_empty_registry_gets_the_reply() {
    let mut app = App::with_sessions(
        test_endpoint("https://api.test.com/v1"),
        SessionRegistry::empty(),
    );
    assert!(submit(&mut app, "hello").is_none());

    let id = app.sessions.create_session();
    app.switch_session(&id).expect("created session activates");
    let params = submit(&mut app, "hello").expect("request issued");
    succeed(&mut app, params.request_id, "hi there");

    let turns: Vec<(Role, &str)> = app
        .current_turns()
        .iter()
        .map(|turn| (turn.role(), turn.content()))
        .collect();
    assert_eq!(
        turns,
        vec![(Role::User, "hello"), (Role::Assistant, "hi there")]
    );
    assert_eq!(app.active_session_id(), Some(&id));
    assert!(!app.in_flight());
}

#[test]
fn title_follows_first_message() {
    let mut app = create_test_app();
    let _ = submit(&mut app, "Plan a trip to Lisbon\nwith details").expect("request issued");

    let summary = &app.session_list()[0];
    assert_eq!(summary.title, "Plan a trip to Lisbon");
    assert_eq!(summary.turn_count, 1);
}

#[tokio::test]
async fn end_to_end_exchange_against_http_endpoint() {
    let endpoint = MockEndpoint::start(vec![
        MockReply::json(200, r#"{"choices":[{"message":{"content":"hi there"}}]}"#),
        MockReply::json(500, r#"{"error":{"message":"overloaded"}}"#),
    ])
    .await;
    let mut app = App::new(test_endpoint(&endpoint.base_url()));
    let (service, mut rx) = CompletionService::new();

    for message in ["hello", "ping"] {
        let params = submit(&mut app, message).expect("request issued");
        service.spawn_request(params);
        let event = rx.recv().await.expect("completion event");
        apply_action(&mut app, event.into_action());
        assert!(!app.in_flight());
    }

    let contents: Vec<&str> = app.current_turns().iter().map(|t| t.content()).collect();
    assert_eq!(contents, vec!["hello", "hi there", "ping", ERROR_RESPONSE]);

    let captured = endpoint.finish().await;
    assert_eq!(captured.len(), 2);
    let second = captured[1].json();
    let history = second["messages"].as_array().expect("messages array");
    assert_eq!(history.len(), 4);
    assert_eq!(history[0]["role"], "system");
    assert_eq!(history[2]["content"], "hi there");
    assert_eq!(history[3]["content"], "ping");
}
