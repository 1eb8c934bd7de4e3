//! Line-oriented chat loop
//!
//! Reads one line at a time, turns it into actions, and races input against
//! completion events so the transcript keeps updating while a reply is
//! outstanding.

use std::error::Error;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::debug;

use crate::commands::find_command;
use crate::core::app::{apply_action, apply_actions, App, AppAction, AppCommand};
use crate::core::completion::{CompletionEvent, CompletionService};
use crate::core::endpoint::EndpointSettings;
use crate::ui::renderer::{typing_indicator, TranscriptView};

const DRAFT_KEPT_HINT: &str =
    "Still waiting for the previous reply. Your message was kept; press Enter on an empty line to send it.";
const DRAFT_READY_HINT: &str = "Reply received. Press Enter on an empty line to send your kept message.";

pub async fn run_chat(endpoint: EndpointSettings) -> Result<(), Box<dyn Error>> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    run_chat_with(App::new(endpoint), stdin, &mut stdout).await?;
    Ok(())
}

/// Drives `app` from `input` until `/quit` or end of input and returns it.
///
/// End of input waits for an outstanding reply before returning. `/quit`
/// cancels it instead.
pub async fn run_chat_with<R, W>(mut app: App, input: R, out: &mut W) -> Result<App, Box<dyn Error>>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (service, mut rx) = CompletionService::new();
    let mut lines = input.lines();
    let mut view = TranscriptView::default();
    let mut input_closed = false;

    write_lines(out, &banner(&app)).await?;
    view.sync(&app);

    loop {
        if input_closed && !app.in_flight() {
            break;
        }

        tokio::select! {
            line = lines.next_line(), if !input_closed => {
                let Some(line) = line? else {
                    debug!("input closed");
                    input_closed = true;
                    continue;
                };

                let is_command = is_known_command(&line);
                let actions = actions_for_line(&app, line);
                let commands = apply_actions(&mut app, actions);
                flush(out, &mut app, &mut view).await?;

                for cmd in commands {
                    match cmd {
                        AppCommand::RequestCompletion(params) => {
                            service.spawn_request(params);
                            write_lines(out, &[typing_indicator()]).await?;
                        }
                    }
                }

                if !is_command && !app.input.is_empty() && app.in_flight() {
                    write_lines(out, &[DRAFT_KEPT_HINT.to_string()]).await?;
                }
                if app.exit_requested {
                    break;
                }
            }
            Some(event) = rx.recv() => {
                handle_completion_event(&mut app, event, out, &mut view).await?;
            }
        }
    }

    if app.in_flight() {
        apply_action(&mut app, AppAction::CancelRequest);
        flush(out, &mut app, &mut view).await?;
    }
    Ok(app)
}

fn banner(app: &App) -> Vec<String> {
    vec![
        format!(
            "GENYX AI · {} via {}",
            app.endpoint.model, app.endpoint.base_url
        ),
        "Type a message and press Enter. /help lists commands.".to_string(),
    ]
}

/// An empty line sends the kept draft, if any. Known slash commands never
/// touch the draft; an unknown `/word` is a message and is kept like one.
fn actions_for_line(app: &App, line: String) -> Vec<AppAction> {
    if line.trim().is_empty() {
        if app.input.is_empty() {
            return Vec::new();
        }
        return vec![AppAction::ProcessCommand {
            input: app.input.clone(),
        }];
    }

    if is_known_command(&line) {
        return vec![AppAction::ProcessCommand { input: line }];
    }

    vec![
        AppAction::SetInput { text: line.clone() },
        AppAction::ProcessCommand { input: line },
    ]
}

fn is_known_command(line: &str) -> bool {
    line.trim()
        .strip_prefix('/')
        .and_then(|rest| rest.split(char::is_whitespace).next())
        .is_some_and(|name| find_command(name).is_some())
}

async fn handle_completion_event<W>(
    app: &mut App,
    event: CompletionEvent,
    out: &mut W,
    view: &mut TranscriptView,
) -> Result<(), Box<dyn Error>>
where
    W: AsyncWrite + Unpin,
{
    let target = app
        .request
        .current()
        .filter(|request| request.request_id == event.request_id)
        .map(|request| request.target_session.clone());

    apply_action(app, event.into_action());
    flush(out, app, view).await?;

    if let Some(target) = target {
        if app.active_session_id() != Some(&target) {
            let title = app
                .sessions
                .session(&target)
                .map(|session| session.title().to_string())
                .unwrap_or_default();
            write_lines(out, &[format!("(reply arrived in {target} · {title})")]).await?;
        }
        if !app.input.is_empty() {
            write_lines(out, &[DRAFT_READY_HINT.to_string()]).await?;
        }
    }
    Ok(())
}

async fn flush<W>(out: &mut W, app: &mut App, view: &mut TranscriptView) -> Result<(), Box<dyn Error>>
where
    W: AsyncWrite + Unpin,
{
    let mut lines = view.render(app);
    if let Some(status) = app.take_status() {
        lines.push(status);
    }
    write_lines(out, &lines).await
}

async fn write_lines<W>(out: &mut W, lines: &[String]) -> Result<(), Box<dyn Error>>
where
    W: AsyncWrite + Unpin,
{
    for line in lines {
        out.write_all(line.as_bytes()).await?;
        out.write_all(b"\n").await?;
    }
    out.flush().await?;
    Ok(())
}
