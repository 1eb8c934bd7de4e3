use super::CommandResult;
use crate::core::app::App;

pub type CommandHandler = fn(&mut App, CommandInvocation<'_>) -> CommandResult;

pub struct Command {
    pub name: &'static str,
    pub usage: &'static str,
    pub help: &'static str,
    pub handler: CommandHandler,
}

#[derive(Clone, Copy)]
pub struct CommandInvocation<'a> {
    pub args: &'a str,
}

pub fn all_commands() -> &'static [Command] {
    COMMANDS
}

pub fn find_command(name: &str) -> Option<&'static Command> {
    all_commands()
        .iter()
        .find(|command| command.name.eq_ignore_ascii_case(name))
}

const COMMANDS: &[Command] = &[
    Command {
        name: "help",
        usage: "/help",
        help: "Show available commands.",
        handler: super::handlers::core::handle_help,
    },
    Command {
        name: "new",
        usage: "/new",
        help: "Start a new conversation and switch to it.",
        handler: super::handlers::session::handle_new,
    },
    Command {
        name: "sessions",
        usage: "/sessions",
        help: "List conversations, most recent first.",
        handler: super::handlers::session::handle_sessions,
    },
    Command {
        name: "switch",
        usage: "/switch <id|number>",
        help: "Switch to a conversation by id (s-3) or list position.",
        handler: super::handlers::session::handle_switch,
    },
    Command {
        name: "quit",
        usage: "/quit",
        help: "Leave the chat.",
        handler: super::handlers::core::handle_quit,
    },
];
