//! GENYX is a line-oriented chat client for OpenAI-compatible endpoints that
//! keeps several independent conversations in memory.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns turns, sessions and the single-flight request
//!   orchestration, plus configuration and endpoint resolution.
//! - [`api`] defines the chat-completion and model-list payloads and the HTTP
//!   calls that carry them.
//! - [`commands`] implements slash-command parsing used by the chat loop.
//! - [`ui`] runs the interactive loop and formats the transcript.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod commands;
pub mod core;
pub mod ui;
pub mod utils;
