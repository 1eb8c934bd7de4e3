//! Conversation domain: turns, sessions, request orchestration and the
//! configuration that shapes outgoing requests.

pub mod app;
pub mod completion;
pub mod config;
pub mod constants;
pub mod endpoint;
pub mod message;
pub mod session;
pub mod transcript;
