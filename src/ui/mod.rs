//! Plain-text presentation for interactive sessions.
//!
//! [`chat_loop`] owns the read/dispatch/print cycle; [`renderer`] turns
//! transcript state into output lines. Domain state lives in [`crate::core`].

pub mod chat_loop;
pub mod renderer;
