//! Shared constants used across the application

/// Assistant text used when the endpoint answers successfully but without
/// any text in the first choice.
pub const FALLBACK_RESPONSE: &str = "Sorry, I couldn't generate a response.";

/// Assistant text appended for every failed exchange, whatever the cause.
/// The cause itself only goes to the log.
pub const ERROR_RESPONSE: &str =
    "❌ Sorry, an error occurred while processing your message. Check your connection and try again.";

/// Display name of the assistant in the transcript.
pub const ASSISTANT_DISPLAY_NAME: &str = "GENYX AI";
