//! Sessions and the registry that tracks which one is active.

use std::error::Error;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::core::message::Turn;
use crate::core::transcript::Transcript;

pub const DEFAULT_SESSION_TITLE: &str = "New Conversation";
const TITLE_MAX_CHARS: usize = 40;

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    fn allocate() -> Self {
        Self(NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Parses the `s-<n>` form produced by `Display`.
    pub fn parse(value: &str) -> Option<Self> {
        value
            .trim()
            .strip_prefix("s-")
            .and_then(|n| n.parse::<u64>().ok())
            .map(Self)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No session with this id was ever created.
    NotFound(SessionId),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NotFound(id) => write!(f, "No session with id {id}"),
        }
    }
}

impl Error for SessionError {}

#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    title: String,
    transcript: Transcript,
    created_at: DateTime<Utc>,
}

impl Session {
    fn new() -> Self {
        Self {
            id: SessionId::allocate(),
            title: DEFAULT_SESSION_TITLE.to_string(),
            transcript: Transcript::new(),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn turns(&self) -> &[Turn] {
        self.transcript.turns()
    }

    fn append(&mut self, turn: Turn) {
        if turn.is_user() && self.transcript.first_user_turn().is_none() {
            if let Some(title) = title_from_content(turn.content()) {
                self.title = title;
            }
        }
        self.transcript.append(turn);
    }
}

fn title_from_content(content: &str) -> Option<String> {
    let line = content.lines().map(str::trim).find(|line| !line.is_empty())?;
    let mut chars = line.chars();
    let mut title: String = chars.by_ref().take(TITLE_MAX_CHARS).collect();
    if chars.next().is_some() {
        title.push('…');
    }
    Some(title)
}

/// Read-only view of a session used by listings.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub id: SessionId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub turn_count: usize,
    pub is_active: bool,
}

/// All sessions of the process, most recently created first, plus the
/// pointer to the active one.
#[derive(Debug, Clone)]
pub struct SessionRegistry {
    sessions: Vec<Session>,
    active: Option<SessionId>,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRegistry {
    /// Registry holding the implicit start-up session, already active.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        let id = registry.create_session();
        registry.active = Some(id);
        registry
    }

    pub fn empty() -> Self {
        Self {
            sessions: Vec::new(),
            active: None,
        }
    }

    /// Adds an empty session at the front of the listing. The caller decides
    /// whether to activate it.
    pub fn create_session(&mut self) -> SessionId {
        let session = Session::new();
        let id = session.id.clone();
        info!(session = %id, "created session");
        self.sessions.insert(0, session);
        id
    }

    pub fn activate(&mut self, id: &SessionId) -> Result<(), SessionError> {
        if self.session(id).is_none() {
            return Err(SessionError::NotFound(id.clone()));
        }
        info!(session = %id, "activated session");
        self.active = Some(id.clone());
        Ok(())
    }

    pub fn list(&self) -> Vec<SessionSummary> {
        self.sessions
            .iter()
            .map(|session| SessionSummary {
                id: session.id.clone(),
                title: session.title.clone(),
                created_at: session.created_at,
                turn_count: session.transcript.len(),
                is_active: self.active.as_ref() == Some(&session.id),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn active_id(&self) -> Option<&SessionId> {
        self.active.as_ref()
    }

    pub fn active(&self) -> Option<&Session> {
        self.active.as_ref().and_then(|id| self.session(id))
    }

    pub fn session(&self, id: &SessionId) -> Option<&Session> {
        self.sessions.iter().find(|session| &session.id == id)
    }

    fn session_mut(&mut self, id: &SessionId) -> Option<&mut Session> {
        self.sessions.iter_mut().find(|session| &session.id == id)
    }

    /// Looks a session up by its position in `list()` (1-based).
    pub fn id_at(&self, position: usize) -> Option<&SessionId> {
        position
            .checked_sub(1)
            .and_then(|index| self.sessions.get(index))
            .map(|session| &session.id)
    }

    /// Turns of the active session; empty when nothing is active.
    pub fn current_turns(&self) -> &[Turn] {
        self.active().map(Session::turns).unwrap_or(&[])
    }

    /// Appends to the active session.
    pub fn append(&mut self, turn: Turn) {
        let Some(id) = self.active.clone() else {
            debug_assert!(false, "append with no active session");
            return;
        };
        if let Some(session) = self.session_mut(&id) {
            session.append(turn);
        }
    }

    /// Appends to a specific session regardless of which one is active.
    pub fn append_to(&mut self, id: &SessionId, turn: Turn) -> Result<(), SessionError> {
        let session = self
            .session_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.clone()))?;
        session.append(turn);
        Ok(())
    }
}
