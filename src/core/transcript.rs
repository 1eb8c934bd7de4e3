use crate::core::message::Turn;

/// Ordered turns of one session. Insertion order is conversation order and
/// timestamps never decrease along it.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a turn at the end. A turn stamped earlier than the current last
    /// turn (wall clock stepped back) takes the last turn's timestamp.
    pub fn append(&mut self, mut turn: Turn) {
        if let Some(last) = self.turns.last() {
            turn.clamp_timestamp(last.timestamp());
        }
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn first_user_turn(&self) -> Option<&Turn> {
        self.turns.iter().find(|turn| turn.is_user())
    }
}
