use crate::state::DungeonState;

/// Linear undo/redo history of dungeon states.
///
/// The cursor always points at a valid entry (`index < len`). Pushing
/// after an undo discards every state past the cursor.
#[derive(Debug, Clone)]
pub struct History {
    states: Vec<DungeonState>,
    index: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DungeonState::start())
    }
}

impl History {
    /// Creates a history holding only `initial`.
    #[must_use]
    pub fn new(initial: DungeonState) -> Self {
        Self {
            states: vec![initial],
            index: 0,
        }
    }

    /// The state at the cursor.
    #[must_use]
    pub fn current(&self) -> &DungeonState {
        &self.states[self.index]
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always `false`: a history holds at least one state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    #[must_use]
    pub fn states(&self) -> &[DungeonState] {
        &self.states
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.states.len()
    }

    /// Appends `state` after the cursor, discarding any redo branch, and
    /// moves the cursor onto it.
    pub fn push(&mut self, state: DungeonState) {
        self.states.truncate(self.index + 1);
        self.states.push(state);
        self.index = self.states.len() - 1;
    }

    /// Moves the cursor back one entry. Returns `false` at the start.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Moves the cursor forward one entry. Returns `false` at the end.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Replaces the whole history with a single state.
    pub fn reset(&mut self, state: DungeonState) {
        self.states.clear();
        self.states.push(state);
        self.index = 0;
    }
}
