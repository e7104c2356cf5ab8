use crate::error::{CollaboratorError, Result};
use crate::state::DungeonState;

/// The backing document a dungeon persists into.
pub trait DocumentStore {
    /// Reads the stored content; `None` if nothing was ever saved.
    ///
    /// # Errors
    ///
    /// Returns `CollaboratorError::Persistence` if the store cannot be read.
    fn load(&self) -> Result<Option<String>>;

    /// Replaces the stored content.
    ///
    /// # Errors
    ///
    /// Returns `CollaboratorError::Persistence` if the write fails.
    fn update(&mut self, content: &str) -> Result<()>;
}

/// Redraws the dungeon. Called once per completed change with the state
/// now current.
pub trait Renderer {
    fn render(&mut self, state: &DungeonState);
}

impl<F> Renderer for F
where
    F: FnMut(&DungeonState),
{
    fn render(&mut self, state: &DungeonState) {
        self(state);
    }
}

/// What the local user may do to the dungeon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// May edit, write walls and reset.
    Owner,
    /// May edit the shared document but not write walls or reset.
    Viewer,
}

impl Permission {
    #[must_use]
    pub fn is_privileged(self) -> bool {
        matches!(self, Self::Owner)
    }
}

/// In-memory document store.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    content: Option<String>,
    writes: usize,
    read_only: bool,
}

impl MemoryDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `content`.
    #[must_use]
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Number of successful updates.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Makes every following update fail.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }
}

impl DocumentStore for MemoryDocument {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.content.clone())
    }

    fn update(&mut self, content: &str) -> Result<()> {
        if self.read_only {
            return Err(CollaboratorError::Persistence("document is read-only".to_owned()).into());
        }
        self.content = Some(content.to_owned());
        self.writes += 1;
        Ok(())
    }
}
