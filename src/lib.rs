pub mod dungeon;
pub mod error;
pub mod geometry;
pub mod history;
pub mod math;
pub mod operations;
pub mod state;
pub mod synthesis;

pub use dungeon::{Dungeon, DocumentStore, Permission, Renderer};
pub use error::{Result, VaultplanError};
pub use history::History;
pub use state::{DungeonConfig, DungeonState};
