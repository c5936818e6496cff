// IDE storage access
// Reads workspaceStorage state databases and keeps the trash in our own SQLite file.

mod composer;
mod error;
mod scanner;
mod state_db;
mod store;
mod trash;
mod workspace;

// Public API
pub use composer::{parse_sessions, SUBTITLE_MAX_CHARS};
pub use error::{Error, Result};
pub use scanner::Scanner;
pub use store::CursorStore;
pub use trash::TrashDatabase;
pub use workspace::{WorkspaceEntry, WorkspaceTarget};
