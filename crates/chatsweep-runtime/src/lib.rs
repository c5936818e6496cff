// Session services
// Owns the snapshot, per-list selections and the batch delete state machine.
// Rendering and process setup live in the CLI.

pub mod backend;
pub mod batch;
pub mod config;
mod error;
pub mod events;
pub mod workbench;

pub use backend::{SessionBackend, StoreBackend};
pub use batch::{BatchOrchestrator, BatchProgress, BatchState, BatchSummary};
pub use config::{Config, ResolvedPaths};
pub use error::{Error, Result};
pub use events::{AppEvent, EventReceiver, EventSender};
pub use workbench::{sessions_in, SelectTarget, Workbench};
