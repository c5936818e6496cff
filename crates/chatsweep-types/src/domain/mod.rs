pub mod project;
pub mod session;
pub mod snapshot;
pub mod trash;

pub use project::*;
pub use session::*;
pub use snapshot::*;
pub use trash::*;
