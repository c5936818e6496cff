// Record model shared by every chatsweep crate.
// Pure data contracts: no I/O, no behavior beyond derived values and lookups.

pub mod domain;
mod util;

pub use domain::*;
pub use util::*;
