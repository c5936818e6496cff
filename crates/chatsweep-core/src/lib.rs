mod format;
mod path;

pub use format::*;
pub use path::*;
