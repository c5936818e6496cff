pub mod number;
pub mod text;

pub use number::{format_count, format_delta, format_percent};
pub use text::{fit, NAME_WIDTH, PATH_WIDTH};
