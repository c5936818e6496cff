//! # Presentation Layer
//!
//! ```text
//! [ Handler ] --> [ Presenter ] --> [ ViewModel ] --> [ Renderer ] --> [ Output ]
//! ```
//!
//! * `view_models/`: serializable data contracts. What `--format json` prints.
//! * `presenters/`: domain records to view models, plus badges and tips.
//! * `views/`: `fmt::Display` for each view model (plain text layout).
//! * `renderers/`: picks JSON or text and writes to stdout.
//! * `formatters/`: small shared string helpers.

pub mod formatters;
pub mod presenters;
pub mod renderers;
pub mod view_models;
mod views;

pub use renderers::{ConsoleRenderer, Renderer};
pub use view_models::{CommandResultViewModel, Guidance, StatusBadge, StatusLevel};
