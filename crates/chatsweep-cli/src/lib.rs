// chatsweep command-line surface
//
// Handlers turn parsed arguments into workbench calls; everything printed
// goes through presentation (presenter -> view model -> renderer).
// Diagnostics go to stderr through tracing so stdout stays parseable.

mod args;
mod commands;
mod context;
mod handlers;
mod logging;
pub mod presentation;

pub use args::{
    Cli, Commands, ConfigCommand, LogLevel, OutputFormat, ProjectCommand, SessionCommand,
    TrashCommand, WorkspaceCommand,
};
pub use commands::run;
