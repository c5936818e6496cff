mod progress;
mod targets;

pub mod config;
pub mod project;
pub mod report;
pub mod session;
pub mod trash;
pub mod workspace;
