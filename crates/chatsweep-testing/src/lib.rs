//! Testing infrastructure for chatsweep integration tests.
//!
//! This crate provides utilities for writing robust integration tests:
//! - `CursorFixture`: builds a fake IDE user directory with state databases
//! - `TestWorld`: isolated data and IDE directories plus CLI execution
//! - `assertions`: JSON envelope checks for CLI output

pub mod assertions;
pub mod fixtures;
pub mod world;

pub use fixtures::{ComposerSpec, CursorFixture};
pub use world::{CliResult, TestWorld};
