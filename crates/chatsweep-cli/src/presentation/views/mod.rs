// Plain-text layout of each view model, as `fmt::Display`.

mod config;
mod delete;
mod listing;
mod report;
mod trash;
