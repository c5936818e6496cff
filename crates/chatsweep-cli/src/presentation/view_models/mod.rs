mod common;
mod config;
mod delete;
mod listing;
mod report;
mod result;
mod trash;

pub use common::{Guidance, StatusBadge, StatusLevel};
pub use config::ConfigViewModel;
pub use delete::{DeleteKind, DeleteTargetViewModel, DeleteViewModel, SummaryViewModel};
pub use listing::{
    PageViewModel, ProjectListViewModel, ProjectRowViewModel, SessionListViewModel,
    SessionRowViewModel, WorkspaceListViewModel, WorkspaceRowViewModel,
};
pub use report::{
    DatabaseViewModel, OverviewViewModel, SizeEntry, StorageViewModel, TableStat, VersionViewModel,
};
pub use result::CommandResultViewModel;
pub use trash::{TrashEntryViewModel, TrashListViewModel, TrashPurgeViewModel};
