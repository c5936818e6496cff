// Engine module - pure view logic over a snapshot (filter, sort, page, select)
// Nothing here performs I/O; the runtime layer owns the store.

pub mod list;
pub mod query;
pub mod selection;

pub use list::{
    list_projects, list_workspaces, sort_projects, visible_workspaces, ProjectListCriteria,
    ProjectSortField, WorkspaceListCriteria,
};
pub use query::{
    filtered_ids, paginate, render, ArchiveFilter, Criteria, ModeFilter, Page, SortField,
    SortOrder, PAGE_SIZE,
};
pub use selection::{ListState, Selection, SelectionScope, ViewCriteria};
