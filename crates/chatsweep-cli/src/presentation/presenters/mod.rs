mod config;
mod delete;
mod listing;
mod report;
mod trash;

pub use config::present_config;
pub use delete::{
    present_delete_plan, present_delete_result, present_empty_selection, present_single_delete,
};
pub use listing::{present_project_list, present_session_list, present_workspace_list};
pub use report::{present_database, present_overview, present_storage, present_version};
pub use trash::{present_trash_list, present_trash_purge};
