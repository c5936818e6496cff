use chatsweep_types::TrashItem;

use crate::args::hints::cmd;
use crate::presentation::view_models::{
    CommandResultViewModel, Guidance, StatusBadge, TrashEntryViewModel, TrashListViewModel,
    TrashPurgeViewModel,
};

pub fn present_trash_list(items: Vec<TrashItem>) -> CommandResultViewModel<TrashListViewModel> {
    let items: Vec<TrashEntryViewModel> = items
        .into_iter()
        .map(|t| TrashEntryViewModel {
            id: t.id,
            chat_id: t.chat_id,
            chat_name: t.chat_name,
            project_path: t.project_path,
            mode: t.mode,
            lines_added: t.lines_added,
            lines_removed: t.lines_removed,
            files_changed: t.files_changed,
            deleted_at: t.deleted_at,
        })
        .collect();
    let total = items.len();

    let result = CommandResultViewModel::new(TrashListViewModel { items, total });
    if total == 0 {
        return result.with_badge(StatusBadge::info("Trash is empty"));
    }

    result
        .with_badge(StatusBadge::success(format!("{} item(s) in the trash", total)))
        .with_suggestion(Guidance::new("Purge everything").with_command(cmd::TRASH_CLEAR))
}

pub fn present_trash_purge(
    dry_run: bool,
    target: Option<i64>,
    removed: u64,
) -> CommandResultViewModel<TrashPurgeViewModel> {
    let badge = if dry_run {
        StatusBadge::warning("Dry run: nothing was removed")
    } else if removed == 0 {
        StatusBadge::info("Nothing to remove")
    } else {
        StatusBadge::success(format!("Removed {} trash item(s)", removed))
    };

    let result = CommandResultViewModel::new(TrashPurgeViewModel {
        dry_run,
        target,
        removed,
    })
    .with_badge(badge);

    if dry_run {
        result.with_suggestion(Guidance::new("Confirm the purge").with_command(cmd::TRASH_CLEAR))
    } else {
        result
    }
}
