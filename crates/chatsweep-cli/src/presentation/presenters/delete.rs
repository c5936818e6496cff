use chatsweep_runtime::BatchSummary;

use crate::args::hints::{cmd, fmt};
use crate::presentation::view_models::{
    CommandResultViewModel, DeleteKind, DeleteTargetViewModel, DeleteViewModel, Guidance,
    StatusBadge, SummaryViewModel,
};

/// Output of a destructive command run without `--yes`.
pub fn present_delete_plan(
    kind: DeleteKind,
    targets: Vec<DeleteTargetViewModel>,
    command_line: &str,
) -> CommandResultViewModel<DeleteViewModel> {
    let count = targets.len();
    let content = DeleteViewModel {
        kind,
        dry_run: true,
        targets,
        summary: None,
        removed: None,
    };

    CommandResultViewModel::new(content)
        .with_badge(StatusBadge::warning(format!(
            "Dry run: {} {} would be moved to the trash",
            count,
            kind.noun(count)
        )))
        .with_suggestion(Guidance::new("Confirm the deletion").with_command(fmt::confirm(command_line)))
}

pub fn present_single_delete(
    kind: DeleteKind,
    target: DeleteTargetViewModel,
    removed: u64,
) -> CommandResultViewModel<DeleteViewModel> {
    let content = DeleteViewModel {
        kind,
        dry_run: false,
        targets: vec![target],
        summary: Some(SummaryViewModel {
            succeeded: 1,
            failed: 0,
            message: None,
        }),
        removed: Some(removed),
    };

    let label = match kind {
        DeleteKind::Session if removed == 0 => "Session was already gone".to_string(),
        DeleteKind::Session => "Session moved to the trash".to_string(),
        _ => format!("{} session(s) moved to the trash", removed),
    };

    CommandResultViewModel::new(content)
        .with_badge(StatusBadge::success(label))
        .with_suggestion(Guidance::new("Review the trash").with_command(cmd::TRASH_LIST))
}

pub fn present_delete_result(
    kind: DeleteKind,
    targets: Vec<DeleteTargetViewModel>,
    summary: BatchSummary,
) -> CommandResultViewModel<DeleteViewModel> {
    let message = summary.failure_message();
    let badge = if summary.failed > 0 {
        StatusBadge::warning(format!(
            "{} of {} {} failed",
            summary.failed,
            summary.total(),
            kind.noun(summary.total())
        ))
    } else {
        StatusBadge::success(format!(
            "Deleted {} {}",
            summary.succeeded,
            kind.noun(summary.succeeded)
        ))
    };

    let content = DeleteViewModel {
        kind,
        dry_run: false,
        targets,
        summary: Some(SummaryViewModel {
            succeeded: summary.succeeded,
            failed: summary.failed,
            message,
        }),
        removed: None,
    };

    let mut result = CommandResultViewModel::new(content).with_badge(badge);
    if summary.failed > 0 {
        result = result.with_suggestion(Guidance::new(
            "Each failed item was logged to stderr with its error",
        ));
    }
    result.with_suggestion(Guidance::new("Review the trash").with_command(cmd::TRASH_LIST))
}

/// Nothing matched the ids or the filter; nothing was deleted.
pub fn present_empty_selection(kind: DeleteKind) -> CommandResultViewModel<DeleteViewModel> {
    let content = DeleteViewModel {
        kind,
        dry_run: false,
        targets: Vec::new(),
        summary: Some(SummaryViewModel {
            succeeded: 0,
            failed: 0,
            message: None,
        }),
        removed: None,
    };

    CommandResultViewModel::new(content)
        .with_badge(StatusBadge::info(format!("No {} selected", kind.noun(0))))
}
