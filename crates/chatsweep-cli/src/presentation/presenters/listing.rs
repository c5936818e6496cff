use chatsweep_engine::{Criteria, Page, ProjectListCriteria, PAGE_SIZE};
use chatsweep_types::{ChatSession, ProjectStats, WorkspaceInfo};

use crate::args::hints::{cmd, fmt};
use crate::presentation::view_models::{
    CommandResultViewModel, Guidance, PageViewModel, ProjectListViewModel, ProjectRowViewModel,
    SessionListViewModel, SessionRowViewModel, StatusBadge, WorkspaceListViewModel,
    WorkspaceRowViewModel,
};

fn page_view<T, U>(page: Page<T>, row: impl FnMut(T) -> U) -> PageViewModel<U> {
    let page = page.map(row);
    PageViewModel {
        items: page.items,
        page: page.page,
        total_pages: page.total_pages,
        total_filtered: page.total_filtered,
    }
}

fn next_page_tip<T>(page: &PageViewModel<T>, base: &str) -> Option<Guidance> {
    (page.page < page.total_pages).then(|| {
        let remaining = page.total_filtered - page.page * PAGE_SIZE;
        Guidance::new(format!("{} more on later pages", remaining))
            .with_command(fmt::next_page(base, page.page + 1))
    })
}

pub fn present_project_list(
    page: Page<&ProjectStats>,
    criteria: &ProjectListCriteria,
) -> CommandResultViewModel<ProjectListViewModel> {
    let page = page_view(page, |p| ProjectRowViewModel {
        name: p.display_name(),
        path: p.path.clone(),
        chat_count: p.chat_count,
        lines_added: p.lines_added,
        lines_removed: p.lines_removed,
        files_changed: p.files_changed,
    });

    let first_path = page.items.first().map(|p| p.path.clone());
    let base = format!("{} --sort {}", cmd::PROJECT_LIST, criteria.sort_field);
    let next = next_page_tip(&page, &base);
    let total = page.total_filtered;

    let mut result = CommandResultViewModel::new(ProjectListViewModel {
        sort: criteria.sort_field.to_string(),
        page,
    });

    if total == 0 {
        return result.with_badge(StatusBadge::info("No projects with sessions"));
    }

    result = result.with_badge(StatusBadge::success(format!("{} project(s)", total)));
    if let Some(tip) = next {
        result = result.with_suggestion(tip);
    }
    if let Some(path) = first_path {
        result = result.with_suggestion(
            Guidance::new("List a project's sessions").with_command(fmt::project_sessions(&path)),
        );
    }
    result
}

pub fn present_workspace_list(
    page: Page<&WorkspaceInfo>,
) -> CommandResultViewModel<WorkspaceListViewModel> {
    let page = page_view(page, |w| WorkspaceRowViewModel {
        id: w.id.clone(),
        name: w.display_name(),
        created_at: w.created_at.clone(),
        projects: w.projects.clone(),
        is_multi_project: w.is_multi_project,
        chat_count: w.chat_count,
        lines_added: w.lines_added,
        lines_removed: w.lines_removed,
        files_changed: w.files_changed,
    });

    let first_id = page.items.first().map(|w| w.id.clone());
    let next = next_page_tip(&page, cmd::WORKSPACE_LIST);
    let total = page.total_filtered;

    let mut result = CommandResultViewModel::new(WorkspaceListViewModel { page });

    if total == 0 {
        return result.with_badge(StatusBadge::info("No workspaces with sessions"));
    }

    result = result.with_badge(StatusBadge::success(format!("{} workspace(s)", total)));
    if let Some(tip) = next {
        result = result.with_suggestion(tip);
    }
    if let Some(id) = first_id {
        result = result.with_suggestion(
            Guidance::new("List a workspace's sessions").with_command(fmt::workspace_sessions(&id)),
        );
    }
    result
}

fn session_row(s: &ChatSession) -> SessionRowViewModel {
    SessionRowViewModel {
        id: s.id.clone(),
        name: s.name.clone(),
        mode: s.mode.to_string(),
        updated_at: s.updated_at.clone(),
        lines_added: s.lines_added,
        lines_removed: s.lines_removed,
        net_lines: s.net_lines(),
        files_changed: s.files_changed,
        context_usage: s.context_usage,
        branch: s.branch.clone(),
        is_archived: s.is_archived,
        subtitle: s.subtitle.clone(),
    }
}

/// `base_command` is the listing command line, used for paging tips.
pub fn present_session_list(
    owner: &str,
    owner_label: &str,
    total_sessions: usize,
    page: Page<&ChatSession>,
    criteria: &Criteria,
    base_command: &str,
) -> CommandResultViewModel<SessionListViewModel> {
    let page = page_view(page, session_row);
    let next = next_page_tip(&page, base_command);
    let shown = page.total_filtered;
    let hidden = total_sessions.saturating_sub(shown);

    let mut result = CommandResultViewModel::new(SessionListViewModel {
        owner: owner.to_string(),
        owner_label: owner_label.to_string(),
        total_sessions,
        sort: criteria.sort_field.to_string(),
        order: criteria.sort_order.to_string(),
        page,
    });

    result = result.with_badge(StatusBadge::success(format!(
        "{} of {} session(s) match",
        shown, total_sessions
    )));
    if let Some(tip) = next {
        result = result.with_suggestion(tip);
    }
    if hidden > 0 && criteria.hide_zero_change {
        result = result.with_suggestion(Guidance::new(
            "Sessions without changes are hidden; pass --show-zero to include them",
        ));
    }
    result
}
