use owo_colors::OwoColorize;
use std::fmt;

use crate::presentation::formatters::{fit, format_delta, format_percent, NAME_WIDTH, PATH_WIDTH};
use crate::presentation::view_models::{
    PageViewModel, ProjectListViewModel, SessionListViewModel, WorkspaceListViewModel,
};

fn page_footer<T>(f: &mut fmt::Formatter, page: &PageViewModel<T>, noun: &str) -> fmt::Result {
    writeln!(f)?;
    writeln!(
        f,
        "{}",
        format!(
            "Page {}/{} · {} {}",
            page.page,
            page.total_pages.max(1),
            page.total_filtered,
            noun
        )
        .dimmed()
    )
}

impl fmt::Display for ProjectListViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.page.items.is_empty() {
            return writeln!(f, "No projects with sessions.");
        }

        writeln!(
            f,
            "  {} {} {:>8} {:>16} {:>6}",
            fit("PROJECT", 20),
            fit("PATH", PATH_WIDTH),
            "SESSIONS",
            "LINES",
            "FILES"
        )?;
        for row in &self.page.items {
            writeln!(
                f,
                "  {} {} {:>8} {:>16} {:>6}",
                fit(&row.name, 20).bold(),
                fit(&row.path, PATH_WIDTH),
                row.chat_count,
                format_delta(row.lines_added, row.lines_removed),
                row.files_changed
            )?;
        }

        page_footer(f, &self.page, "projects")
    }
}

impl fmt::Display for WorkspaceListViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.page.items.is_empty() {
            return writeln!(f, "No workspaces with sessions.");
        }

        for row in &self.page.items {
            let kind = if row.is_multi_project { "multi-root" } else { "folder" };
            writeln!(
                f,
                "  {} {} {}",
                row.name.bold(),
                row.id.dimmed(),
                format!("({})", kind).dimmed()
            )?;
            if !row.created_at.is_empty() {
                writeln!(f, "    created  {}", row.created_at)?;
            }
            for project in &row.projects {
                writeln!(f, "    folder   {}", project)?;
            }
            writeln!(
                f,
                "    {} sessions, {} lines, {} files",
                row.chat_count,
                format_delta(row.lines_added, row.lines_removed),
                row.files_changed
            )?;
        }

        page_footer(f, &self.page, "workspaces")
    }
}

impl fmt::Display for SessionListViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} {}", self.owner_label.bold(), self.owner.dimmed())?;
        writeln!(f)?;

        if self.page.items.is_empty() {
            writeln!(f, "No sessions match the current filter.")?;
            return page_footer(f, &self.page, "sessions");
        }

        writeln!(
            f,
            "  {} {} {:<8} {:<16} {:>14} {:>5} {:>4}",
            fit("ID", 8),
            fit("NAME", NAME_WIDTH),
            "MODE",
            "UPDATED",
            "LINES",
            "FILES",
            "CTX"
        )?;
        for row in &self.page.items {
            let name = fit(&row.name, NAME_WIDTH);
            let name = if row.is_archived {
                name.dimmed().to_string()
            } else {
                name
            };
            writeln!(
                f,
                "  {} {} {:<8} {:<16} {:>14} {:>5} {:>4}",
                fit(&row.id, 8).cyan(),
                name,
                fit(&row.mode, 8),
                row.updated_at.as_deref().unwrap_or("-"),
                format_delta(row.lines_added, row.lines_removed),
                row.files_changed,
                format_percent(row.context_usage)
            )?;
        }

        page_footer(f, &self.page, "sessions")
    }
}
