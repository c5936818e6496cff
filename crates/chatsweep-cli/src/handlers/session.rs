use anyhow::Result;
use chatsweep_engine::{Selection, SelectionScope};
use chatsweep_runtime::{events, sessions_in, SelectTarget};

use super::{progress, targets};
use crate::args::hints::fmt;
use crate::args::{ConfirmArgs, CriteriaArgs, SelectMode};
use crate::context::HandlerContext;
use crate::presentation::presenters;
use crate::presentation::view_models::DeleteKind;
use crate::presentation::Renderer;

/// The list the sessions are picked from.
pub enum Owner {
    Project(String),
    Workspace(String),
}

impl Owner {
    fn scope(&self) -> SelectionScope {
        match self {
            Owner::Project(path) => SelectionScope::ProjectSessions(path.clone()),
            Owner::Workspace(id) => SelectionScope::WorkspaceSessions(id.clone()),
        }
    }

    fn flag(&self) -> String {
        match self {
            Owner::Project(path) => format!("--project {}", fmt::arg(path)),
            Owner::Workspace(id) => format!("--workspace {}", fmt::arg(id)),
        }
    }
}

pub enum Pick {
    Ids(Vec<String>),
    Select(SelectMode),
}

pub fn delete(
    ctx: &HandlerContext,
    owner: Owner,
    pick: Pick,
    args: &CriteriaArgs,
    confirm: ConfirmArgs,
) -> Result<()> {
    let scope = owner.scope();
    let (tx, rx) = events::channel();
    let mut bench = ctx.workbench_with_events(tx)?;
    let snapshot = bench.snapshot()?;
    let sessions = sessions_in(&snapshot, &scope)?;

    match &pick {
        Pick::Ids(ids) => bench.selection_mut(&scope).select_all(ids.iter().cloned()),
        Pick::Select(mode) => {
            let target = match mode {
                SelectMode::Page => SelectTarget::Page,
                SelectMode::Filtered => SelectTarget::Filtered,
            };
            bench.select_sessions(&scope, &args.to_criteria(), target)?;
        }
    }

    let ids = bench
        .selection(&scope)
        .map(Selection::to_vec)
        .unwrap_or_default();
    if ids.is_empty() {
        return ctx
            .renderer()
            .render(presenters::present_empty_selection(DeleteKind::Session));
    }

    let rows: Vec<_> = ids
        .iter()
        .map(|id| targets::session(sessions, id))
        .collect();

    if !confirm.yes {
        let line = command_line(&owner, &pick, args);
        return ctx.renderer().render(presenters::present_delete_plan(
            DeleteKind::Session,
            rows,
            &line,
        ));
    }

    if let [id] = ids.as_slice()
        && matches!(pick, Pick::Ids(_))
    {
        let removed = bench.delete_session_in(&scope, id)?;
        let row = targets::session(sessions, id);
        return ctx.renderer().render(presenters::present_single_delete(
            DeleteKind::Session,
            row,
            removed,
        ));
    }

    let summary = progress::run_batch(ctx.json(), rx, async move {
        let summary = bench.delete_selected(&scope).await;
        drop(bench);
        summary
    })??;

    ctx.renderer().render(presenters::present_delete_result(
        DeleteKind::Session,
        rows,
        summary,
    ))
}

fn command_line(owner: &Owner, pick: &Pick, args: &CriteriaArgs) -> String {
    let mut line = format!("chatsweep session delete {}", owner.flag());
    match pick {
        Pick::Ids(ids) => {
            for id in ids {
                line.push(' ');
                line.push_str(&fmt::arg(id));
            }
        }
        Pick::Select(mode) => {
            let mode = match mode {
                SelectMode::Page => "page",
                SelectMode::Filtered => "filtered",
            };
            line.push_str(&format!(" --select {}{}", mode, args.flags()));
            if args.page != 1 {
                line.push_str(&format!(" --page {}", args.page));
            }
        }
    }
    line
}
