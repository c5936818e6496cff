use anyhow::{Context, Result};
use chatsweep_engine::{list_workspaces, render, WorkspaceListCriteria};
use chatsweep_runtime::events;

use super::{progress, targets};
use crate::args::hints::fmt;
use crate::args::{ConfirmArgs, CriteriaArgs};
use crate::context::HandlerContext;
use crate::presentation::presenters;
use crate::presentation::view_models::DeleteKind;
use crate::presentation::Renderer;

pub fn list(ctx: &HandlerContext, criteria: &WorkspaceListCriteria) -> Result<()> {
    let mut bench = ctx.workbench()?;
    let snapshot = bench.snapshot()?;
    let page = list_workspaces(&snapshot.workspaces, criteria);
    ctx.renderer()
        .render(presenters::present_workspace_list(page))
}

pub fn sessions(ctx: &HandlerContext, id: &str, args: &CriteriaArgs) -> Result<()> {
    let mut bench = ctx.workbench()?;
    let snapshot = bench.snapshot()?;
    let workspace = snapshot
        .find_workspace(id)
        .with_context(|| format!("Unknown workspace '{}'", id))?;

    let criteria = args.to_criteria();
    let page = render(&workspace.recent_chats, &criteria);
    let base = format!("{}{}", fmt::workspace_sessions(id), args.flags());

    ctx.renderer().render(presenters::present_session_list(
        id,
        &workspace.display_name(),
        workspace.recent_chats.len(),
        page,
        &criteria,
        &base,
    ))
}

pub fn delete(ctx: &HandlerContext, ids: &[String], confirm: ConfirmArgs) -> Result<()> {
    let (tx, rx) = events::channel();
    let mut bench = ctx.workbench_with_events(tx)?;
    let snapshot = bench.snapshot()?;
    let rows: Vec<_> = ids
        .iter()
        .map(|id| targets::workspace(&snapshot, id))
        .collect();

    if !confirm.yes {
        let args: Vec<String> = ids.iter().map(|id| fmt::arg(id)).collect();
        let line = format!("chatsweep workspace delete {}", args.join(" "));
        return ctx.renderer().render(presenters::present_delete_plan(
            DeleteKind::Workspace,
            rows,
            &line,
        ));
    }

    if let [id] = ids {
        let removed = bench.delete_workspace(id)?;
        let row = targets::workspace(&snapshot, id);
        return ctx.renderer().render(presenters::present_single_delete(
            DeleteKind::Workspace,
            row,
            removed,
        ));
    }

    let summary = progress::run_batch(ctx.json(), rx, async move {
        let summary = bench.delete_workspaces(ids).await;
        drop(bench);
        summary
    })?;

    ctx.renderer().render(presenters::present_delete_result(
        DeleteKind::Workspace,
        rows,
        summary,
    ))
}
