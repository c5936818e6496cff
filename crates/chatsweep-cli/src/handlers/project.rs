use anyhow::{Context, Result};
use chatsweep_engine::{list_projects, render, ProjectListCriteria};
use chatsweep_runtime::events;

use super::{progress, targets};
use crate::args::hints::fmt;
use crate::args::{ConfirmArgs, CriteriaArgs};
use crate::context::HandlerContext;
use crate::presentation::presenters;
use crate::presentation::view_models::DeleteKind;
use crate::presentation::Renderer;

pub fn list(ctx: &HandlerContext, criteria: &ProjectListCriteria) -> Result<()> {
    let mut bench = ctx.workbench()?;
    let snapshot = bench.snapshot()?;
    let page = list_projects(&snapshot.projects, criteria);
    ctx.renderer()
        .render(presenters::present_project_list(page, criteria))
}

pub fn sessions(ctx: &HandlerContext, path: &str, args: &CriteriaArgs) -> Result<()> {
    let mut bench = ctx.workbench()?;
    let snapshot = bench.snapshot()?;
    let project = snapshot
        .find_project(path)
        .with_context(|| format!("No sessions recorded for project '{}'", path))?;

    let criteria = args.to_criteria();
    let page = render(&project.chats, &criteria);
    let base = format!("{}{}", fmt::project_sessions(path), args.flags());

    ctx.renderer().render(presenters::present_session_list(
        path,
        &project.display_name(),
        project.chats.len(),
        page,
        &criteria,
        &base,
    ))
}

/// Move every session of `paths` to the trash. One path is a single delete
/// whose error fails the command; several run as a batch.
pub fn delete(ctx: &HandlerContext, paths: &[String], confirm: ConfirmArgs) -> Result<()> {
    let (tx, rx) = events::channel();
    let mut bench = ctx.workbench_with_events(tx)?;
    let snapshot = bench.snapshot()?;
    let rows: Vec<_> = paths
        .iter()
        .map(|p| targets::project(&snapshot, p))
        .collect();

    if !confirm.yes {
        let args: Vec<String> = paths.iter().map(|p| fmt::arg(p)).collect();
        let line = format!("chatsweep project delete {}", args.join(" "));
        return ctx.renderer().render(presenters::present_delete_plan(
            DeleteKind::Project,
            rows,
            &line,
        ));
    }

    if let [path] = paths {
        let removed = bench.delete_project(path)?;
        let row = targets::project(&snapshot, path);
        return ctx.renderer().render(presenters::present_single_delete(
            DeleteKind::Project,
            row,
            removed,
        ));
    }

    let summary = progress::run_batch(ctx.json(), rx, async move {
        let summary = bench.delete_projects(paths).await;
        drop(bench);
        summary
    })?;

    ctx.renderer().render(presenters::present_delete_result(
        DeleteKind::Project,
        rows,
        summary,
    ))
}
