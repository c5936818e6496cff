use anyhow::Result;

use crate::context::HandlerContext;
use crate::presentation::presenters;
use crate::presentation::Renderer;

pub fn overview(ctx: &HandlerContext) -> Result<()> {
    let mut bench = ctx.workbench()?;
    let snapshot = bench.snapshot()?;
    ctx.renderer().render(presenters::present_overview(&snapshot))
}

pub fn storage(ctx: &HandlerContext) -> Result<()> {
    let mut bench = ctx.workbench()?;
    let snapshot = bench.snapshot()?;
    let user_dir = ctx.paths.cursor_user_dir.display().to_string();
    ctx.renderer()
        .render(presenters::present_storage(&user_dir, &snapshot.storage))
}

pub fn database(ctx: &HandlerContext) -> Result<()> {
    let mut bench = ctx.workbench()?;
    let snapshot = bench.snapshot()?;
    ctx.renderer()
        .render(presenters::present_database(&snapshot.database))
}

pub fn version(ctx: &HandlerContext) -> Result<()> {
    let bench = ctx.workbench()?;
    ctx.renderer()
        .render(presenters::present_version(bench.app_version()?))
}
