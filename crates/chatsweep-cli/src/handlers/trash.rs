use anyhow::Result;

use crate::args::ConfirmArgs;
use crate::context::HandlerContext;
use crate::presentation::presenters;
use crate::presentation::Renderer;

pub fn list(ctx: &HandlerContext) -> Result<()> {
    let bench = ctx.workbench()?;
    ctx.renderer()
        .render(presenters::present_trash_list(bench.list_trash()?))
}

/// Without `--yes` only reports how many entries would go.
pub fn clear(ctx: &HandlerContext, confirm: ConfirmArgs) -> Result<()> {
    let mut bench = ctx.workbench()?;
    if !confirm.yes {
        let pending = bench.list_trash()?.len() as u64;
        return ctx
            .renderer()
            .render(presenters::present_trash_purge(true, None, pending));
    }

    let removed = bench.clear_trash()?;
    ctx.renderer()
        .render(presenters::present_trash_purge(false, None, removed))
}

pub fn delete(ctx: &HandlerContext, id: i64) -> Result<()> {
    let mut bench = ctx.workbench()?;
    let removed = u64::from(bench.delete_trash_item(id)?);
    ctx.renderer()
        .render(presenters::present_trash_purge(false, Some(id), removed))
}
