use anyhow::{bail, Result};
use chatsweep_runtime::Config;

use crate::context::HandlerContext;
use crate::presentation::presenters;
use crate::presentation::Renderer;

/// Write the default config. An existing file is kept unless `force`.
pub fn init(ctx: &HandlerContext, force: bool) -> Result<()> {
    let path = &ctx.paths.config_path;
    if path.exists() && !force {
        bail!(
            "Config file already exists at {} (pass --force to overwrite)",
            path.display()
        );
    }

    let config = Config::default();
    config.save_to(path)?;
    tracing::info!(path = %path.display(), "config written");

    ctx.renderer()
        .render(presenters::present_config(&ctx.paths, &config, true, true))
}

pub fn show(ctx: &HandlerContext) -> Result<()> {
    let exists = ctx.paths.config_path.exists();
    ctx.renderer().render(presenters::present_config(
        &ctx.paths,
        &ctx.config,
        exists,
        false,
    ))
}
