use chatsweep_runtime::{Config, ResolvedPaths};

use crate::args::hints::cmd;
use crate::presentation::view_models::{
    CommandResultViewModel, ConfigViewModel, Guidance, StatusBadge,
};

pub fn present_config(
    paths: &ResolvedPaths,
    config: &Config,
    exists: bool,
    written: bool,
) -> CommandResultViewModel<ConfigViewModel> {
    let content = ConfigViewModel {
        config_path: paths.config_path.display().to_string(),
        exists,
        written,
        data_dir: paths.data_dir.display().to_string(),
        cursor_user_dir: paths.cursor_user_dir.display().to_string(),
        trash_db: paths.trash_db.display().to_string(),
        native_batch: config.native_batch,
    };

    let result = CommandResultViewModel::new(content);
    if written {
        result.with_badge(StatusBadge::success("Config file written"))
    } else if exists {
        result.with_badge(StatusBadge::info("Configuration"))
    } else {
        result
            .with_badge(StatusBadge::info("No config file, using defaults"))
            .with_suggestion(Guidance::new("Create one").with_command(cmd::CONFIG_INIT))
    }
}
