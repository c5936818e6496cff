use super::args::{
    Cli, Commands, ConfigCommand, ProjectCommand, SessionCommand, TrashCommand, WorkspaceCommand,
};
use super::context::HandlerContext;
use super::handlers;
use super::logging;
use anyhow::{Context, Result};
use chatsweep_engine::{ProjectListCriteria, WorkspaceListCriteria};
use chatsweep_runtime::Config;
use tracing::debug;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);

    let data_dir = chatsweep_core::resolve_data_dir(cli.data_dir.as_deref())
        .context("Failed to resolve the data directory")?;
    let config_path = Config::path_in(&data_dir);
    let config = Config::load_from(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    let paths = config.resolve_paths(&data_dir, cli.cursor_dir.as_deref())?;

    debug!(
        data_dir = %paths.data_dir.display(),
        cursor_user_dir = %paths.cursor_user_dir.display(),
        trash_db = %paths.trash_db.display(),
        "paths resolved"
    );

    let ctx = HandlerContext::new(paths, config, cli.format);

    match cli.command {
        Commands::Overview => handlers::report::overview(&ctx),
        Commands::Storage => handlers::report::storage(&ctx),
        Commands::Database => handlers::report::database(&ctx),
        Commands::Version => handlers::report::version(&ctx),

        Commands::Project { command } => match command {
            ProjectCommand::List { sort, page } => handlers::project::list(
                &ctx,
                &ProjectListCriteria {
                    sort_field: sort,
                    page,
                },
            ),
            ProjectCommand::Sessions { path, criteria } => {
                handlers::project::sessions(&ctx, &path, &criteria)
            }
            ProjectCommand::Delete { paths, confirm } => {
                handlers::project::delete(&ctx, &paths, confirm)
            }
        },

        Commands::Workspace { command } => match command {
            WorkspaceCommand::List { page } => {
                handlers::workspace::list(&ctx, &WorkspaceListCriteria { page })
            }
            WorkspaceCommand::Sessions { id, criteria } => {
                handlers::workspace::sessions(&ctx, &id, &criteria)
            }
            WorkspaceCommand::Delete { ids, confirm } => {
                handlers::workspace::delete(&ctx, &ids, confirm)
            }
        },

        Commands::Session { command } => match command {
            SessionCommand::Delete {
                project,
                workspace,
                ids,
                select,
                criteria,
                confirm,
            } => {
                let owner = match (project, workspace) {
                    (Some(path), _) => handlers::session::Owner::Project(path),
                    (None, Some(id)) => handlers::session::Owner::Workspace(id),
                    (None, None) => anyhow::bail!("Pass --project or --workspace"),
                };
                let pick = match select {
                    Some(mode) => handlers::session::Pick::Select(mode),
                    None => handlers::session::Pick::Ids(ids),
                };
                handlers::session::delete(&ctx, owner, pick, &criteria, confirm)
            }
        },

        Commands::Trash { command } => match command {
            TrashCommand::List => handlers::trash::list(&ctx),
            TrashCommand::Clear { confirm } => handlers::trash::clear(&ctx, confirm),
            TrashCommand::Delete { id } => handlers::trash::delete(&ctx, id),
        },

        Commands::Config { command } => match command {
            ConfigCommand::Init { force } => handlers::config::init(&ctx, force),
            ConfigCommand::Show => handlers::config::show(&ctx),
        },
    }
}
