use super::common::{ConfirmArgs, CriteriaArgs, SelectMode};
use chatsweep_engine::ProjectSortField;
use clap::{ArgGroup, Subcommand};

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Totals over every project")]
    Overview,

    #[command(about = "Disk usage of the IDE storage directories")]
    Storage,

    #[command(about = "Row counts of the IDE global state database")]
    Database,

    #[command(about = "Show the chatsweep version")]
    Version,

    #[command(about = "List projects and delete all of a project's sessions")]
    Project {
        #[command(subcommand)]
        command: ProjectCommand,
    },

    #[command(about = "List workspaces and delete all of a workspace's sessions")]
    Workspace {
        #[command(subcommand)]
        command: WorkspaceCommand,
    },

    #[command(about = "Delete individual sessions")]
    Session {
        #[command(subcommand)]
        command: SessionCommand,
    },

    #[command(about = "Inspect and purge deleted sessions")]
    Trash {
        #[command(subcommand)]
        command: TrashCommand,
    },

    #[command(about = "Manage the chatsweep configuration file")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum ProjectCommand {
    #[command(about = "List projects holding sessions")]
    List {
        #[arg(long, default_value = "lines_added")]
        sort: ProjectSortField,

        #[arg(long, default_value = "1")]
        page: usize,
    },

    #[command(about = "List the sessions of one project")]
    Sessions {
        #[arg(help = "Project folder path as listed by `project list`")]
        path: String,

        #[command(flatten)]
        criteria: CriteriaArgs,
    },

    #[command(about = "Move every session of the given projects to the trash")]
    Delete {
        #[arg(required = true, num_args = 1..)]
        paths: Vec<String>,

        #[command(flatten)]
        confirm: ConfirmArgs,
    },
}

#[derive(Subcommand)]
pub enum WorkspaceCommand {
    #[command(about = "List workspaces holding sessions")]
    List {
        #[arg(long, default_value = "1")]
        page: usize,
    },

    #[command(about = "List the sessions of one workspace")]
    Sessions {
        id: String,

        #[command(flatten)]
        criteria: CriteriaArgs,
    },

    #[command(about = "Move every session of the given workspaces to the trash")]
    Delete {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,

        #[command(flatten)]
        confirm: ConfirmArgs,
    },
}

#[derive(Subcommand)]
pub enum SessionCommand {
    #[command(about = "Move sessions to the trash, by id or by the current filter")]
    #[command(group(ArgGroup::new("owner").required(true).args(["project", "workspace"])))]
    Delete {
        #[arg(long, help = "Project folder path owning the sessions")]
        project: Option<String>,

        #[arg(long, help = "Workspace id owning the sessions")]
        workspace: Option<String>,

        #[arg(conflicts_with = "select")]
        ids: Vec<String>,

        #[arg(
            long,
            value_name = "MODE",
            required_unless_present = "ids",
            help = "Select the current page or every filtered session instead of listing ids"
        )]
        select: Option<SelectMode>,

        #[command(flatten)]
        criteria: CriteriaArgs,

        #[command(flatten)]
        confirm: ConfirmArgs,
    },
}

#[derive(Subcommand)]
pub enum TrashCommand {
    #[command(about = "List deleted sessions, most recent first")]
    List,

    #[command(about = "Permanently remove every trash entry")]
    Clear {
        #[command(flatten)]
        confirm: ConfirmArgs,
    },

    #[command(about = "Permanently remove one trash entry")]
    Delete {
        #[arg(help = "Trash id as shown by `trash list`")]
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Write a config file with the defaults")]
    Init {
        #[arg(long, help = "Overwrite an existing config file")]
        force: bool,
    },

    #[command(about = "Show the config file and the resolved paths")]
    Show,
}
