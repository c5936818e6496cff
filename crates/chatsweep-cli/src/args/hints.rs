pub mod cmd {
    pub const PROJECT_LIST: &str = "chatsweep project list";
    pub const WORKSPACE_LIST: &str = "chatsweep workspace list";
    pub const TRASH_LIST: &str = "chatsweep trash list";
    pub const TRASH_CLEAR: &str = "chatsweep trash clear --yes";
    pub const CONFIG_INIT: &str = "chatsweep config init";
}

pub mod fmt {
    pub fn project_sessions(path: &str) -> String {
        format!("chatsweep project sessions {}", arg(path))
    }

    pub fn workspace_sessions(id: &str) -> String {
        format!("chatsweep workspace sessions {}", arg(id))
    }

    pub fn next_page(base: &str, page: usize) -> String {
        format!("{} --page {}", base, page)
    }

    /// Quote an argument for a copy-pastable command line when it needs it.
    pub fn arg(value: &str) -> String {
        let plain = !value.is_empty()
            && value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "/._-:".contains(c));
        if plain {
            value.to_string()
        } else {
            format!("'{}'", value.replace('\'', "'\\''"))
        }
    }

    /// The same command line with `--yes` appended.
    pub fn confirm(command: &str) -> String {
        format!("{} --yes", command)
    }
}
