use owo_colors::OwoColorize;
use std::fmt;

use crate::presentation::formatters::format_count;
use crate::presentation::view_models::{
    DatabaseViewModel, OverviewViewModel, StorageViewModel, VersionViewModel,
};

impl fmt::Display for OverviewViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "  {:<18} {}", "Projects", self.total_projects)?;
        writeln!(f, "  {:<18} {}", "Workspaces", self.total_workspaces)?;
        writeln!(f, "  {:<18} {}", "Sessions", self.total_chats)?;
        writeln!(
            f,
            "  {:<18} {} agent / {} other",
            "Modes", self.agent_mode_count, self.chat_mode_count
        )?;
        writeln!(
            f,
            "  {:<18} {} / {}",
            "Lines",
            format!("+{}", format_count(self.total_lines_added)).green(),
            format!("-{}", format_count(self.total_lines_removed)).red()
        )?;
        writeln!(f, "  {:<18} {}", "Net lines", self.net_lines)?;
        writeln!(f, "  {:<18} {}", "Files changed", self.total_files_changed)
    }
}

impl fmt::Display for StorageViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.user_dir.dimmed())?;
        writeln!(f)?;
        for entry in &self.entries {
            writeln!(f, "  {:<28} {:>12}", entry.label, entry.human)?;
        }
        writeln!(f, "  {:<28} {:>12}", self.total.label.bold(), self.total.human.bold())
    }
}

impl fmt::Display for DatabaseViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "  {:<16} {:>10} {:>12}", "TABLE", "ROWS", "SIZE")?;
        for table in &self.tables {
            writeln!(
                f,
                "  {:<16} {:>10} {:>12}",
                table.name,
                table.rows,
                table.human
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for VersionViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} {}", self.name, self.version)
    }
}
