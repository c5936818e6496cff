use owo_colors::OwoColorize;
use std::fmt;

use crate::presentation::view_models::ConfigViewModel;

impl fmt::Display for ConfigViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let state = if self.exists { "" } else { " (not created, defaults in use)" };
        writeln!(f, "  {:<16} {}{}", "config", self.config_path, state.dimmed())?;
        writeln!(f, "  {:<16} {}", "data dir", self.data_dir)?;
        writeln!(f, "  {:<16} {}", "cursor user dir", self.cursor_user_dir)?;
        writeln!(f, "  {:<16} {}", "trash db", self.trash_db)?;
        writeln!(f, "  {:<16} {}", "native batch", self.native_batch)
    }
}
