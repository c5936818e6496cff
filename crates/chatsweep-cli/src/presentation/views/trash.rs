use owo_colors::OwoColorize;
use std::fmt;

use crate::presentation::formatters::{fit, format_delta, NAME_WIDTH};
use crate::presentation::view_models::{TrashListViewModel, TrashPurgeViewModel};

impl fmt::Display for TrashListViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.items.is_empty() {
            return writeln!(f, "Trash is empty.");
        }

        writeln!(
            f,
            "  {:>5} {} {:<19} {:>14}  PROJECT",
            "ID",
            fit("NAME", NAME_WIDTH),
            "DELETED",
            "LINES"
        )?;
        for item in &self.items {
            writeln!(
                f,
                "  {:>5} {} {:<19} {:>14}  {}",
                item.id.to_string().cyan(),
                fit(&item.chat_name, NAME_WIDTH),
                item.deleted_at,
                format_delta(item.lines_added, item.lines_removed),
                item.project_path.dimmed()
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for TrashPurgeViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.dry_run, self.target) {
            (true, _) => writeln!(f, "{} entries would be removed permanently.", self.removed),
            (false, Some(id)) if self.removed == 0 => {
                writeln!(f, "No trash entry with id {}.", id)
            }
            (false, _) => writeln!(f, "Removed {} entries permanently.", self.removed),
        }
    }
}
