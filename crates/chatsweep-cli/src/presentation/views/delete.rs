use owo_colors::OwoColorize;
use std::fmt;

use crate::presentation::view_models::DeleteViewModel;

impl fmt::Display for DeleteViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.targets.is_empty() {
            return Ok(());
        }

        let heading = if self.dry_run {
            "Would move to trash:"
        } else {
            "Moved to trash:"
        };
        writeln!(f, "{}", heading)?;

        for target in &self.targets {
            match target.sessions {
                Some(count) => writeln!(
                    f,
                    "  {} {} ({} sessions)",
                    target.label.bold(),
                    target.id.dimmed(),
                    count
                )?,
                None => writeln!(f, "  {} {}", target.label.bold(), target.id.dimmed())?,
            }
        }

        if let Some(summary) = &self.summary
            && let Some(message) = &summary.message
        {
            writeln!(f)?;
            writeln!(f, "{}", message.yellow())?;
        }

        Ok(())
    }
}
